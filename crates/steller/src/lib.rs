#![forbid(unsafe_code)]

//! Headless 2-D graph layout algorithms.
//!
//! Every algorithm reads its input through [`LayoutGraph`] and returns a [`Layout`]: two
//! index-aligned coordinate vectors, one entry per vertex. Output ranges differ per algorithm:
//!
//! - random: raw samples in `[0, 1)`
//! - circular / shell: unit-spaced circles centered at the origin
//! - spring: each axis rescaled into `[-1, 1]`
//! - spectral: raw eigenvector components
//!
//! All calls are synchronous and independent; randomness is always seeded or injected.

pub mod algo;
pub mod error;
pub mod graph;
pub mod normalize;

use rand::SeedableRng;
use rand::rngs::StdRng;

pub use algo::placement::{circular_layout, random_layout, shell_layout};
pub use algo::spectral::spectral_layout;
pub use algo::spring::{spring_layout, spring_layout_with_rng};
pub use algo::{Algorithm, EdgeWeights, SpectralOptions, SpringOptions};
pub use error::{Error, Result};
pub use graph::{CsrMatrix, Edge, Graph, Layout, LayoutGraph, Point};

/// Headless layout entry point.
pub fn layout<G>(graph: &G, algorithm: Algorithm) -> Result<Layout>
where
    G: LayoutGraph + ?Sized,
{
    match algorithm {
        Algorithm::Random { random_seed } => {
            random_layout(graph, &mut StdRng::seed_from_u64(random_seed))
        }
        Algorithm::Circular => circular_layout(graph),
        Algorithm::Shell { nlist } => shell_layout(graph, nlist.as_deref()),
        Algorithm::Spring(opts) => spring_layout(graph, &opts),
        Algorithm::Spectral(opts) => spectral_layout(graph, &opts),
    }
}
