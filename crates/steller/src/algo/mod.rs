pub mod placement;
pub mod spectral;
pub mod spring;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::LayoutGraph;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum Algorithm {
    /// Uniform samples in `[0, 1)` per coordinate.
    Random {
        #[serde(default)]
        random_seed: u64,
    },
    /// Evenly spaced on the unit circle.
    Circular,
    /// Concentric circles, one per vertex group.
    Shell {
        #[serde(default)]
        nlist: Option<Vec<Vec<usize>>>,
    },
    /// Fruchterman-Reingold force-directed simulation.
    Spring(SpringOptions),
    /// Laplacian eigenvector embedding.
    Spectral(SpectralOptions),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringOptions {
    /// Scales the ideal edge length `K = c * sqrt(4 / N)`.
    pub c: f64,
    pub max_iter: usize,
    /// Displacement cap for the first iteration; iteration `i` is capped at
    /// `initial_temperature / i`.
    pub initial_temperature: f64,
    /// Starting `(x, y)` coordinates. Copied, never aliased. When absent, each coordinate is drawn
    /// uniformly from `[-1, 1)`.
    pub initial_positions: Option<(Vec<f64>, Vec<f64>)>,
    /// Seeds the generator used for initial positions when the caller does not supply one.
    pub random_seed: u64,
    /// Rescale each axis into `[-1, 1]` after the simulation. Disabling this exposes the raw
    /// simulated coordinates.
    pub rescale: bool,
}

impl Default for SpringOptions {
    fn default() -> Self {
        Self {
            c: 2.0,
            max_iter: 100,
            initial_temperature: 2.0,
            initial_positions: None,
            random_seed: 0,
            rescale: true,
        }
    }
}

impl SpringOptions {
    pub(crate) fn validate(&self, vertex_count: usize) -> Result<()> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(Error::invalid(format!("c must be positive, got {}", self.c)));
        }
        if self.max_iter == 0 {
            return Err(Error::invalid("max_iter must be at least 1"));
        }
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(Error::invalid(format!(
                "initial_temperature must be positive, got {}",
                self.initial_temperature
            )));
        }
        if let Some((x, y)) = &self.initial_positions {
            if x.len() != vertex_count || y.len() != vertex_count {
                return Err(Error::invalid(format!(
                    "initial positions have lengths ({}, {}), expected {vertex_count}",
                    x.len(),
                    y.len()
                )));
            }
            if x.iter().chain(y).any(|v| !v.is_finite()) {
                return Err(Error::invalid("initial positions must be finite"));
            }
        }
        Ok(())
    }
}

/// Where the spectral layout takes its per-edge weights from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeWeights {
    /// `1.0` for every edge.
    #[default]
    Uniform,
    /// [`LayoutGraph::edge_weights`].
    FromGraph,
    /// One weight per edge, in the graph's edge enumeration order.
    Explicit(Vec<f64>),
}

impl EdgeWeights {
    pub(crate) fn resolve<G: LayoutGraph + ?Sized>(&self, graph: &G) -> Vec<f64> {
        match self {
            Self::Uniform => vec![1.0; graph.edge_count()],
            Self::FromGraph => graph.edge_weights(),
            Self::Explicit(w) => w.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralOptions {
    pub weights: EdgeWeights,
    /// Graphs with at most this many vertices use the dense eigendecomposition.
    pub dense_threshold: usize,
    /// Lanczos basis size for the sparse path. Defaults to `max(7, floor(sqrt(N)))`.
    pub ncv: Option<usize>,
    /// Relative residual tolerance for sparse Ritz pairs.
    pub tolerance: f64,
    pub max_restarts: usize,
    /// Seeds the sparse solver's start vector.
    pub random_seed: u64,
}

impl Default for SpectralOptions {
    fn default() -> Self {
        Self {
            weights: EdgeWeights::Uniform,
            dense_threshold: 500,
            ncv: None,
            tolerance: 1e-10,
            max_restarts: 1000,
            random_seed: 0,
        }
    }
}
