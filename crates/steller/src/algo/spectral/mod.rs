//! Spectral layout: vertices are placed by the Laplacian eigenvectors of the second and third
//! smallest eigenvalues.
//!
//! Small graphs take a dense, exact eigendecomposition. Larger graphs build a sparse Laplacian
//! straight from the edge list and extract only the three smallest eigenpairs with a restarted
//! Lanczos solver.
//!
//! Coordinates are the raw eigenvector components; no rescaling is applied. A disconnected graph
//! has a repeated zero eigenvalue, so the embedding is degenerate (components collapse onto
//! arbitrary combinations of their indicator vectors).

mod lanczos;

use nalgebra::{DVector, SymmetricEigen};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::algo::SpectralOptions;
use crate::error::{Error, Result};
use crate::graph::{Layout, LayoutGraph, check_graph};

pub use lanczos::{Eigenpairs, LanczosOptions, smallest_eigenpairs};

/// Number of eigenpairs a spectral embedding needs: the trivial one plus two coordinates.
const EMBEDDING_EIGENPAIRS: usize = 3;

/// Smallest Lanczos basis the sparse path will use.
const MIN_NCV: usize = 7;

pub fn spectral_layout<G>(graph: &G, opts: &SpectralOptions) -> Result<Layout>
where
    G: LayoutGraph + ?Sized,
{
    let n = check_graph(graph)?;
    let weights = opts.weights.resolve(graph);
    if n == 1 {
        // Still reject malformed weights for consistency with larger graphs.
        graph.laplacian_matrix(&weights)?;
        return Ok(Layout::origin());
    }

    let pairs = if n <= opts.dense_threshold {
        tracing::debug!(vertices = n, "spectral layout: dense eigendecomposition");
        dense_eigenpairs(graph, &weights)?
    } else {
        let ncv = opts.ncv.unwrap_or_else(|| default_ncv(n));
        tracing::debug!(vertices = n, ncv, "spectral layout: sparse Lanczos");
        let laplacian = graph.sparse_edge_weights(&weights)?.laplacian();
        let mut rng = StdRng::seed_from_u64(opts.random_seed);
        smallest_eigenpairs(
            &laplacian,
            &LanczosOptions {
                nev: EMBEDDING_EIGENPAIRS.min(n),
                ncv,
                tolerance: opts.tolerance,
                max_restarts: opts.max_restarts,
            },
            &mut rng,
        )?
    };

    let layout = embedding_from(&pairs, n)?;
    layout.ensure_finite("spectral layout")?;
    Ok(layout)
}

/// `max(7, floor(sqrt(N)))`.
pub fn default_ncv(n: usize) -> usize {
    n.isqrt().max(MIN_NCV)
}

fn dense_eigenpairs<G: LayoutGraph + ?Sized>(graph: &G, weights: &[f64]) -> Result<Eigenpairs> {
    let laplacian = graph.laplacian_matrix(weights)?;
    let eigen = SymmetricEigen::new(laplacian);

    let mut order: Vec<usize> = (0..eigen.eigenvalues.len()).collect();
    order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));
    order.truncate(EMBEDDING_EIGENPAIRS);

    Ok(Eigenpairs {
        values: order.iter().map(|&i| eigen.eigenvalues[i]).collect(),
        vectors: order
            .iter()
            .map(|&i| eigen.eigenvectors.column(i).into_owned())
            .collect(),
    })
}

/// x from the second smallest eigenpair, y from the third. A two-vertex graph has no third
/// eigenpair and is laid out on the x axis.
fn embedding_from(pairs: &Eigenpairs, n: usize) -> Result<Layout> {
    let column = |idx: usize| -> Option<Vec<f64>> {
        pairs
            .vectors
            .get(idx)
            .map(|v: &DVector<f64>| v.iter().copied().collect())
    };
    let x = column(1).ok_or_else(|| {
        Error::NumericalDegeneracy(format!(
            "expected at least 2 eigenpairs for {n} vertices, got {}",
            pairs.vectors.len()
        ))
    })?;
    let y = column(2).unwrap_or_else(|| vec![0.0; n]);
    Ok(Layout { x, y })
}

#[cfg(test)]
mod tests {
    use super::default_ncv;

    #[test]
    fn ncv_has_a_floor_of_seven() {
        assert_eq!(default_ncv(10), 7);
        assert_eq!(default_ncv(501), 22);
        assert_eq!(default_ncv(10_000), 100);
    }
}
