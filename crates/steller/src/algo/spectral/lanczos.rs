//! Thick-restart Lanczos for the smallest eigenpairs of a sparse symmetric matrix.
//!
//! The Krylov basis is kept fully reorthogonalized, so the projected matrix is formed directly as
//! `V^T (A V)` and diagonalized with `nalgebra`. On restart the best Ritz vectors are kept and the
//! basis is extended from the residual direction of the last Lanczos vector.

use nalgebra::{DMatrix, DVector, SymmetricEigen};
use rand::Rng;

use crate::error::{Error, Result};
use crate::graph::CsrMatrix;

/// Below this (relative) norm a new basis direction is treated as lying in the current span.
const BREAKDOWN_TOL: f64 = 1e-10;

/// Random directions tried before accepting that the basis spans everything reachable.
const MAX_REFILL_ATTEMPTS: usize = 4;

#[derive(Debug, Clone)]
pub struct LanczosOptions {
    /// Number of smallest eigenpairs wanted.
    pub nev: usize,
    /// Krylov basis size.
    pub ncv: usize,
    pub tolerance: f64,
    pub max_restarts: usize,
}

/// Eigenpairs sorted by ascending eigenvalue. Vectors have unit norm.
#[derive(Debug, Clone)]
pub struct Eigenpairs {
    pub values: Vec<f64>,
    pub vectors: Vec<DVector<f64>>,
}

pub fn smallest_eigenpairs<R: Rng>(
    matrix: &CsrMatrix,
    opts: &LanczosOptions,
    rng: &mut R,
) -> Result<Eigenpairs> {
    let n = matrix.dim();
    let nev = opts.nev;
    if nev == 0 || nev > n {
        return Err(Error::invalid(format!(
            "cannot extract {nev} eigenpairs from a {n}x{n} matrix"
        )));
    }
    if !(opts.tolerance.is_finite() && opts.tolerance > 0.0) {
        return Err(Error::invalid(format!(
            "solver tolerance must be positive, got {}",
            opts.tolerance
        )));
    }
    let ncv = opts.ncv.min(n);
    if ncv <= nev && ncv < n {
        return Err(Error::invalid(format!(
            "ncv ({}) must exceed the number of requested eigenpairs ({nev})",
            opts.ncv
        )));
    }
    // Ritz vectors carried over each restart.
    let keep = (nev + (ncv - nev) / 2).min(ncv - 1).max(nev);

    let mut basis: Vec<DVector<f64>> = Vec::with_capacity(ncv);
    let mut images: Vec<DVector<f64>> = Vec::with_capacity(ncv);
    let mut next = Some(random_unit(n, rng));
    let mut converged = 0;

    for restart in 0..=opts.max_restarts {
        extend_basis(matrix, &mut basis, &mut images, next.take(), ncv, rng);
        let m = basis.len();

        let projected = DMatrix::<f64>::from_fn(m, m, |i, j| {
            0.5 * (basis[i].dot(&images[j]) + basis[j].dot(&images[i]))
        });
        let eigen = SymmetricEigen::new(projected);
        let mut order: Vec<usize> = (0..m).collect();
        order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));

        let scale = eigen
            .eigenvalues
            .iter()
            .fold(1.0_f64, |acc, v| acc.max(v.abs()));
        let ritz = |k: usize| -> (f64, DVector<f64>, DVector<f64>) {
            let s = eigen.eigenvectors.column(order[k]);
            let mut y = DVector::<f64>::zeros(n);
            let mut ay = DVector::<f64>::zeros(n);
            for i in 0..m {
                y.axpy(s[i], &basis[i], 1.0);
                ay.axpy(s[i], &images[i], 1.0);
            }
            (eigen.eigenvalues[order[k]], y, ay)
        };

        let wanted: Vec<(f64, DVector<f64>, DVector<f64>)> = (0..nev).map(ritz).collect();
        converged = wanted
            .iter()
            .take_while(|(theta, y, ay)| (ay - y * *theta).norm() <= opts.tolerance * scale)
            .count();
        // A basis spanning the whole reachable space makes Rayleigh-Ritz exact.
        let exhausted = m < ncv || m == n;

        tracing::trace!(restart, basis = m, converged, "lanczos cycle");

        if converged == nev || exhausted {
            tracing::debug!(restarts = restart, nev, ncv, "lanczos converged");
            return Ok(Eigenpairs {
                values: wanted.iter().map(|(theta, _, _)| *theta).collect(),
                vectors: wanted.into_iter().map(|(_, y, _)| y).collect(),
            });
        }
        if restart == opts.max_restarts {
            break;
        }

        // Residual direction of the last Lanczos vector, orthogonal to the whole old basis.
        let mut residual = images[m - 1].clone();
        orthogonalize(&mut residual, &basis);
        next = Some(residual);

        let kept: Vec<(f64, DVector<f64>, DVector<f64>)> =
            wanted.into_iter().chain((nev..keep).map(ritz)).collect();
        basis.clear();
        images.clear();
        for (_, y, ay) in kept {
            basis.push(y);
            images.push(ay);
        }
    }

    Err(Error::SolverNonConvergence {
        converged,
        requested: nev,
        restarts: opts.max_restarts,
    })
}

/// Grows `basis` to `ncv` orthonormal vectors, recording `A v` for each in `images`.
///
/// Stops early only when no direction outside the current span can be found.
fn extend_basis<R: Rng>(
    matrix: &CsrMatrix,
    basis: &mut Vec<DVector<f64>>,
    images: &mut Vec<DVector<f64>>,
    mut candidate: Option<DVector<f64>>,
    ncv: usize,
    rng: &mut R,
) {
    let n = matrix.dim();
    while basis.len() < ncv {
        let Some(v) = next_direction(candidate.take(), basis, n, rng) else {
            return;
        };
        let av = matrix.mul_vec(&v);
        candidate = Some(av.clone());
        basis.push(v);
        images.push(av);
    }
}

fn next_direction<R: Rng>(
    candidate: Option<DVector<f64>>,
    basis: &[DVector<f64>],
    n: usize,
    rng: &mut R,
) -> Option<DVector<f64>> {
    if let Some(v) = candidate.and_then(|v| orthonormalized(v, basis)) {
        return Some(v);
    }
    (0..MAX_REFILL_ATTEMPTS).find_map(|_| orthonormalized(random_unit(n, rng), basis))
}

fn orthonormalized(mut v: DVector<f64>, basis: &[DVector<f64>]) -> Option<DVector<f64>> {
    let before = v.norm();
    if !(before.is_finite() && before > 0.0) {
        return None;
    }
    // Twice is enough (Kahan-Parlett).
    orthogonalize(&mut v, basis);
    orthogonalize(&mut v, basis);
    let after = v.norm();
    if after <= BREAKDOWN_TOL * before {
        return None;
    }
    Some(v / after)
}

fn orthogonalize(v: &mut DVector<f64>, basis: &[DVector<f64>]) {
    for b in basis {
        let proj = b.dot(v);
        v.axpy(-proj, b, 1.0);
    }
}

fn random_unit<R: Rng>(n: usize, rng: &mut R) -> DVector<f64> {
    let v = DVector::<f64>::from_fn(n, |_, _| rng.random_range(-1.0..1.0));
    let norm = v.norm();
    if norm > 0.0 { v / norm } else { v }
}
