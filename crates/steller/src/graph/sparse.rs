//! Compressed sparse-row matrices for the large-graph spectral path.

use nalgebra::DVector;

/// Square matrix in compressed sparse-row form.
///
/// Column indices within a row are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    dim: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl CsrMatrix {
    /// Builds a `dim x dim` matrix, summing duplicate `(row, col)` entries.
    ///
    /// Callers guarantee `row < dim` and `col < dim`.
    pub fn from_triplets(dim: usize, triplets: impl IntoIterator<Item = (usize, usize, f64)>) -> Self {
        let mut rows: Vec<Vec<(usize, f64)>> = vec![Vec::new(); dim];
        for (r, c, v) in triplets {
            rows[r].push((c, v));
        }

        let mut indptr = Vec::with_capacity(dim + 1);
        let mut indices = Vec::new();
        let mut values = Vec::new();
        indptr.push(0);
        for mut row in rows {
            row.sort_unstable_by_key(|&(c, _)| c);
            let mut last: Option<usize> = None;
            for (c, v) in row {
                if last == Some(c) {
                    if let Some(acc) = values.last_mut() {
                        *acc += v;
                    }
                    continue;
                }
                indices.push(c);
                values.push(v);
                last = Some(c);
            }
            indptr.push(indices.len());
        }

        Self {
            dim,
            indptr,
            indices,
            values,
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn row(&self, r: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let span = self.indptr[r]..self.indptr[r + 1];
        self.indices[span.clone()]
            .iter()
            .copied()
            .zip(self.values[span].iter().copied())
    }

    pub fn get(&self, r: usize, c: usize) -> f64 {
        let span = self.indptr[r]..self.indptr[r + 1];
        match self.indices[span.clone()].binary_search(&c) {
            Ok(pos) => self.values[span.start + pos],
            Err(_) => 0.0,
        }
    }

    /// Treats `self` as an adjacency matrix and returns `D - A`.
    ///
    /// Diagonal entries of `self` (self-loops) cancel and are ignored.
    pub fn laplacian(&self) -> Self {
        let mut indptr = Vec::with_capacity(self.dim + 1);
        let mut indices = Vec::with_capacity(self.nnz() + self.dim);
        let mut values = Vec::with_capacity(self.nnz() + self.dim);
        indptr.push(0);

        for r in 0..self.dim {
            let degree: f64 = self.row(r).filter(|&(c, _)| c != r).map(|(_, v)| v).sum();
            let mut diag_written = false;
            for (c, v) in self.row(r) {
                if c == r {
                    continue;
                }
                if !diag_written && c > r {
                    indices.push(r);
                    values.push(degree);
                    diag_written = true;
                }
                indices.push(c);
                values.push(-v);
            }
            if !diag_written {
                indices.push(r);
                values.push(degree);
            }
            indptr.push(indices.len());
        }

        Self {
            dim: self.dim,
            indptr,
            indices,
            values,
        }
    }

    pub fn mul_vec(&self, x: &DVector<f64>) -> DVector<f64> {
        DVector::<f64>::from_fn(self.dim, |r, _| self.row(r).map(|(c, v)| v * x[c]).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::CsrMatrix;
    use nalgebra::DVector;

    #[test]
    fn duplicate_triplets_are_summed() {
        let m = CsrMatrix::from_triplets(3, [(0, 1, 1.0), (0, 1, 2.5), (2, 0, 4.0)]);
        assert_eq!(m.nnz(), 2);
        assert_eq!(m.get(0, 1), 3.5);
        assert_eq!(m.get(2, 0), 4.0);
        assert_eq!(m.get(1, 1), 0.0);
    }

    #[test]
    fn laplacian_rows_sum_to_zero_and_drop_self_loops() {
        let a = CsrMatrix::from_triplets(
            3,
            [
                (0, 1, 2.0),
                (1, 0, 2.0),
                (1, 2, 1.0),
                (2, 1, 1.0),
                (2, 2, 7.0),
            ],
        );
        let l = a.laplacian();
        assert_eq!(l.get(0, 0), 2.0);
        assert_eq!(l.get(1, 1), 3.0);
        assert_eq!(l.get(2, 2), 1.0);
        assert_eq!(l.get(0, 1), -2.0);
        for r in 0..3 {
            let sum: f64 = l.row(r).map(|(_, v)| v).sum();
            assert_eq!(sum, 0.0, "row {r}");
        }
        let cols: Vec<usize> = l.row(1).map(|(c, _)| c).collect();
        assert_eq!(cols, vec![0, 1, 2]);
    }

    #[test]
    fn mul_vec_matches_dense_product() {
        let a = CsrMatrix::from_triplets(2, [(0, 0, 1.0), (0, 1, 2.0), (1, 0, 3.0)]);
        let y = a.mul_vec(&DVector::from_vec(vec![1.0, 10.0]));
        assert_eq!(y.as_slice(), &[21.0, 3.0]);
    }
}
