use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

mod adapter;
pub mod sparse;

pub use sparse::CsrMatrix;

/// Read-only view of a graph, as consumed by every layout in this crate.
///
/// Vertices are identified by their zero-based index in `0..vertex_count()`. Edges are enumerated
/// in a stable order; explicit per-edge weights are matched against that order.
pub trait LayoutGraph {
    fn vertex_count(&self) -> usize;

    fn is_directed(&self) -> bool;

    /// `(source, target)` pairs in enumeration order.
    fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_;

    fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Weights carried by the graph itself, one per enumerated edge.
    ///
    /// Representations without weights report `1.0` for every edge.
    fn edge_weights(&self) -> Vec<f64> {
        vec![1.0; self.edge_count()]
    }

    /// Unweighted, symmetrized adjacency matrix (parallel edges accumulate).
    fn adjacency_matrix(&self) -> Result<DMatrix<f64>> {
        let n = check_graph(self)?;
        let mut a = DMatrix::<f64>::zeros(n, n);
        for (s, t) in self.edges() {
            if s == t {
                continue;
            }
            a[(s, t)] += 1.0;
            a[(t, s)] += 1.0;
        }
        Ok(a)
    }

    /// Dense Laplacian `D - A` of the weighted, symmetrized adjacency matrix.
    ///
    /// Self-loops cancel out of `D - A` and are skipped.
    fn laplacian_matrix(&self, weights: &[f64]) -> Result<DMatrix<f64>> {
        let n = check_graph(self)?;
        check_weights(self, weights)?;
        let mut l = DMatrix::<f64>::zeros(n, n);
        for ((s, t), &w) in self.edges().zip(weights) {
            if s == t {
                continue;
            }
            l[(s, t)] -= w;
            l[(t, s)] -= w;
            l[(s, s)] += w;
            l[(t, t)] += w;
        }
        Ok(l)
    }

    /// Sparse weighted adjacency matrix, symmetrized, built straight from the edge list.
    fn sparse_edge_weights(&self, weights: &[f64]) -> Result<CsrMatrix> {
        let n = check_graph(self)?;
        check_weights(self, weights)?;
        let triplets = self
            .edges()
            .zip(weights.iter().copied())
            .filter(|((s, t), _)| s != t)
            .flat_map(|((s, t), w)| [(s, t, w), (t, s, w)]);
        Ok(CsrMatrix::from_triplets(n, triplets))
    }
}

/// Rejects empty graphs and edges whose endpoints fall outside `0..vertex_count()`.
pub(crate) fn check_graph<G: LayoutGraph + ?Sized>(graph: &G) -> Result<usize> {
    let n = graph.vertex_count();
    if n == 0 {
        return Err(Error::invalid("graph has no vertices"));
    }
    for (idx, (s, t)) in graph.edges().enumerate() {
        if s >= n || t >= n {
            return Err(Error::invalid(format!(
                "edge {idx} ({s}, {t}) references a vertex outside 0..{n}"
            )));
        }
    }
    Ok(n)
}

fn check_weights<G: LayoutGraph + ?Sized>(graph: &G, weights: &[f64]) -> Result<()> {
    let m = graph.edge_count();
    if weights.len() != m {
        return Err(Error::invalid(format!(
            "expected {m} edge weights, got {}",
            weights.len()
        )));
    }
    if let Some(idx) = weights.iter().position(|w| !w.is_finite()) {
        return Err(Error::invalid(format!("edge weight {idx} is not finite")));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// Owned edge-list graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub vertex_count: usize,
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub directed: bool,
}

impl Graph {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: Vec::new(),
            directed: false,
        }
    }

    pub fn directed(vertex_count: usize) -> Self {
        Self {
            directed: true,
            ..Self::new(vertex_count)
        }
    }

    /// Builds an undirected graph with unit weights.
    pub fn from_edges(vertex_count: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut g = Self::new(vertex_count);
        for (s, t) in edges {
            g.add_edge(s, t);
        }
        g
    }

    pub fn add_edge(&mut self, source: usize, target: usize) -> &mut Self {
        self.add_weighted_edge(source, target, 1.0)
    }

    pub fn add_weighted_edge(&mut self, source: usize, target: usize, weight: f64) -> &mut Self {
        self.edges.push(Edge {
            source,
            target,
            weight,
        });
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_graph(self).map(|_| ())
    }
}

impl LayoutGraph for Graph {
    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().map(|e| (e.source, e.target))
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn edge_weights(&self) -> Vec<f64> {
        self.edges.iter().map(|e| e.weight).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Two index-aligned coordinate sequences, one entry per vertex.
///
/// Layouts returned by this crate always have `x.len() == y.len()`. Accessors on a hand-built
/// layout with mismatched lengths only see the first `min(x.len(), y.len())` vertices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Layout {
    pub(crate) fn zeros(n: usize) -> Self {
        Self {
            x: vec![0.0; n],
            y: vec![0.0; n],
        }
    }

    /// The single-vertex layout `(0.0, 0.0)`.
    pub(crate) fn origin() -> Self {
        Self::zeros(1)
    }

    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn point(&self, idx: usize) -> Option<Point> {
        Some(Point {
            x: *self.x.get(idx)?,
            y: *self.y.get(idx)?,
        })
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .map(|(&x, &y)| Point { x, y })
    }

    /// Euclidean distance between every pair of vertices as an `n x n` matrix.
    ///
    /// Two layouts with equal distance matrices are congruent.
    pub fn pairwise_distances(&self) -> DMatrix<f64> {
        let n = self.len();
        DMatrix::<f64>::from_fn(n, n, |i, j| {
            let dx = self.x[j] - self.x[i];
            let dy = self.y[j] - self.y[i];
            (dx * dx + dy * dy).sqrt()
        })
    }

    pub(crate) fn ensure_finite(&self, algorithm: &str) -> Result<()> {
        match self.points().position(|p| !(p.x.is_finite() && p.y.is_finite())) {
            Some(idx) => Err(Error::NumericalDegeneracy(format!(
                "{algorithm} produced a non-finite coordinate for vertex {idx}"
            ))),
            None => Ok(()),
        }
    }
}
