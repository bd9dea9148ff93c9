use petgraph::EdgeType;
use petgraph::graph::IndexType;

use super::LayoutGraph;

// Vertex indices are petgraph's dense node indices; edge order is petgraph's edge index order.
impl<N, E, Ty, Ix> LayoutGraph for petgraph::Graph<N, E, Ty, Ix>
where
    Ty: EdgeType,
    Ix: IndexType,
{
    fn vertex_count(&self) -> usize {
        self.node_count()
    }

    fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.raw_edges()
            .iter()
            .map(|e| (e.source().index(), e.target().index()))
    }

    fn edge_count(&self) -> usize {
        petgraph::Graph::edge_count(self)
    }
}
