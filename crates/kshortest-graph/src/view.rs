//! Read-only query surface shared by [`Graph`] and [`WorkingGraph`].

use crate::{Graph, VertexId, Weight, WorkingGraph};

/// The queries a shortest-path search needs from a graph.
///
/// Ids are always interpreted against the full id space `0..vertex_count()`; a view may hide
/// some of them (soft deletion), in which case they simply have no neighbors and every edge
/// touching them reports [`DISCONNECTED`](crate::DISCONNECTED).
pub trait GraphView {
    fn vertex_count(&self) -> usize;

    fn contains_vertex(&self, id: VertexId) -> bool {
        id < self.vertex_count()
    }

    fn adjacent_vertices(&self, v: VertexId) -> impl Iterator<Item = VertexId>;

    fn precedent_vertices(&self, v: VertexId) -> impl Iterator<Item = VertexId>;

    fn edge_weight(&self, from: VertexId, to: VertexId) -> Weight;
}

impl GraphView for Graph {
    fn vertex_count(&self) -> usize {
        Graph::vertex_count(self)
    }

    fn adjacent_vertices(&self, v: VertexId) -> impl Iterator<Item = VertexId> {
        Graph::adjacent_vertices(self, v).iter().copied()
    }

    fn precedent_vertices(&self, v: VertexId) -> impl Iterator<Item = VertexId> {
        Graph::precedent_vertices(self, v).iter().copied()
    }

    fn edge_weight(&self, from: VertexId, to: VertexId) -> Weight {
        Graph::edge_weight(self, from, to)
    }
}

impl GraphView for WorkingGraph<'_> {
    fn vertex_count(&self) -> usize {
        self.base().vertex_count()
    }

    fn adjacent_vertices(&self, v: VertexId) -> impl Iterator<Item = VertexId> {
        WorkingGraph::adjacent_vertices(self, v)
    }

    fn precedent_vertices(&self, v: VertexId) -> impl Iterator<Item = VertexId> {
        WorkingGraph::precedent_vertices(self, v)
    }

    fn edge_weight(&self, from: VertexId, to: VertexId) -> Weight {
        WorkingGraph::edge_weight(self, from, to)
    }
}
