//! Soft-delete view over a [`Graph`].
//!
//! A `WorkingGraph` borrows its base graph and keeps its own sets of deleted vertices and edges.
//! Every query filters through those sets, so a search can shrink and regrow the graph as often
//! as it likes while the base graph stays untouched and shareable.

use crate::graph::EdgeKey;
use crate::{DISCONNECTED, Graph, VertexId, Weight};
use rustc_hash::FxBuildHasher;

type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

#[derive(Debug, Clone)]
pub struct WorkingGraph<'g> {
    base: &'g Graph,
    deleted_vertices: HashSet<VertexId>,
    deleted_edges: HashSet<EdgeKey>,
}

impl<'g> WorkingGraph<'g> {
    pub fn new(base: &'g Graph) -> Self {
        Self {
            base,
            deleted_vertices: HashSet::default(),
            deleted_edges: HashSet::default(),
        }
    }

    pub fn base(&self) -> &'g Graph {
        self.base
    }

    pub fn delete_vertex(&mut self, id: VertexId) {
        self.deleted_vertices.insert(id);
    }

    pub fn delete_vertices(&mut self, ids: impl IntoIterator<Item = VertexId>) {
        self.deleted_vertices.extend(ids);
    }

    pub fn delete_edge(&mut self, from: VertexId, to: VertexId) {
        self.deleted_edges.insert(EdgeKey::new(from, to));
    }

    pub fn delete_edges(&mut self, edges: impl IntoIterator<Item = EdgeKey>) {
        self.deleted_edges.extend(edges);
    }

    pub fn restore_vertex(&mut self, id: VertexId) {
        self.deleted_vertices.remove(&id);
    }

    pub fn restore_edge(&mut self, from: VertexId, to: VertexId) {
        self.deleted_edges.remove(&EdgeKey::new(from, to));
    }

    pub fn restore_all_vertices(&mut self) {
        self.deleted_vertices.clear();
    }

    pub fn restore_all_edges(&mut self) {
        self.deleted_edges.clear();
    }

    pub fn restore_all(&mut self) {
        self.restore_all_edges();
        self.restore_all_vertices();
    }

    pub fn is_vertex_deleted(&self, id: VertexId) -> bool {
        self.deleted_vertices.contains(&id)
    }

    pub fn is_edge_deleted(&self, from: VertexId, to: VertexId) -> bool {
        self.deleted_edges.contains(&EdgeKey::new(from, to))
    }

    pub fn deleted_vertex_count(&self) -> usize {
        self.deleted_vertices.len()
    }

    pub fn deleted_edge_count(&self) -> usize {
        self.deleted_edges.len()
    }

    /// `Some(id)` if `id` is a base vertex that is not currently deleted.
    pub fn vertex(&self, id: VertexId) -> Option<VertexId> {
        self.base
            .vertex(id)
            .filter(|id| !self.deleted_vertices.contains(id))
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.base
            .vertices()
            .filter(|id| !self.deleted_vertices.contains(id))
    }

    pub fn adjacent_vertices(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        let outs = if self.is_vertex_deleted(v) {
            &[][..]
        } else {
            self.base.adjacent_vertices(v)
        };
        outs.iter().copied().filter(move |&w| {
            !self.deleted_vertices.contains(&w) && !self.deleted_edges.contains(&EdgeKey::new(v, w))
        })
    }

    pub fn precedent_vertices(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        let ins = if self.is_vertex_deleted(v) {
            &[][..]
        } else {
            self.base.precedent_vertices(v)
        };
        ins.iter().copied().filter(move |&u| {
            !self.deleted_vertices.contains(&u) && !self.deleted_edges.contains(&EdgeKey::new(u, v))
        })
    }

    /// Weight of `from -> to` as seen through the deletions.
    pub fn edge_weight(&self, from: VertexId, to: VertexId) -> Weight {
        if self.deleted_vertices.contains(&from)
            || self.deleted_vertices.contains(&to)
            || self.deleted_edges.contains(&EdgeKey::new(from, to))
        {
            return DISCONNECTED;
        }
        self.base.edge_weight(from, to)
    }

    /// Weight of `from -> to` in the base graph, ignoring any deletion.
    pub fn base_edge_weight(&self, from: VertexId, to: VertexId) -> Weight {
        self.base.edge_weight(from, to)
    }
}
