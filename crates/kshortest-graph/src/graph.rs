//! Weighted directed graph container.
//!
//! Vertices are dense ids `0..n` handed out by the graph itself. Adjacency is stored as
//! per-vertex vectors (fan-out and fan-in, in first-insertion order) and edge weights live in a
//! hash index keyed by the ordered endpoint pair. Once built, a `Graph` is only read; searches
//! layer a [`WorkingGraph`](crate::WorkingGraph) on top of it instead of mutating it.

mod edge_key;

pub use edge_key::EdgeKey;

use crate::error::{Error, Result};
use crate::{DISCONNECTED, VertexId, Weight};
use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone, Default)]
pub struct Graph {
    // Id of the next vertex created by `add_vertex`. Ids are never reused until `clear`.
    next_vertex_id: VertexId,

    fan_out: Vec<Vec<VertexId>>,
    fan_in: Vec<Vec<VertexId>>,

    weights: HashMap<EdgeKey, Weight>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with vertices `0..vertex_count` and no edges.
    pub fn with_vertices(vertex_count: usize) -> Self {
        let mut g = Self::new();
        for _ in 0..vertex_count {
            g.add_vertex();
        }
        g
    }

    pub fn add_vertex(&mut self) -> VertexId {
        let id = self.next_vertex_id;
        self.next_vertex_id += 1;
        self.fan_out.push(Vec::new());
        self.fan_in.push(Vec::new());
        id
    }

    /// Removes every vertex and edge and restarts vertex numbering at `0`.
    pub fn clear(&mut self) {
        self.next_vertex_id = 0;
        self.fan_out.clear();
        self.fan_in.clear();
        self.weights.clear();
    }

    /// Inserts the edge `from -> to`.
    ///
    /// Adding an edge that already exists replaces its weight; the graph never holds parallel
    /// edges.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: Weight) -> Result<()> {
        for id in [from, to] {
            if !self.contains_vertex(id) {
                return Err(Error::UnknownVertex {
                    id,
                    vertex_count: self.vertex_count(),
                });
            }
        }
        if from == to {
            return Err(Error::SelfLoop { id: from });
        }
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(Error::InvalidWeight { from, to, weight });
        }

        let key = EdgeKey::new(from, to);
        if self.weights.insert(key, weight).is_none() {
            self.fan_out[from].push(to);
            self.fan_in[to].push(from);
        }
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.next_vertex_id
    }

    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.next_vertex_id == 0
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        id < self.next_vertex_id
    }

    pub fn vertex(&self, id: VertexId) -> Option<VertexId> {
        self.contains_vertex(id).then_some(id)
    }

    pub fn vertices(&self) -> std::ops::Range<VertexId> {
        0..self.next_vertex_id
    }

    pub fn has_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.weights.contains_key(&EdgeKey::new(from, to))
    }

    /// Successors of `v`. Unknown vertices have none.
    pub fn adjacent_vertices(&self, v: VertexId) -> &[VertexId] {
        self.fan_out.get(v).map(Vec::as_slice).unwrap_or_default()
    }

    /// Predecessors of `v`. Unknown vertices have none.
    pub fn precedent_vertices(&self, v: VertexId) -> &[VertexId] {
        self.fan_in.get(v).map(Vec::as_slice).unwrap_or_default()
    }

    /// Weight of `from -> to`, or [`DISCONNECTED`] when there is no such edge.
    pub fn edge_weight(&self, from: VertexId, to: VertexId) -> Weight {
        self.weights
            .get(&EdgeKey::new(from, to))
            .copied()
            .unwrap_or(DISCONNECTED)
    }

    /// All edges, ordered by source id and then by insertion order within a source.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, Weight)> + '_ {
        self.fan_out.iter().enumerate().flat_map(move |(from, outs)| {
            outs.iter().map(move |&to| {
                let key = EdgeKey::new(from, to);
                (key, self.edge_weight(from, to))
            })
        })
    }
}
