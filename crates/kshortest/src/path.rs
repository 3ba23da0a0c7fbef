//! Weighted vertex sequences.

use crate::graph::{DISCONNECTED, VertexId, Weight};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A path through the graph together with its total weight.
///
/// Identity is the vertex sequence alone: two paths over the same vertices compare equal (and
/// hash equal) regardless of the weight they carry. A path with no vertices means "no path".
#[derive(Debug, Clone, Serialize)]
pub struct Path {
    vertices: Vec<VertexId>,
    weight: Weight,
}

impl Path {
    pub fn new(vertices: Vec<VertexId>, weight: Weight) -> Self {
        Self { vertices, weight }
    }

    /// The "no path found" value.
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            weight: DISCONNECTED,
        }
    }

    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<VertexId> {
        self.vertices
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn set_weight(&mut self, weight: Weight) {
        self.weight = weight;
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of vertices (not edges) on the path.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn source(&self) -> Option<VertexId> {
        self.vertices.first().copied()
    }

    pub fn target(&self) -> Option<VertexId> {
        self.vertices.last().copied()
    }

    pub fn position(&self, v: VertexId) -> Option<usize> {
        self.vertices.iter().position(|&x| x == v)
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }

    /// Consecutive vertex pairs, i.e. the edges the path uses.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.vertices.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.vertices.hash(state);
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{}", self.vertices, self.weight)
    }
}
