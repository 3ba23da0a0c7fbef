//! Edge key type.
//!
//! Edges are identified by their ordered endpoint pair; parallel edges are not representable.

use crate::VertexId;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub from: VertexId,
    pub to: VertexId,
}

impl EdgeKey {
    pub fn new(from: VertexId, to: VertexId) -> Self {
        Self { from, to }
    }
}

impl From<(VertexId, VertexId)> for EdgeKey {
    fn from((from, to): (VertexId, VertexId)) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
