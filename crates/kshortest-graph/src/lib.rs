#![forbid(unsafe_code)]

//! Graph container APIs used by `kshortest`.
//!
//! [`Graph`] is a directed graph with dense integer vertex ids and non-negative edge weights.
//! [`WorkingGraph`] is a cheap, borrowing view over a `Graph` that can hide vertices and edges
//! without touching the underlying graph; both implement [`GraphView`].

pub mod error;
pub mod graph;
pub mod io;
mod view;
mod working;

pub use error::{Error, Result};
pub use graph::{EdgeKey, Graph};
pub use view::GraphView;
pub use working::WorkingGraph;

pub type VertexId = usize;
pub type Weight = f64;

/// Weight reported for a missing (or hidden) edge and for unreachable vertices.
pub const DISCONNECTED: Weight = f64::INFINITY;
