#![forbid(unsafe_code)]

//! K shortest loopless paths in directed, non-negatively weighted graphs.
//!
//! The entry point is [`YenKShortestPaths`], which emits paths between a fixed source and target
//! in order of non-decreasing weight:
//!
//! ```
//! use kshortest::YenKShortestPaths;
//! use kshortest::graph::io::parse_graph;
//!
//! let g = parse_graph("4\n0 1 1\n1 3 1\n0 2 1\n2 3 2\n0 3 5\n").unwrap();
//! let mut search = YenKShortestPaths::with_endpoints(&g, 0, 3).unwrap();
//!
//! let weights: Vec<f64> = search.by_ref().map(|p| p.weight()).collect();
//! assert_eq!(weights, vec![2.0, 3.0, 5.0]);
//! assert!(!search.has_next());
//! ```
//!
//! The graph types live in [`graph`] (re-exported from `kshortest-graph`).

pub use kshortest_graph as graph;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod dijkstra;
pub mod path;
pub mod queue;
pub mod yen;

pub use dijkstra::{ShortestPathEngine, TreeDirection};
pub use graph::{DISCONNECTED, Error, Graph, Result, VertexId, Weight, WorkingGraph};
pub use path::Path;
pub use queue::PathCandidateQueue;
pub use yen::{SearchState, YenKShortestPaths};
