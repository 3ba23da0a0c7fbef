use crate::{VertexId, Weight};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("vertex {id} does not exist in a graph with {vertex_count} vertices")]
    UnknownVertex { id: VertexId, vertex_count: usize },

    #[error("self-loop on vertex {id} is not allowed")]
    SelfLoop { id: VertexId },

    #[error("edge {from} -> {to} has invalid weight {weight} (expected a finite, non-negative number)")]
    InvalidWeight {
        from: VertexId,
        to: VertexId,
        weight: Weight,
    },

    #[error("graph parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Malformed input from the caller (bad ids, self-loops, bad weights), as opposed to
    /// failures while reading or writing graph files.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::UnknownVertex { .. } | Error::SelfLoop { .. } | Error::InvalidWeight { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
