//! Plain-text graph format.
//!
//! ```text
//! 4
//!
//! 0 1 1.5
//! 1 3 2
//! 0 2 0.5
//! ```
//!
//! The first non-blank line is the vertex count `n` (vertices are `0..n`). Every following
//! non-blank line is one edge `from to weight`, whitespace separated. Tokens after the weight are
//! ignored. Export writes the count, a blank line, then one tab-separated edge per line.

use crate::error::{Error, Result};
use crate::{Graph, VertexId, Weight};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

pub fn parse_graph(text: &str) -> Result<Graph> {
    read_graph(text.as_bytes())
}

pub fn read_graph<R: BufRead>(reader: R) -> Result<Graph> {
    let mut graph: Option<Graph> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match graph.as_mut() {
            None => {
                let n: usize = parse_field(Some(trimmed), "vertex count", line_no)?;
                graph = Some(Graph::with_vertices(n));
            }
            Some(g) => {
                let mut fields = trimmed.split_whitespace();
                let from: VertexId = parse_field(fields.next(), "source vertex", line_no)?;
                let to: VertexId = parse_field(fields.next(), "target vertex", line_no)?;
                let weight: Weight = parse_field(fields.next(), "edge weight", line_no)?;
                g.add_edge(from, to, weight)?;
            }
        }
    }

    let graph = graph.unwrap_or_default();
    tracing::debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "read graph"
    );
    Ok(graph)
}

fn parse_field<T>(field: Option<&str>, what: &str, line: usize) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = field else {
        return Err(Error::Parse {
            line,
            message: format!("missing {what}"),
        });
    };
    raw.parse::<T>().map_err(|err| Error::Parse {
        line,
        message: format!("invalid {what} `{raw}`: {err}"),
    })
}

pub fn write_graph<W: Write>(graph: &Graph, mut writer: W) -> Result<()> {
    writeln!(writer, "{}", graph.vertex_count())?;
    writeln!(writer)?;
    for (key, weight) in graph.edges() {
        writeln!(writer, "{}\t{}\t{}", key.from, key.to, weight)?;
    }
    writer.flush()?;
    Ok(())
}

impl Graph {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        read_graph(BufReader::new(file))
    }

    /// Replaces the contents of `self` with the graph stored at `path`.
    ///
    /// The graph is cleared first, so a failed import leaves it empty rather than half-loaded.
    pub fn import_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.clear();
        *self = Self::from_file(path)?;
        Ok(())
    }

    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        write_graph(self, BufWriter::new(file))
    }
}
