//! Yen's K shortest loopless paths.
//!
//! Paths are produced lazily, lightest first. Each emitted path is used to derive new candidates
//! by deviating from it at every vertex from its own deviation vertex onward. The suffix for a
//! deviation is read off a reverse shortest-path tree rooted at the target: the tree is built
//! once per emitted path on a graph with the whole path hidden, then repaired incrementally while
//! the path's vertices are restored one by one from the back.

use crate::Path;
use crate::dijkstra::ShortestPathEngine;
use crate::graph::{Graph, Result, VertexId, Weight, WorkingGraph};
use crate::queue::PathCandidateQueue;
use rustc_hash::FxBuildHasher;
use std::hash::BuildHasher;
use std::iter::FusedIterator;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchState {
    /// No source/target pair has been seeded.
    #[default]
    Uninitialized,
    /// The first shortest path is queued; nothing has been emitted yet.
    Seeded,
    /// At least one path has been emitted and candidates remain.
    Iterating,
    /// Every loopless path has been emitted (or none exists).
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct YenKShortestPaths<'g> {
    graph: WorkingGraph<'g>,
    endpoints: Option<(VertexId, VertexId)>,

    results: Vec<Path>,
    candidates: PathCandidateQueue,
    // Every candidate ever generated, mapped to the vertex where it leaves the path it was
    // derived from.
    deviations: HashMap<Path, VertexId>,
    generated: usize,

    state: SearchState,
}

impl<'g> YenKShortestPaths<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph: WorkingGraph::new(graph),
            endpoints: None,
            results: Vec::new(),
            candidates: PathCandidateQueue::new(),
            deviations: HashMap::default(),
            generated: 0,
            state: SearchState::Uninitialized,
        }
    }

    /// Creates a search already seeded for `source -> target`.
    pub fn with_endpoints(graph: &'g Graph, source: VertexId, target: VertexId) -> Result<Self> {
        let mut search = Self::new(graph);
        search.seed(source, target)?;
        Ok(search)
    }

    /// Drops all search state, including the endpoints.
    pub fn clear(&mut self) {
        self.graph.restore_all();
        self.endpoints = None;
        self.results.clear();
        self.candidates.clear();
        self.deviations.clear();
        self.generated = 0;
        self.state = SearchState::Uninitialized;
    }

    /// Resets the search and queues the shortest `source -> target` path as the first candidate.
    pub fn seed(&mut self, source: VertexId, target: VertexId) -> Result<()> {
        self.clear();
        let first = self.shortest_path(source, target)?;
        self.endpoints = Some((source, target));

        if first.is_empty() {
            self.state = SearchState::Exhausted;
        } else {
            self.deviations.insert(first.clone(), source);
            self.candidates.push(first);
            self.state = SearchState::Seeded;
        }
        tracing::debug!(
            source,
            target,
            reachable = self.state == SearchState::Seeded,
            "seeded k-shortest-paths search"
        );
        Ok(())
    }

    /// Plain Dijkstra over the (unreduced) working graph.
    pub fn shortest_path(&self, source: VertexId, target: VertexId) -> Result<Path> {
        ShortestPathEngine::new().shortest_path(&self.graph, source, target)
    }

    pub fn has_next(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// Emits the next shortest path, or `None` once every loopless path has been produced.
    pub fn next_path(&mut self) -> Option<Path> {
        let Some(current) = self.candidates.pop_min() else {
            if self.state != SearchState::Uninitialized {
                self.state = SearchState::Exhausted;
            }
            return None;
        };
        let Some((source, target)) = self.endpoints else {
            debug_assert!(false, "candidates queued without endpoints");
            return None;
        };

        self.state = SearchState::Iterating;
        self.results.push(current.clone());

        let deviation = self.deviations.get(&current).copied().unwrap_or(source);
        self.exclude_explored_deviations(&current, deviation);
        self.generate_candidates(&current, deviation, target);
        self.graph.restore_all();

        if self.candidates.is_empty() {
            self.state = SearchState::Exhausted;
        }
        tracing::debug!(
            rank = self.results.len(),
            weight = current.weight(),
            deviation,
            pending = self.candidates.len(),
            "emitted path"
        );
        Some(current)
    }

    /// Seeds `source -> target` and collects up to `k` paths.
    pub fn shortest_paths(
        &mut self,
        source: VertexId,
        target: VertexId,
        k: usize,
    ) -> Result<&[Path]> {
        self.seed(source, target)?;
        while self.results.len() < k && self.next_path().is_some() {}
        Ok(&self.results)
    }

    /// Paths emitted so far, in emission order.
    pub fn results(&self) -> &[Path] {
        &self.results
    }

    /// Number of distinct candidates generated since the last seed (emitted ones included).
    pub fn candidate_count(&self) -> usize {
        self.deviations.len()
    }

    /// Number of deviation suffixes found since the last seed, duplicates included.
    pub fn generated_path_count(&self) -> usize {
        self.generated
    }

    pub fn pending_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn endpoints(&self) -> Option<(VertexId, VertexId)> {
        self.endpoints
    }

    pub fn working_graph(&self) -> &WorkingGraph<'g> {
        &self.graph
    }

    /// Hides the first edge every earlier result took out of `deviation`, for each earlier
    /// result that reaches `deviation` through exactly the same prefix as `current`.
    fn exclude_explored_deviations(&mut self, current: &Path, deviation: VertexId) {
        let Some(dev_pos) = current.position(deviation) else {
            debug_assert!(false, "deviation vertex {deviation} is not on {current}");
            return;
        };
        let prefix = &current.vertices()[..dev_pos];
        let prefix_hash = hash_prefix(prefix);

        let earlier = &self.results[..self.results.len().saturating_sub(1)];
        for result in earlier {
            let Some(pos) = result.position(deviation) else {
                continue;
            };
            let other = &result.vertices()[..pos];
            if hash_prefix(other) != prefix_hash || other != prefix {
                continue;
            }
            if let Some(&next) = result.vertices().get(pos + 1) {
                self.graph.delete_edge(deviation, next);
            }
        }
    }

    fn generate_candidates(&mut self, current: &Path, deviation: VertexId, target: VertexId) {
        let vertices = current.vertices();
        if vertices.len() < 2 {
            return;
        }

        for (from, to) in current.edges() {
            self.graph.delete_vertex(from);
            self.graph.delete_edge(from, to);
        }

        let mut tree = ShortestPathEngine::new();
        if let Err(err) = tree.reverse_shortest_path_tree(&self.graph, target) {
            debug_assert!(false, "reverse tree at seeded target failed: {err}");
            return;
        }

        for i in (0..vertices.len() - 1).rev() {
            let vertex = vertices[i];
            self.graph.restore_vertex(vertex);

            if let Some(suffix) = tree.repair_forward(&self.graph, vertex) {
                self.generated += 1;
                tree.repair_backward(&self.graph, vertex);

                let root_weight: Weight = vertices[..=i]
                    .windows(2)
                    .map(|pair| self.graph.base_edge_weight(pair[0], pair[1]))
                    .sum();
                let mut spliced = Vec::with_capacity(i + suffix.len());
                spliced.extend_from_slice(&vertices[..i]);
                spliced.extend_from_slice(suffix.vertices());
                let candidate = Path::new(spliced, root_weight + suffix.weight());

                if !self.deviations.contains_key(&candidate) {
                    tracing::trace!(%candidate, deviation = vertex, "queued candidate");
                    self.deviations.insert(candidate.clone(), vertex);
                    self.candidates.push(candidate);
                }
            }

            let next = vertices[i + 1];
            self.graph.restore_edge(vertex, next);
            tree.repair_edge(&self.graph, vertex, next);

            if vertex == deviation {
                break;
            }
        }
    }
}

impl Iterator for YenKShortestPaths<'_> {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        self.next_path()
    }
}

impl FusedIterator for YenKShortestPaths<'_> {}

fn hash_prefix(prefix: &[VertexId]) -> u64 {
    FxBuildHasher.hash_one(prefix)
}
