//! Dijkstra shortest paths and shortest-path trees.
//!
//! All search state (tentative distances, tree parents, settled flags) lives in vectors indexed
//! by vertex id and owned by the engine, so independent searches never interfere with each other
//! even when they read the same graph. The graph is passed to every call instead of being held,
//! which lets a caller change a [`WorkingGraph`](crate::graph::WorkingGraph) between incremental
//! repairs of the same tree.

use crate::Path;
use crate::graph::{DISCONNECTED, Error, GraphView, Result, VertexId, Weight};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeDirection {
    /// Distances are measured from the root; a vertex's parent is its predecessor on the way
    /// from the root.
    Forward,
    /// Distances are measured to the root; a vertex's parent is the next hop toward the root.
    Reverse,
}

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    distance: Weight,
    seq: u64,
    vertex: VertexId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // `BinaryHeap` is a max-heap: the smaller distance, then the earlier push, ranks higher.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShortestPathEngine {
    distance: Vec<Weight>,
    parent: Vec<Option<VertexId>>,
    settled: Vec<bool>,
    heap: BinaryHeap<HeapEntry>,
    seq: u64,
    root: Option<(VertexId, TreeDirection)>,
}

impl ShortestPathEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.distance.clear();
        self.parent.clear();
        self.settled.clear();
        self.heap.clear();
        self.seq = 0;
        self.root = None;
    }

    /// Shortest path from `source` to `target`, or [`Path::empty`] if `target` is unreachable.
    ///
    /// Among equally short routes the one discovered first wins.
    pub fn shortest_path<G: GraphView>(
        &mut self,
        graph: &G,
        source: VertexId,
        target: VertexId,
    ) -> Result<Path> {
        check_vertex(graph, source)?;
        check_vertex(graph, target)?;
        self.run(graph, source, Some(target), TreeDirection::Forward);
        Ok(self.tree_path(target))
    }

    /// Full tree of shortest paths leaving `root`.
    pub fn shortest_path_tree<G: GraphView>(&mut self, graph: &G, root: VertexId) -> Result<()> {
        check_vertex(graph, root)?;
        self.run(graph, root, None, TreeDirection::Forward);
        Ok(())
    }

    /// Full tree of shortest paths into `target`, built by searching backward over incoming
    /// edges. Hidden vertices are never reached and keep a [`DISCONNECTED`] distance.
    pub fn reverse_shortest_path_tree<G: GraphView>(
        &mut self,
        graph: &G,
        target: VertexId,
    ) -> Result<()> {
        check_vertex(graph, target)?;
        self.run(graph, target, None, TreeDirection::Reverse);
        Ok(())
    }

    pub fn root(&self) -> Option<VertexId> {
        self.root.map(|(root, _)| root)
    }

    pub fn direction(&self) -> Option<TreeDirection> {
        self.root.map(|(_, direction)| direction)
    }

    /// Current tree distance of `v` ([`DISCONNECTED`] if unreached).
    pub fn distance(&self, v: VertexId) -> Weight {
        self.distance.get(v).copied().unwrap_or(DISCONNECTED)
    }

    pub fn parent(&self, v: VertexId) -> Option<VertexId> {
        self.parent.get(v).copied().flatten()
    }

    /// The tree path between `v` and the root, oriented the way the tree was built: root to `v`
    /// for forward trees, `v` to root for reverse trees.
    pub fn tree_path(&self, v: VertexId) -> Path {
        let distance = self.distance(v);
        if distance == DISCONNECTED {
            return Path::empty();
        }

        let mut vertices = vec![v];
        let mut cur = v;
        while let Some(next) = self.parent(cur) {
            if vertices.len() > self.parent.len() {
                debug_assert!(false, "cycle in shortest-path tree");
                return Path::empty();
            }
            vertices.push(next);
            cur = next;
        }

        if self.direction() == Some(TreeDirection::Forward) {
            vertices.reverse();
        }
        Path::new(vertices, distance)
    }

    /// Re-derives the distance of `vertex` in a reverse tree from its outgoing edges only.
    ///
    /// Used after `vertex` becomes visible again: if one of its out-edges leads to a shorter
    /// route to the root than `vertex` currently has, the tree is updated at `vertex` and the
    /// new route `vertex -> ... -> root` is returned. Nothing upstream of `vertex` is touched;
    /// see [`repair_backward`](Self::repair_backward).
    pub fn repair_forward<G: GraphView>(&mut self, graph: &G, vertex: VertexId) -> Option<Path> {
        if vertex >= self.distance.len() {
            return None;
        }

        let mut best = DISCONNECTED;
        let mut best_next = None;
        for next in graph.adjacent_vertices(vertex) {
            let candidate = self.distance(next) + graph.edge_weight(vertex, next);
            if candidate < best {
                best = candidate;
                best_next = Some(next);
            }
        }

        let next = best_next?;
        if best >= self.distance[vertex] {
            return None;
        }
        self.distance[vertex] = best;
        self.parent[vertex] = Some(next);
        tracing::trace!(vertex, next, distance = best, "tree repaired forward");
        Some(self.tree_path(vertex))
    }

    /// Propagates an improved distance at `vertex` to every predecessor that can now reach the
    /// root more cheaply through it, and from those onward, until nothing changes.
    pub fn repair_backward<G: GraphView>(&mut self, graph: &G, vertex: VertexId) {
        if vertex >= self.distance.len() {
            return;
        }

        let mut queue = VecDeque::from([vertex]);
        while let Some(cur) = queue.pop_front() {
            let base = self.distance[cur];
            for prev in graph.precedent_vertices(cur) {
                let fresh = base + graph.edge_weight(prev, cur);
                if fresh < self.distance[prev] {
                    self.distance[prev] = fresh;
                    self.parent[prev] = Some(cur);
                    queue.push_back(prev);
                }
            }
        }
    }

    /// Relaxes the single reverse-tree edge `from -> to`, typically right after that edge has
    /// been restored. Returns whether `from` improved (in which case the improvement has already
    /// been propagated backward).
    pub fn repair_edge<G: GraphView>(&mut self, graph: &G, from: VertexId, to: VertexId) -> bool {
        if from >= self.distance.len() {
            return false;
        }
        let candidate = graph.edge_weight(from, to) + self.distance(to);
        if candidate >= self.distance[from] {
            return false;
        }
        self.distance[from] = candidate;
        self.parent[from] = Some(to);
        tracing::trace!(from, to, distance = candidate, "tree edge repaired");
        self.repair_backward(graph, from);
        true
    }

    fn reset(&mut self, vertex_count: usize) {
        self.clear();
        self.distance.resize(vertex_count, DISCONNECTED);
        self.parent.resize(vertex_count, None);
        self.settled.resize(vertex_count, false);
    }

    fn run<G: GraphView>(
        &mut self,
        graph: &G,
        root: VertexId,
        stop_at: Option<VertexId>,
        direction: TreeDirection,
    ) {
        self.reset(graph.vertex_count());
        self.root = Some((root, direction));
        self.distance[root] = 0.0;
        self.push(root, 0.0);

        while let Some(HeapEntry {
            distance, vertex, ..
        }) = self.heap.pop()
        {
            if self.settled[vertex] || distance > self.distance[vertex] {
                continue;
            }
            if stop_at == Some(vertex) {
                break;
            }
            self.settled[vertex] = true;

            match direction {
                TreeDirection::Forward => {
                    for next in graph.adjacent_vertices(vertex) {
                        self.relax(next, vertex, distance + graph.edge_weight(vertex, next));
                    }
                }
                TreeDirection::Reverse => {
                    for prev in graph.precedent_vertices(vertex) {
                        self.relax(prev, vertex, distance + graph.edge_weight(prev, vertex));
                    }
                }
            }
        }
        self.heap.clear();
    }

    fn relax(&mut self, v: VertexId, via: VertexId, candidate: Weight) {
        if self.settled[v] || candidate >= self.distance[v] {
            return;
        }
        self.distance[v] = candidate;
        self.parent[v] = Some(via);
        self.push(v, candidate);
    }

    fn push(&mut self, vertex: VertexId, distance: Weight) {
        self.heap.push(HeapEntry {
            distance,
            seq: self.seq,
            vertex,
        });
        self.seq += 1;
    }
}

fn check_vertex<G: GraphView>(graph: &G, id: VertexId) -> Result<()> {
    if graph.contains_vertex(id) {
        Ok(())
    } else {
        Err(Error::UnknownVertex {
            id,
            vertex_count: graph.vertex_count(),
        })
    }
}
