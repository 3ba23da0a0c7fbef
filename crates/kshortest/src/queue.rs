//! Min-priority queue of candidate paths.

use crate::Path;
use crate::graph::VertexId;
use rustc_hash::FxBuildHasher;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    path: Path,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: lighter paths first, then older entries.
        other
            .path
            .weight()
            .total_cmp(&self.path.weight())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Candidate paths ordered by weight, lightest first.
///
/// Paths of equal weight come out in the order they were pushed, so a search over the same input
/// always produces the same sequence. The queue does not deduplicate: use
/// [`contains`](Self::contains) before pushing when that matters.
#[derive(Debug, Clone, Default)]
pub struct PathCandidateQueue {
    heap: BinaryHeap<Entry>,
    // Queued vertex sequences and how many copies of each are queued.
    members: HashMap<Vec<VertexId>, usize>,
    next_seq: u64,
}

impl PathCandidateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: Path) {
        *self.members.entry(path.vertices().to_vec()).or_insert(0) += 1;
        self.heap.push(Entry {
            seq: self.next_seq,
            path,
        });
        self.next_seq += 1;
    }

    pub fn pop_min(&mut self) -> Option<Path> {
        let Entry { path, .. } = self.heap.pop()?;
        if let Some(count) = self.members.get_mut(path.vertices()) {
            *count -= 1;
            if *count == 0 {
                self.members.remove(path.vertices());
            }
        }
        Some(path)
    }

    pub fn peek_min(&self) -> Option<&Path> {
        self.heap.peek().map(|entry| &entry.path)
    }

    /// Whether a path with the same vertex sequence is currently queued.
    pub fn contains(&self, path: &Path) -> bool {
        self.members.contains_key(path.vertices())
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.members.clear();
        self.next_seq = 0;
    }
}
