use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Index of a node state inside the engine's registry.
pub type NodeHandle = usize;

/// Min-priority queue of node handles.
///
/// The same handle may be pushed several times; stale entries are left in
/// place and skipped by the caller when popped (lazy deletion). Entries with
/// equal keys pop in insertion order.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_sequence: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, handle: NodeHandle, key: f64) {
        let entry = FrontierEntry {
            key: FloatOrd(key),
            sequence: self.next_sequence,
            handle,
        };
        self.next_sequence += 1;
        self.heap.push(entry);
    }

    /// Remove the entry with the smallest key.
    pub fn pop_min(&mut self) -> Option<NodeHandle> {
        self.heap.pop().map(|entry| entry.handle)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct FrontierEntry {
    key: FloatOrd,
    sequence: u64,
    handle: NodeHandle,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by key, oldest first.
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
