// SPDX-License-Identifier: MIT

use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct OpenItem {
    node: usize,
    f_value: f32,
    seq: u64,
}

impl PartialEq for OpenItem {
    fn eq(&self, other: &Self) -> bool {
        self.f_value.eq(&other.f_value) && self.seq == other.seq
    }
}

impl PartialOrd for OpenItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        // NOTE: We revert the order of comparison,
        // as lower f-values are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        match other.f_value.partial_cmp(&self.f_value) {
            Some(std::cmp::Ordering::Equal) => Some(other.seq.cmp(&self.seq)),
            ordering => ordering,
        }
    }
}

impl Eq for OpenItem {}

impl Ord for OpenItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.partial_cmp(other).unwrap()
    }
}

/// The A* open list: discovered-but-not-yet-expanded nodes,
/// prioritized by their estimated total path cost (f-value).
///
/// Backed by a binary heap, so selecting the cheapest node is O(log n)
/// instead of re-sorting the whole list before every selection. Entries
/// with equal f-values are popped in insertion order, which keeps the
/// search fully deterministic.
///
/// The frontier holds node ids only; the caller is responsible for never
/// pushing the same node twice within one search.
#[derive(Debug, Default)]
pub(super) struct Frontier {
    heap: BinaryHeap<OpenItem>,
    next_seq: u64,
}

impl Frontier {
    /// Inserts a node with the given f-value.
    pub fn push(&mut self, node: usize, f_value: f32) {
        self.heap.push(OpenItem {
            node,
            f_value,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    /// Removes and returns the node with the lowest f-value,
    /// or [None] if the frontier is empty.
    pub fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|item| item.node)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
