//! Open set of the search: a binary heap keyed by f-score with the insertion sequence as
//! secondary key, plus a hash map holding the live score of every member.
//!
//! Re-scoring an open node pushes a fresh heap entry instead of sifting the old one; entries
//! that no longer match the live score are discarded lazily when they reach the top.
use fxhash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

struct SmallestCostHolder<N> {
    estimated_cost: f64,
    sequence: u64,
    node: N,
}

impl<N> Eq for SmallestCostHolder<N> {}

impl<N> PartialEq for SmallestCostHolder<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N> PartialOrd for SmallestCostHolder<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> Ord for SmallestCostHolder<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap yields the smallest estimate, and among equal estimates the
        // node that entered the frontier first.
        match other.estimated_cost.total_cmp(&self.estimated_cost) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct OpenEntry {
    score: f64,
    sequence: u64,
}

pub struct Frontier<N> {
    heap: BinaryHeap<SmallestCostHolder<N>>,
    open: FxHashMap<N, OpenEntry>,
    next_sequence: u64,
}

impl<N: Eq + Hash + Clone> Default for Frontier<N> {
    fn default() -> Self {
        Frontier::new()
    }
}

impl<N: Eq + Hash + Clone> Frontier<N> {
    pub fn new() -> Frontier<N> {
        Frontier {
            heap: BinaryHeap::new(),
            open: FxHashMap::default(),
            next_sequence: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.open.contains_key(node)
    }

    /// Live score of an open node.
    pub fn score(&self, node: &N) -> Option<f64> {
        self.open.get(node).map(|e| e.score)
    }

    /// Adds `node` with the given score unless it is already open. Returns whether it was added.
    pub fn insert_if_absent(&mut self, node: N, score: f64) -> bool {
        if self.open.contains_key(&node) {
            return false;
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.open.insert(node.clone(), OpenEntry { score, sequence });
        self.heap.push(SmallestCostHolder {
            estimated_cost: score,
            sequence,
            node,
        });
        true
    }

    /// Adds `node`, or re-scores it if it is already open. A re-scored node keeps its original
    /// insertion position for tie-breaking. Returns whether the node was newly added.
    pub fn push(&mut self, node: N, score: f64) -> bool {
        match self.open.get_mut(&node) {
            Some(entry) => {
                if entry.score != score {
                    entry.score = score;
                    let sequence = entry.sequence;
                    self.heap.push(SmallestCostHolder {
                        estimated_cost: score,
                        sequence,
                        node,
                    });
                }
                false
            }
            None => self.insert_if_absent(node, score),
        }
    }

    /// Removes and returns the open node with the smallest live score, ties going to the node
    /// inserted first.
    pub fn pop_min(&mut self) -> Option<(N, f64)> {
        while let Some(SmallestCostHolder {
            estimated_cost,
            sequence,
            node,
        }) = self.heap.pop()
        {
            let live = OpenEntry {
                score: estimated_cost,
                sequence,
            };
            if self.open.get(&node) == Some(&live) {
                self.open.remove(&node);
                return Some((node, estimated_cost));
            }
        }
        None
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.open.clear();
    }
}
