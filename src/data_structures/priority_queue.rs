use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

/// Binary min-heap keyed by value, with in-place re-prioritisation.
///
/// Entries with equal priority leave in the order they were last (re)inserted,
/// which keeps shortest-path searches reproducible for a fixed input.
#[derive(Debug, Clone)]
pub struct IndexedPriorityQueue<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: Copy + Ord + Debug,
{
    heap: Vec<(P, u64, V)>,
    /// value -> index in `heap`
    positions: HashMap<V, usize>,
    next_seq: u64,
}

impl<V, P> Default for IndexedPriorityQueue<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: Copy + Ord + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P> IndexedPriorityQueue<V, P>
where
    V: Copy + Eq + Hash + Debug,
    P: Copy + Ord + Debug,
{
    /// Creates a new empty priority queue
    pub fn new() -> Self {
        IndexedPriorityQueue {
            heap: Vec::new(),
            positions: HashMap::new(),
            next_seq: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn contains(&self, value: &V) -> bool {
        self.positions.contains_key(value)
    }

    /// Current priority of a queued value
    pub fn priority(&self, value: &V) -> Option<P> {
        self.positions.get(value).map(|&i| self.heap[i].0)
    }

    /// Inserts `value`, or moves it to `priority` if it is already queued.
    ///
    /// A moved value counts as freshly inserted for tie-breaking.
    pub fn push_or_update(&mut self, value: V, priority: P) {
        let seq = self.next_seq;
        self.next_seq += 1;

        match self.positions.get(&value).copied() {
            Some(index) => {
                self.heap[index].0 = priority;
                self.heap[index].1 = seq;
                let index = self.sift_up(index);
                self.sift_down(index);
            }
            None => {
                self.heap.push((priority, seq, value));
                let index = self.heap.len() - 1;
                self.positions.insert(value, index);
                self.sift_up(index);
            }
        }
    }

    /// Removes the value with the smallest priority
    pub fn pop(&mut self) -> Option<(V, P)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let (priority, _, value) = self.heap.pop()?;
        self.positions.remove(&value);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((value, priority))
    }

    pub fn peek(&self) -> Option<(V, P)> {
        self.heap.first().map(|&(priority, _, value)| (value, priority))
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
        self.next_seq = 0;
    }

    fn less(&self, a: usize, b: usize) -> bool {
        (self.heap[a].0, self.heap[a].1) < (self.heap[b].0, self.heap[b].1)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions.insert(self.heap[a].2, a);
        self.positions.insert(self.heap[b].2, b);
    }

    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.less(index, parent) {
                break;
            }
            self.swap(index, parent);
            index = parent;
        }
        index
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;
            if left < self.heap.len() && self.less(left, smallest) {
                smallest = left;
            }
            if right < self.heap.len() && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.swap(index, smallest);
            index = smallest;
        }
    }
}

#[derive(Debug)]
struct Entry<T, P> {
    priority: P,
    seq: u64,
    item: T,
}

impl<T, P: Ord> PartialEq for Entry<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<T, P: Ord> Eq for Entry<T, P> {}

impl<T, P: Ord> PartialOrd for Entry<T, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, P: Ord> Ord for Entry<T, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.seq.cmp(&other.seq))
    }
}

/// A stable min-heap over arbitrary items: equal priorities pop in insertion order
#[derive(Debug)]
pub struct MinQueue<T, P>
where
    P: Ord + Copy + Debug,
{
    heap: BinaryHeap<Reverse<Entry<T, P>>>,
    next_seq: u64,
}

impl<T, P> Default for MinQueue<T, P>
where
    P: Ord + Copy + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> MinQueue<T, P>
where
    P: Ord + Copy + Debug,
{
    pub fn new() -> Self {
        MinQueue {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn push(&mut self, item: T, priority: P) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { priority, seq, item }));
    }

    pub fn pop(&mut self) -> Option<(T, P)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.item, entry.priority))
    }

    pub fn peek(&self) -> Option<(&T, P)> {
        self.heap
            .peek()
            .map(|Reverse(entry)| (&entry.item, entry.priority))
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }
}
