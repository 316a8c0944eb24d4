//! Bounded future-event store
//!
//! Impulse units that displace events past the end of the current block need
//! somewhere to keep them until they fall due. `OffsetHeap` is a binary
//! min-heap of sample offsets over a fixed-capacity `Vec` arena: capacity is
//! set once at construction and never grows, so steady-state insert/drain is
//! allocation-free. Offsets are relative to the start of the current block;
//! each block the host-facing unit subtracts the block length from every
//! stored offset and drains everything that now falls inside the block.
//!
//! Overflow policy is silent drop of the newest insertion. That is
//! backpressure, not an error: a late jittered impulse that cannot be
//! remembered is simply lost.
//!
//! The same contract can be met with a fixed array scanned linearly and
//! compacted on removal. For a handful of pending events the scan is
//! competitive, but it is never better than the heap's logarithmic
//! drain-until-threshold, so the heap is the implementation here.

/// Fixed-capacity min-heap of pending sample offsets.
#[derive(Debug)]
pub struct OffsetHeap {
    items: Vec<u32>,
    cap: usize,
}

impl OffsetHeap {
    /// Allocate the backing arena. The one allocation this type ever makes.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            items: Vec::with_capacity(cap),
            cap,
        }
    }

    /// Fallible variant for hosts that treat allocation failure as a
    /// diagnostic rather than a crash.
    pub fn try_with_capacity(cap: usize) -> Option<Self> {
        let mut items = Vec::new();
        if items.try_reserve_exact(cap).is_err() {
            return None;
        }
        Some(Self { items, cap })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Insert an offset. Returns `false` (dropping the value) when full.
    pub fn insert(&mut self, offset: u32) -> bool {
        if self.items.len() == self.cap {
            return false;
        }
        self.items.push(offset);
        self.sift_up(self.items.len() - 1);
        true
    }

    /// Smallest pending offset, if any.
    pub fn peek(&self) -> Option<u32> {
        self.items.first().copied()
    }

    /// Remove and return the smallest pending offset.
    pub fn pop(&mut self) -> Option<u32> {
        match self.items.len() {
            0 => None,
            1 => self.items.pop(),
            n => {
                self.items.swap(0, n - 1);
                let min = self.items.pop();
                self.sift_down(0);
                min
            }
        }
    }

    /// Remove and return the smallest offset if it is below `threshold`.
    ///
    /// Drain-until-threshold loop: call until it returns `None`.
    pub fn pop_below(&mut self, threshold: u32) -> Option<u32> {
        match self.peek() {
            Some(min) if min < threshold => self.pop(),
            _ => None,
        }
    }

    /// Shift every stored offset `delta` samples closer to due.
    ///
    /// Subtracting the same amount from every key preserves heap order, so
    /// this is a flat pass over the arena. Callers drain everything below
    /// the block length before inserting, so no stored offset is ever
    /// smaller than `delta` when this runs.
    pub fn advance(&mut self, delta: u32) {
        for item in &mut self.items {
            debug_assert!(*item >= delta, "pending offset under-ran the block");
            *item -= delta;
        }
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.items[idx] < self.items[parent] {
                self.items.swap(idx, parent);
                idx = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.items.len();
        loop {
            let left = idx * 2 + 1;
            let right = left + 1;
            let mut smallest = idx;
            if left < len && self.items[left] < self.items[smallest] {
                smallest = left;
            }
            if right < len && self.items[right] < self.items[smallest] {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.items.swap(idx, smallest);
            idx = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_order_is_ascending() {
        let mut heap = OffsetHeap::with_capacity(16);
        for v in [90, 12, 55, 3, 71, 3, 40] {
            assert!(heap.insert(v));
        }
        let mut drained = Vec::new();
        while let Some(v) = heap.pop() {
            drained.push(v);
        }
        assert_eq!(drained, vec![3, 3, 12, 40, 55, 71, 90]);
    }

    #[test]
    fn test_insert_beyond_capacity_drops_newest() {
        let mut heap = OffsetHeap::with_capacity(3);
        assert!(heap.insert(5));
        assert!(heap.insert(1));
        assert!(heap.insert(9));
        // full: the newest insertion is dropped, existing entries untouched
        assert!(!heap.insert(0));
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.pop(), Some(1));
        assert_eq!(heap.pop(), Some(5));
        assert_eq!(heap.pop(), Some(9));
    }

    #[test]
    fn test_size_never_exceeds_capacity() {
        let mut heap = OffsetHeap::with_capacity(4);
        for v in 0..100u32 {
            heap.insert(v);
            assert!(heap.len() <= 4);
        }
        heap.pop();
        heap.insert(500);
        assert!(heap.len() <= 4);
    }

    #[test]
    fn test_advance_then_drain() {
        // An event at blockSize + 5 must come due on exactly the next block
        // at local offset 5, with every other offset reduced by blockSize.
        let block = 64u32;
        let mut heap = OffsetHeap::with_capacity(8);
        heap.insert(block + 5);
        heap.insert(2 * block + 1);

        heap.advance(block);
        assert_eq!(heap.pop_below(block), Some(5));
        assert_eq!(heap.pop_below(block), None);
        assert_eq!(heap.peek(), Some(block + 1));

        heap.advance(block);
        assert_eq!(heap.pop_below(block), Some(1));
        assert!(heap.is_empty());
    }

    #[test]
    fn test_pop_below_leaves_later_events() {
        let mut heap = OffsetHeap::with_capacity(8);
        for v in [3, 70, 10, 64, 63] {
            heap.insert(v);
        }
        let mut due = Vec::new();
        while let Some(v) = heap.pop_below(64) {
            due.push(v);
        }
        assert_eq!(due, vec![3, 10, 63]);
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn test_empty_heap() {
        let mut heap = OffsetHeap::with_capacity(2);
        assert!(heap.is_empty());
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.pop(), None);
        heap.advance(64); // no-op on empty
    }
}
