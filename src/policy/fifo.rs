//! FIFO replacement: evict in admission order.

use std::collections::VecDeque;

use super::ReplacementPolicy;

/// Bounded queue of resident pages, oldest admission first.
///
/// Hits do not reorder the queue, which is what produces Bélády-style
/// behavior on cycling reference streams.
#[derive(Debug)]
pub struct FifoPolicy {
    queue: VecDeque<usize>,
    capacity: usize,
}

impl FifoPolicy {
    /// Creates an empty queue with room for `capacity` resident pages.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of pages currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no page is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn note_admit(&mut self, page: usize, _frame: usize) {
        debug_assert!(self.queue.len() < self.capacity);
        self.queue.push_back(page);
    }

    fn note_access(&mut self, _page: usize) {}

    fn choose_victim(&mut self) -> Option<usize> {
        self.queue.pop_front()
    }

    fn reset(&mut self) {
        self.queue.clear();
    }
}
