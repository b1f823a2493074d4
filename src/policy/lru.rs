//! LRU replacement: evict the least recently used resident page.

use super::ReplacementPolicy;

/// Logical-clock LRU.
///
/// Every admission and access stamps the page with a monotonically
/// increasing counter; the victim is the resident page with the smallest
/// stamp. Ties break toward the lowest page number.
#[derive(Debug)]
pub struct LruPolicy {
    last_use: Vec<Option<u64>>,
    clock: u64,
}

impl LruPolicy {
    /// Creates an empty policy over `virtual_pages` pages.
    #[must_use]
    pub fn new(virtual_pages: usize) -> Self {
        Self {
            last_use: vec![None; virtual_pages],
            clock: 0,
        }
    }

    fn stamp(&mut self, page: usize) {
        self.last_use[page] = Some(self.clock);
        self.clock += 1;
    }
}

impl ReplacementPolicy for LruPolicy {
    fn name(&self) -> &'static str {
        "LRU"
    }

    fn note_admit(&mut self, page: usize, _frame: usize) {
        self.stamp(page);
    }

    fn note_access(&mut self, page: usize) {
        self.stamp(page);
    }

    fn choose_victim(&mut self) -> Option<usize> {
        let (victim, _) = self
            .last_use
            .iter()
            .enumerate()
            .filter_map(|(page, stamp)| stamp.map(|s| (page, s)))
            .min_by_key(|&(page, stamp)| (stamp, page))?;
        self.last_use[victim] = None;
        Some(victim)
    }

    fn reset(&mut self) {
        self.last_use.fill(None);
        self.clock = 0;
    }
}
