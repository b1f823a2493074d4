//! Per-virtual-page residency records.

/// Residency state for one virtual page.
///
/// A page is resident exactly when `frame` is `Some`; the frame field
/// doubles as the valid bit. Once a `disk_slot` is assigned it never
/// changes for the rest of the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageEntry {
    /// Frame holding this page, if resident.
    pub frame: Option<usize>,
    /// Written since last admission.
    pub dirty: bool,
    /// A copy of this page exists in the backing store.
    pub on_disk: bool,
    /// Backing-store slot, assigned at first eviction.
    pub disk_slot: Option<u32>,
}

impl PageEntry {
    /// Whether the page currently occupies a frame.
    #[must_use]
    pub fn is_resident(&self) -> bool {
        self.frame.is_some()
    }
}

/// Table of one entry per virtual page.
///
/// A passive state holder; the engine performs every transition. Indexed
/// by page number, which callers bounds-check first.
#[derive(Debug)]
pub struct PageTable {
    entries: Vec<PageEntry>,
}

impl PageTable {
    /// Creates a table of `virtual_pages` empty entries.
    #[must_use]
    pub fn new(virtual_pages: usize) -> Self {
        Self {
            entries: vec![PageEntry::default(); virtual_pages],
        }
    }

    /// Number of virtual pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for `page`.
    #[must_use]
    pub fn get(&self, page: usize) -> &PageEntry {
        &self.entries[page]
    }

    /// Mutable entry for `page`.
    pub fn get_mut(&mut self, page: usize) -> &mut PageEntry {
        &mut self.entries[page]
    }

    /// Restores every entry to the initial non-resident state.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            *entry = PageEntry::default();
        }
    }

    /// Currently resident pages, in ascending page order.
    pub fn resident_pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_resident())
            .map(|(page, _)| page)
    }
}
