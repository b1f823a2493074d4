//! The paging engine: the hit/fault state machine over the tables.

use std::path::Path;
use std::time::Instant;

use log::{debug, trace};

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::frame_table::FrameTable;
use crate::page_table::{PageEntry, PageTable};
use crate::policy::{PolicyKind, ReplacementPolicy};
use crate::stats::{RunReport, SimStats};
use crate::store::BackingStore;
use crate::trace::{AccessKind, Reference};

/// Demand-paging engine.
///
/// Owns the page table, frame table, replacement policy, statistics, and
/// the backing-store handle; nothing outside holds references into them.
/// Single-threaded and non-reentrant: every [`access`] runs to completion
/// before the next, and all state transitions within it are atomic with
/// respect to observers.
///
/// [`access`]: PagingEngine::access
pub struct PagingEngine {
    config: SimConfig,
    pages: PageTable,
    frames: FrameTable,
    policy: Box<dyn ReplacementPolicy>,
    store: BackingStore,
    stats: SimStats,
}

impl PagingEngine {
    /// Creates an engine with freshly initialized tables and a truncated
    /// backing store at `store_path`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Store`] if the backing store cannot be opened.
    pub fn new(config: SimConfig, kind: PolicyKind, store_path: &Path) -> Result<Self> {
        let store = BackingStore::open(store_path, config.page_bytes())?;
        debug!(
            "init: {} frames of {} bytes, {} virtual pages, policy {}",
            config.total_frames(),
            config.page_bytes(),
            config.virtual_pages(),
            kind.name()
        );
        Ok(Self {
            pages: PageTable::new(config.virtual_pages()),
            frames: FrameTable::new(config.total_frames(), config.page_bytes()),
            policy: kind.build(config.total_frames(), config.virtual_pages()),
            store,
            stats: SimStats::default(),
            config,
        })
    }

    /// Reinitializes tables, policy state, and statistics, and truncates
    /// the backing store. Repeatable, so successive runs start from
    /// identical initial state.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Store`] if the store cannot be truncated.
    pub fn reset(&mut self) -> Result<()> {
        self.pages.reset();
        self.frames.reset();
        self.policy.reset();
        self.stats.reset();
        self.store.truncate()
    }

    /// Like [`reset`](PagingEngine::reset), switching to a different
    /// replacement policy for the next run.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Store`] if the store cannot be truncated.
    pub fn reset_with_policy(&mut self, kind: PolicyKind) -> Result<()> {
        self.policy = kind.build(self.config.total_frames(), self.config.virtual_pages());
        self.reset()
    }

    /// Services one page reference.
    ///
    /// A resident page is a hit: the frame buffer is touched, the dirty
    /// bit set on writes, and the policy notified. A miss counts a fault
    /// and runs the fault handler under the fault timer.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Bounds`] for a page outside the virtual
    /// address space, [`SimError::Store`] on backing-store I/O failure,
    /// and [`SimError::Logic`] if the policy yields an invalid victim.
    pub fn access(&mut self, page: usize, kind: AccessKind) -> Result<()> {
        if page >= self.config.virtual_pages() {
            return Err(SimError::Bounds {
                page,
                limit: self.config.virtual_pages(),
            });
        }
        self.stats.accesses += 1;

        if let Some(frame) = self.pages.get(page).frame {
            self.stats.hits += 1;
            trace!("hit: page {page} in frame {frame}");
            let buffer = self.frames.buffer_mut(frame);
            let byte = buffer[0];
            buffer[0] = byte;
            if kind == AccessKind::Write {
                self.pages.get_mut(page).dirty = true;
            }
            self.policy.note_access(page);
            return Ok(());
        }

        self.stats.faults += 1;
        let started = Instant::now();
        let outcome = self.handle_fault(page, kind);
        self.stats.fault_time += started.elapsed();
        outcome
    }

    /// Processes a full reference stream to completion.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`access`](PagingEngine::access).
    pub fn run(&mut self, refs: &[Reference]) -> Result<()> {
        for reference in refs {
            self.access(reference.page, reference.kind)?;
        }
        Ok(())
    }

    fn handle_fault(&mut self, page: usize, kind: AccessKind) -> Result<()> {
        let frame = match self.frames.find_free() {
            Some(frame) => frame,
            None => self.evict_for(page)?,
        };

        let (on_disk, disk_slot) = {
            let entry = self.pages.get(page);
            (entry.on_disk, entry.disk_slot)
        };
        if on_disk {
            let slot = disk_slot.ok_or_else(|| {
                SimError::Logic(format!("page {page} marked on disk without a slot"))
            })?;
            let started = Instant::now();
            self.store.read(slot, self.frames.buffer_mut(frame))?;
            self.stats.swap_in_time += started.elapsed();
            self.stats.swaps_in += 1;
            debug!("swap in: page {page} from slot {slot} into frame {frame}");
        } else {
            // First touch ever: fill with the page's low byte, which is
            // deterministic and stable across the run.
            self.frames.buffer_mut(frame).fill(page as u8);
        }

        let entry = self.pages.get_mut(page);
        entry.frame = Some(frame);
        entry.dirty = kind == AccessKind::Write;
        self.frames.install(frame, page);
        self.policy.note_admit(page, frame);
        Ok(())
    }

    /// Frees a frame by evicting a policy-chosen victim.
    ///
    /// The victim's entry and the frame are cleared before the caller
    /// loads into it, so a failed load leaves the frame free and a
    /// retried access safe: the completed swap-out is not repeated.
    fn evict_for(&mut self, requested: usize) -> Result<usize> {
        let victim = self.policy.choose_victim().ok_or_else(|| {
            SimError::Logic("victim requested from an empty resident set".into())
        })?;
        if victim == requested {
            return Err(SimError::Logic(format!(
                "policy chose the faulting page {requested} as victim"
            )));
        }
        let frame = self.pages.get(victim).frame.ok_or_else(|| {
            SimError::Logic(format!("policy chose non-resident page {victim} as victim"))
        })?;

        let (dirty, on_disk, existing_slot) = {
            let entry = self.pages.get(victim);
            (entry.dirty, entry.on_disk, entry.disk_slot)
        };
        // Write back when the page was written since admission, and
        // always on first eviction so a later reload restores these
        // contents; skip only for clean pages already on disk.
        if dirty || !on_disk {
            let slot = match existing_slot {
                Some(slot) => slot,
                None => {
                    let slot = self.store.allocate_slot()?;
                    self.pages.get_mut(victim).disk_slot = Some(slot);
                    slot
                }
            };
            let started = Instant::now();
            self.store.write(slot, self.frames.buffer(frame))?;
            self.stats.swap_out_time += started.elapsed();
            self.stats.swaps_out += 1;
            self.pages.get_mut(victim).on_disk = true;
            debug!("swap out: page {victim} from frame {frame} to slot {slot}");
        }

        let entry = self.pages.get_mut(victim);
        entry.frame = None;
        entry.dirty = false;
        self.frames.clear(frame);
        Ok(frame)
    }

    /// The geometry this engine was built with.
    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Counters accumulated so far.
    #[must_use]
    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Name of the active replacement policy.
    #[must_use]
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// End-of-run record for the harness.
    #[must_use]
    pub fn report(&self) -> RunReport {
        RunReport {
            policy: self.policy.name(),
            stats: self.stats.clone(),
        }
    }

    /// Currently resident pages in ascending order.
    #[must_use]
    pub fn resident_pages(&self) -> Vec<usize> {
        self.pages.resident_pages().collect()
    }

    /// Whether `page` currently occupies a frame.
    #[must_use]
    pub fn is_resident(&self, page: usize) -> bool {
        self.pages.get(page).is_resident()
    }

    /// Residency record for `page`, or `None` out of range.
    #[must_use]
    pub fn page_entry(&self, page: usize) -> Option<&PageEntry> {
        (page < self.pages.len()).then(|| self.pages.get(page))
    }

    /// Occupant of `frame`, or `None` if the frame is free.
    #[must_use]
    pub fn frame_occupant(&self, frame: usize) -> Option<usize> {
        self.frames.occupant(frame)
    }

    /// Read-only view of the memory contents of a resident page.
    #[must_use]
    pub fn frame_buffer(&self, page: usize) -> Option<&[u8]> {
        let frame = self.pages.get(page).frame?;
        Some(self.frames.buffer(frame))
    }

    /// Mutable view of the memory contents of a resident page. Marks the
    /// page dirty, like any write through a mapping would.
    pub fn frame_buffer_mut(&mut self, page: usize) -> Option<&mut [u8]> {
        let frame = self.pages.get(page).frame?;
        self.pages.get_mut(page).dirty = true;
        Some(self.frames.buffer_mut(frame))
    }

    /// Number of backing-store slots assigned so far.
    #[must_use]
    pub fn store_slots(&self) -> u32 {
        self.store.slot_count()
    }

    /// Flushes and releases the backing store.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Store`] if the final sync fails.
    pub fn close(self) -> Result<()> {
        self.store.close()
    }
}
