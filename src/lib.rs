//! pagesim - a demand-paging simulator.
//!
//! Models demand paging over a bounded pool of physical frames and a
//! larger virtual address space. A [`PagingEngine`] services a stream of
//! page references, maintaining a page table and frame table, selecting
//! eviction victims under a pluggable replacement policy (FIFO, LRU, or
//! Clock), and persisting evicted page contents to a disk-backed store so
//! later references reload what was there before. Per-run counters and
//! timings come back as a [`RunReport`].
//!
//! # Example
//!
//! ```no_run
//! use pagesim::{AccessKind, PagingEngine, PolicyKind, SimConfig};
//!
//! fn main() -> pagesim::Result<()> {
//!     let config = SimConfig::from_kb(12, 4)?; // three 4 KiB frames
//!     let path = std::env::temp_dir().join("pagesim.swap");
//!     let mut engine = PagingEngine::new(config, PolicyKind::Lru, &path)?;
//!
//!     engine.access(0, AccessKind::Write)?;
//!     engine.access(1, AccessKind::Read)?;
//!     engine.access(0, AccessKind::Read)?;
//!
//!     let report = engine.report();
//!     println!(
//!         "{}: {} faults over {} accesses",
//!         report.policy, report.stats.faults, report.stats.accesses
//!     );
//!     engine.close()
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod frame_table;
pub mod page_table;
pub mod policy;
pub mod stats;
pub mod store;
pub mod trace;

pub use config::{SimConfig, MAX_FRAMES, MAX_VIRTUAL_PAGES};
pub use engine::PagingEngine;
pub use error::{Result, SimError};
pub use policy::{PolicyKind, ReplacementPolicy};
pub use stats::{RunReport, SimStats};
pub use store::BackingStore;
pub use trace::{parse_trace, references_from_pages, AccessKind, Reference};
