//! Simulation geometry: memory size, page size, virtual address space.

use std::io::Read;

use crate::error::{Result, SimError};

/// Upper bound on physical frames.
pub const MAX_FRAMES: usize = 256;

/// Upper bound on virtual pages.
pub const MAX_VIRTUAL_PAGES: usize = 1024;

/// Immutable simulation geometry.
///
/// Every table in the engine is sized from this: the frame table holds
/// `memory_bytes / page_bytes` frames, the page table `virtual_pages`
/// entries. Validated at construction; a [`SimConfig`] that exists is
/// well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    memory_bytes: usize,
    page_bytes: usize,
    virtual_pages: usize,
}

impl SimConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the page size is zero, memory is not
    /// a whole number of pages, the frame count is zero or exceeds
    /// [`MAX_FRAMES`], the virtual page count is zero or exceeds
    /// [`MAX_VIRTUAL_PAGES`], or there are more frames than virtual pages.
    pub fn new(memory_bytes: usize, page_bytes: usize, virtual_pages: usize) -> Result<Self> {
        if page_bytes == 0 {
            return Err(SimError::Config("page size must be greater than 0".into()));
        }
        if memory_bytes == 0 || memory_bytes % page_bytes != 0 {
            return Err(SimError::Config(format!(
                "memory size {memory_bytes} is not a positive multiple of page size {page_bytes}"
            )));
        }
        let total_frames = memory_bytes / page_bytes;
        if total_frames > MAX_FRAMES {
            return Err(SimError::Config(format!(
                "{total_frames} frames exceeds the limit of {MAX_FRAMES}"
            )));
        }
        if virtual_pages == 0 || virtual_pages > MAX_VIRTUAL_PAGES {
            return Err(SimError::Config(format!(
                "virtual page count {virtual_pages} outside 1..={MAX_VIRTUAL_PAGES}"
            )));
        }
        if total_frames > virtual_pages {
            return Err(SimError::Config(format!(
                "{total_frames} frames exceeds {virtual_pages} virtual pages"
            )));
        }
        Ok(Self {
            memory_bytes,
            page_bytes,
            virtual_pages,
        })
    }

    /// Creates a configuration from kilobyte sizes, with the virtual page
    /// count at the [`MAX_VIRTUAL_PAGES`] default.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] under the same conditions as [`new`].
    ///
    /// [`new`]: SimConfig::new
    pub fn from_kb(memory_kb: usize, page_kb: usize) -> Result<Self> {
        Self::new(memory_kb * 1024, page_kb * 1024, MAX_VIRTUAL_PAGES)
    }

    /// Parses a configuration from a plain-text source holding two
    /// whitespace-separated integers: `memory_kb` and `page_kb`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the source cannot be read, a field
    /// is missing or non-numeric, or the resulting geometry is invalid.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| SimError::Config(format!("failed to read config source: {e}")))?;

        let mut fields = text.split_whitespace();
        let memory_kb = parse_field(fields.next(), "memory_kb")?;
        let page_kb = parse_field(fields.next(), "page_kb")?;
        Self::from_kb(memory_kb, page_kb)
    }

    /// Simulated physical memory size in bytes.
    #[must_use]
    pub fn memory_bytes(&self) -> usize {
        self.memory_bytes
    }

    /// Page (and frame) size in bytes.
    #[must_use]
    pub fn page_bytes(&self) -> usize {
        self.page_bytes
    }

    /// Number of virtual pages in the address space.
    #[must_use]
    pub fn virtual_pages(&self) -> usize {
        self.virtual_pages
    }

    /// Number of physical frames.
    #[must_use]
    pub fn total_frames(&self) -> usize {
        self.memory_bytes / self.page_bytes
    }
}

fn parse_field(field: Option<&str>, name: &str) -> Result<usize> {
    let field = field.ok_or_else(|| SimError::Config(format!("missing config field {name}")))?;
    field
        .parse()
        .map_err(|_| SimError::Config(format!("invalid {name}: {field}")))
}
