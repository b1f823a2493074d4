//! Reference streams: access kinds, records, and trace parsing.

use std::io::Read;

use crate::error::{Result, SimError};

/// Whether a reference reads or writes its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// Read access; leaves the dirty bit alone.
    Read,
    /// Write access; marks the page dirty.
    Write,
}

impl AccessKind {
    fn parse(token: &str) -> Result<Self> {
        match token {
            "R" | "r" => Ok(AccessKind::Read),
            "W" | "w" => Ok(AccessKind::Write),
            other => Err(SimError::Trace(format!("invalid access kind: {other}"))),
        }
    }
}

/// One record of a reference stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    /// Virtual page index.
    pub page: usize,
    /// Read or write.
    pub kind: AccessKind,
}

impl Reference {
    /// Creates a reference record.
    #[must_use]
    pub const fn new(page: usize, kind: AccessKind) -> Self {
        Self { page, kind }
    }
}

/// Parses a tuple stream of whitespace-separated `page kind` pairs, e.g.
/// `"0 R 7 W 0 R"`.
///
/// # Errors
///
/// Returns [`SimError::Trace`] if the source cannot be read, a page index
/// does not parse, or a page is missing its access kind.
pub fn parse_trace<R: Read>(mut reader: R) -> Result<Vec<Reference>> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| SimError::Trace(format!("failed to read trace source: {e}")))?;

    let mut refs = Vec::new();
    let mut tokens = text.split_whitespace();
    while let Some(page_token) = tokens.next() {
        let page: usize = page_token
            .parse()
            .map_err(|_| SimError::Trace(format!("invalid page index: {page_token}")))?;
        let kind_token = tokens.next().ok_or_else(|| {
            SimError::Trace(format!("page {page} is missing its access kind"))
        })?;
        refs.push(Reference::new(page, AccessKind::parse(kind_token)?));
    }
    Ok(refs)
}

/// Wraps a synthetic page-index sequence as an all-reads reference stream.
#[must_use]
pub fn references_from_pages(pages: &[usize]) -> Vec<Reference> {
    pages
        .iter()
        .map(|&page| Reference::new(page, AccessKind::Read))
        .collect()
}

/// Maps a raw byte address onto a page index, wrapping at the virtual
/// address space. Useful for address-granular traces.
#[must_use]
pub fn page_of_address(addr: u64, page_bytes: usize, virtual_pages: usize) -> usize {
    ((addr / page_bytes as u64) % virtual_pages as u64) as usize
}
