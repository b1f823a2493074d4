//! Error types for simulator operations.

use thiserror::Error;

/// Result type alias using [`SimError`].
pub type Result<T> = std::result::Result<T, SimError>;

/// Error types for simulator operations.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid memory/page geometry or a malformed configuration source.
    #[error("Config error: {0}")]
    Config(String),

    /// Backing-store open/seek/read/write failure.
    #[error("Backing store error: {0}")]
    Store(String),

    /// Reference to a page outside the virtual address space.
    #[error("Page {page} out of bounds (virtual pages: {limit})")]
    Bounds { page: usize, limit: usize },

    /// Malformed reference record in a trace stream.
    #[error("Trace error: {0}")]
    Trace(String),

    /// Invalid victim from a replacement policy, or an internal state
    /// contradiction. Fatal for the run.
    #[error("Logic error: {0}")]
    Logic(String),
}
