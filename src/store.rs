//! Backing store: slot-granular persistence for evicted pages.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SimError};

/// Disk-backed store for page contents, keyed by slot index.
///
/// Slot `k` occupies bytes `[k * page_bytes, (k + 1) * page_bytes)` of a
/// flat file with no header. Slots are handed out monotonically by
/// [`allocate_slot`] and never reclaimed; a slot that was allocated but
/// never written reads back as zeroes.
///
/// [`allocate_slot`]: BackingStore::allocate_slot
pub struct BackingStore {
    path: PathBuf,
    file: File,
    page_bytes: usize,
    next_slot: u32,
}

impl BackingStore {
    /// Creates (or truncates) the store file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Store`] if the file cannot be opened.
    pub fn open(path: &Path, page_bytes: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| SimError::Store(format!("failed to open {}: {e}", path.display())))?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            page_bytes,
            next_slot: 0,
        })
    }

    /// Path of the store file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of slots allocated so far.
    #[must_use]
    pub fn slot_count(&self) -> u32 {
        self.next_slot
    }

    /// Allocates the next slot and extends the file to cover it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Store`] if the file cannot be extended.
    pub fn allocate_slot(&mut self) -> Result<u32> {
        let slot = self.next_slot;
        self.next_slot += 1;
        let new_len = u64::from(self.next_slot) * self.page_bytes as u64;
        self.file
            .set_len(new_len)
            .map_err(|e| SimError::Store(format!("failed to extend file: {e}")))?;
        Ok(slot)
    }

    /// Writes exactly one page at the slot's offset.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Logic`] if `buffer` is not page-sized, or
    /// [`SimError::Store`] on a seek/write failure.
    pub fn write(&mut self, slot: u32, buffer: &[u8]) -> Result<()> {
        self.check_page_sized(buffer.len())?;
        self.seek_to(slot)?;
        self.file
            .write_all(buffer)
            .map_err(|e| SimError::Store(format!("failed to write slot {slot}: {e}")))
    }

    /// Reads exactly one page from the slot's offset into `buffer`.
    ///
    /// A slot beyond the current file contents reads as zeroes.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Logic`] if `buffer` is not page-sized, or
    /// [`SimError::Store`] on a seek/read failure.
    pub fn read(&mut self, slot: u32, buffer: &mut [u8]) -> Result<()> {
        self.check_page_sized(buffer.len())?;
        self.seek_to(slot)?;
        match self.file.read_exact(buffer) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                buffer.fill(0);
                Ok(())
            }
            Err(e) => Err(SimError::Store(format!("failed to read slot {slot}: {e}"))),
        }
    }

    /// Empties the file and restarts slot allocation from zero.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Store`] if the file cannot be truncated.
    pub fn truncate(&mut self) -> Result<()> {
        self.file
            .set_len(0)
            .map_err(|e| SimError::Store(format!("failed to truncate file: {e}")))?;
        self.next_slot = 0;
        Ok(())
    }

    /// Flushes file contents to stable storage.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Store`] if the sync fails.
    pub fn sync(&mut self) -> Result<()> {
        self.file
            .sync_all()
            .map_err(|e| SimError::Store(format!("failed to sync file: {e}")))
    }

    /// Flushes and releases the file handle.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Store`] if the final sync fails.
    pub fn close(mut self) -> Result<()> {
        self.sync()
    }

    fn seek_to(&mut self, slot: u32) -> Result<()> {
        let offset = u64::from(slot) * self.page_bytes as u64;
        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|e| SimError::Store(format!("failed to seek to slot {slot}: {e}")))?;
        Ok(())
    }

    fn check_page_sized(&self, len: usize) -> Result<()> {
        if len == self.page_bytes {
            Ok(())
        } else {
            Err(SimError::Logic(format!(
                "buffer of {len} bytes passed to a store with {} byte pages",
                self.page_bytes
            )))
        }
    }
}
