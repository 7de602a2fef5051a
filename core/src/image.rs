// Disk image access
// A FAT32 volume image opened as an ordinary file, with positioned raw I/O

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::debug;

use crate::error::FatmodError;

/// An open disk image with positioned read/write access.
///
/// Nothing is cached here. The image file is the sole source of truth, and
/// callers follow every mutating write with `sync()` so the bytes reach
/// storage before the operation reports success.
pub struct DiskImage {
    file: File,
}

impl DiskImage {
    /// Open an existing image for read/write access. The image is never
    /// created or resized here.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FatmodError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)?;
        debug!("Opened disk image {}", path.display());
        Ok(DiskImage { file })
    }

    /// Read exactly `buf.len()` bytes at `offset`. A short read is an error.
    pub fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), FatmodError> {
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read_exact(buf)?;
        Ok(())
    }

    /// Write all of `buf` at `offset`. Does not sync; the caller decides when
    /// the durability barrier happens.
    pub fn write_all_at(&mut self, offset: u64, buf: &[u8]) -> Result<(), FatmodError> {
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(buf)?;
        Ok(())
    }

    /// Force all written data down to persistent storage.
    pub fn sync(&mut self) -> Result<(), FatmodError> {
        self.file.sync_all()?;
        Ok(())
    }
}
