// Root directory access
// The root directory is one cluster of 32-byte slots. Queries decode a
// single pass over the cluster; slot writes rewrite the containing sector.

use fatmod_core::FatmodError;
use log::{debug, warn};

use super::constants::{DIR_ENTRY_SIZE, ENTRY_DELETED, ENTRY_FREE};
use super::dir_entry::{DirEntry, FileName};
use super::volume::Fat32Volume;

type FatmodResult<T> = Result<T, FatmodError>;

/// One row of a root directory listing.
#[derive(Debug, Clone, PartialEq)]
pub struct FileInfo {
    pub name: String,
    pub size: u32,
}

impl Fat32Volume {
    /// Decode every root slot in index order.
    fn root_entries(&mut self) -> FatmodResult<Vec<DirEntry>> {
        let data = self.read_cluster(self.layout.root_cluster)?;
        Ok(data
            .chunks_exact(DIR_ENTRY_SIZE)
            .map(|chunk| {
                let mut raw = [0u8; DIR_ENTRY_SIZE];
                raw.copy_from_slice(chunk);
                DirEntry::decode(&raw)
            })
            .collect())
    }

    /// List the regular files in the root directory.
    pub fn list_root(&mut self) -> FatmodResult<Vec<FileInfo>> {
        let mut files = Vec::new();
        for (index, entry) in self.root_entries()?.iter().enumerate() {
            if entry.is_free_slot() {
                continue;
            }
            if entry.is_long_name() {
                warn!("Slot {}: long filename entries are not supported, skipping", index);
                continue;
            }
            if entry.is_volume_label() {
                debug!("Slot {}: volume label", index);
                continue;
            }
            if entry.is_directory() {
                warn!("Slot {}: subdirectories are not supported, skipping", index);
                continue;
            }
            files.push(FileInfo {
                name: entry.display_name(),
                size: entry.file_size,
            });
        }
        Ok(files)
    }

    /// Find the first live entry whose decoded name matches `name`.
    pub fn find_by_name(&mut self, name: &FileName) -> FatmodResult<(usize, DirEntry)> {
        let target = name.display();
        for (index, entry) in self.root_entries()?.into_iter().enumerate() {
            if entry.is_free_slot()
                || entry.is_long_name()
                || entry.is_volume_label()
                || entry.is_directory()
            {
                continue;
            }
            if entry.display_name() == target {
                return Ok((index, entry));
            }
        }
        Err(FatmodError::NotFound(target))
    }

    /// Find the first slot available for a new entry, never used or
    /// tombstoned alike.
    pub fn find_free_slot(&mut self) -> FatmodResult<usize> {
        for (index, entry) in self.root_entries()?.iter().enumerate() {
            if entry.name[0] == ENTRY_FREE || entry.name[0] == ENTRY_DELETED {
                return Ok(index);
            }
        }
        Err(FatmodError::DirectoryFull)
    }

    /// Rewrite root slot `index` and persist the sector that holds it.
    pub(crate) fn write_root_entry(&mut self, index: usize, entry: &DirEntry) -> FatmodResult<()> {
        let (sector, within) = self.root_slot_location(index)?;
        let mut data = self.read_sector(sector)?;
        data[within..within + DIR_ENTRY_SIZE].copy_from_slice(&entry.encode());
        self.write_sector(sector, &data)
    }

    /// Sector number and in-sector byte offset of a root slot. Slots are 32
    /// bytes and sectors are a multiple of that, so a slot never straddles
    /// a sector boundary.
    fn root_slot_location(&self, index: usize) -> FatmodResult<(u32, usize)> {
        if index >= self.layout.root_entry_count as usize {
            return Err(FatmodError::Other(format!(
                "Root directory index {} out of bounds",
                index
            )));
        }
        let byte = self.layout.cluster_offset(self.layout.root_cluster)?
            + (index * DIR_ENTRY_SIZE) as u64;
        let sector = (byte / self.layout.bytes_per_sector as u64) as u32;
        let within = (byte % self.layout.bytes_per_sector as u64) as usize;
        Ok((sector, within))
    }
}
