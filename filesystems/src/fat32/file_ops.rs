// File operations
// Create, delete, read, and the fill-byte write with on-demand allocation.
// Mutations order allocation before metadata before data, and each step is
// persisted before the next begins.

use std::io::Write;

use fatmod_core::FatmodError;
use log::{debug, info};

use super::constants::{ENTRY_DELETED, FAT32_EOC, FAT32_FREE};
use super::dir_entry::{DirEntry, FileName};
use super::timestamps;
use super::volume::Fat32Volume;

type FatmodResult<T> = Result<T, FatmodError>;

impl Fat32Volume {
    /// Create a zero-length file in the root directory. No cluster is
    /// allocated until data is written.
    pub fn create_file(&mut self, name: &FileName) -> FatmodResult<()> {
        match self.find_by_name(name) {
            Ok(_) => return Err(FatmodError::AlreadyExists(name.display())),
            Err(FatmodError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        let slot = self.find_free_slot()?;
        let entry = DirEntry::new_file(name);
        self.write_root_entry(slot, &entry)?;
        info!("Created {} in root slot {}", name.display(), slot);
        Ok(())
    }

    /// Delete a file: free its cluster chain in the FAT, then tombstone the
    /// directory entry.
    pub fn delete_file(&mut self, name: &FileName) -> FatmodResult<()> {
        let (slot, mut entry) = self.find_by_name(name)?;

        let mut cluster = entry.first_cluster();
        let mut freed = 0u32;
        while cluster > 1 && cluster < FAT32_EOC {
            let next = self.fat_entry(cluster)?;
            self.set_fat_entry(cluster, FAT32_FREE)?;
            cluster = next;
            freed += 1;
            if freed > self.layout.usable_clusters {
                return Err(FatmodError::Other(
                    "Cluster chain too long or circular".to_string(),
                ));
            }
        }

        entry.name[0] = ENTRY_DELETED;
        self.write_root_entry(slot, &entry)?;
        info!("Deleted {} ({} clusters freed)", name.display(), freed);
        Ok(())
    }

    /// Read a file's contents. The directory entry's size field bounds the
    /// result; a short chain ends the read early.
    pub fn read_file(&mut self, name: &FileName) -> FatmodResult<Vec<u8>> {
        let (_, entry) = self.find_by_name(name)?;
        let size = entry.file_size as usize;

        let mut data = Vec::with_capacity(size);
        let mut cluster = entry.first_cluster();
        let mut steps = 0u32;
        while data.len() < size && cluster > 1 && cluster < FAT32_EOC {
            data.extend_from_slice(&self.read_cluster(cluster)?);
            cluster = self.fat_entry(cluster)?;
            steps += 1;
            if steps > self.layout.usable_clusters {
                return Err(FatmodError::Other(
                    "Cluster chain too long or circular".to_string(),
                ));
            }
        }
        data.truncate(size);
        Ok(data)
    }

    /// Overwrite `length` bytes of `name` with `fill`, starting at byte
    /// `start`. The range may extend past the current end of the file, in
    /// which case clusters are allocated to cover it; `start` itself may
    /// not point past the current end.
    pub fn write_file(
        &mut self,
        name: &FileName,
        start: u32,
        length: u32,
        fill: u8,
    ) -> FatmodResult<()> {
        let (slot, mut entry) = self.find_by_name(name)?;
        let size = entry.file_size;

        if start > size {
            return Err(FatmodError::InvalidOffset {
                offset: start as u64,
                size,
            });
        }
        let end = start as u64 + length as u64;
        if end > u32::MAX as u64 {
            return Err(FatmodError::InvalidInput(
                "Write range exceeds the FAT32 file size limit".to_string(),
            ));
        }

        let occupied = self.layout.clusters_for(size as u64);
        let required = self.layout.clusters_for(end);

        // Grow the chain first, so the directory entry never points at
        // clusters that are not yet linked.
        let mut first_cluster = entry.first_cluster();
        if required > occupied {
            let mut tail = if first_cluster >= 2 {
                self.cluster_chain(first_cluster)?.last().copied()
            } else {
                None
            };
            for _ in occupied..required {
                let fresh = self.allocate_cluster()?;
                match tail {
                    Some(prev) => self.set_fat_entry(prev, fresh)?,
                    None => first_cluster = fresh,
                }
                tail = Some(fresh);
            }
        }

        // Metadata before data: size, first cluster, timestamps.
        entry.file_size = size.max(end as u32);
        entry.set_first_cluster(first_cluster);
        let (date, time) = timestamps::now();
        entry.write_date = date;
        entry.write_time = time;
        entry.last_access_date = date;
        self.write_root_entry(slot, &entry)?;

        if length > 0 {
            self.fill_range(first_cluster, start, length, fill)?;
        }
        info!(
            "Wrote {} bytes of 0x{:02x} at offset {} in {}",
            length,
            fill,
            start,
            name.display()
        );
        Ok(())
    }

    /// Claim one free cluster: zero its data, then mark it end-of-chain.
    /// The caller links it to a predecessor once it is fully initialized.
    fn allocate_cluster(&mut self) -> FatmodResult<u32> {
        let cluster = self.find_free_cluster()?;
        let zeros = vec![0u8; self.layout.cluster_size as usize];
        self.write_cluster(cluster, &zeros)?;
        self.set_fat_entry(cluster, FAT32_EOC)?;
        debug!("Allocated cluster {}", cluster);
        Ok(cluster)
    }

    /// Fill `length` bytes with `fill` starting at byte `start` of the
    /// chain, one read-modify-write per touched cluster.
    fn fill_range(&mut self, first: u32, start: u32, length: u32, fill: u8) -> FatmodResult<()> {
        let cluster_size = self.layout.cluster_size;

        let mut cluster = first;
        for _ in 0..start / cluster_size {
            cluster = self.fat_entry(cluster)?;
            if cluster <= 1 || cluster >= FAT32_EOC {
                return Err(FatmodError::Other(
                    "Cluster chain ends before the write range".to_string(),
                ));
            }
        }

        let mut within = (start % cluster_size) as usize;
        let mut remaining = length as usize;
        while remaining > 0 {
            let mut data = self.read_cluster(cluster)?;
            let run = (cluster_size as usize - within).min(remaining);
            data[within..within + run].fill(fill);
            self.write_cluster(cluster, &data)?;
            remaining -= run;
            within = 0;
            if remaining > 0 {
                cluster = self.fat_entry(cluster)?;
                if cluster <= 1 || cluster >= FAT32_EOC {
                    return Err(FatmodError::Other(
                        "Cluster chain ends before the write range".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Hex dump: sixteen bytes per line, each line prefixed with the offset of
/// its first byte as eight hex digits.
pub fn dump_hex<W: Write>(out: &mut W, data: &[u8]) -> std::io::Result<()> {
    for (i, line) in data.chunks(16).enumerate() {
        write!(out, "{:08x}:", i * 16)?;
        for byte in line {
            write!(out, " {:02x}", byte)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Raw byte dump, no framing.
pub fn dump_ascii<W: Write>(out: &mut W, data: &[u8]) -> std::io::Result<()> {
    out.write_all(data)
}
