// FAT table access
// One 4-byte little-endian entry per cluster. Reads mask to the 28
// significant bits; writes go straight to the image with a barrier.

use fatmod_core::FatmodError;
use log::debug;

use super::constants::{FAT32_ENTRY_MASK, FAT32_EOC, FAT32_FREE};
use super::volume::Fat32Volume;

type FatmodResult<T> = Result<T, FatmodError>;

impl Fat32Volume {
    /// Read the FAT entry for `cluster`.
    pub fn fat_entry(&mut self, cluster: u32) -> FatmodResult<u32> {
        if cluster >= self.layout.usable_clusters {
            return Err(FatmodError::InvalidCluster(cluster));
        }
        let mut buf = [0u8; 4];
        self.image
            .read_exact_at(self.layout.fat_entry_offset(cluster), &mut buf)?;
        Ok(u32::from_le_bytes(buf) & FAT32_ENTRY_MASK)
    }

    /// Write the FAT entry for `cluster` and force it to storage. Entries 0
    /// and 1 hold media metadata and are never rewritten here.
    pub fn set_fat_entry(&mut self, cluster: u32, value: u32) -> FatmodResult<()> {
        if cluster < 2 || cluster >= self.layout.usable_clusters {
            return Err(FatmodError::InvalidCluster(cluster));
        }
        let bytes = (value & FAT32_ENTRY_MASK).to_le_bytes();
        self.image
            .write_all_at(self.layout.fat_entry_offset(cluster), &bytes)?;
        self.image.sync()
    }

    /// Find the first free cluster, scanning upward from just past the root
    /// directory cluster. An exhausted scan means the volume is full.
    pub fn find_free_cluster(&mut self) -> FatmodResult<u32> {
        let mut cluster = self.layout.root_cluster + 1;
        while cluster < self.layout.usable_clusters {
            if self.fat_entry(cluster)? == FAT32_FREE {
                debug!("Free cluster scan found {}", cluster);
                return Ok(cluster);
            }
            cluster += 1;
        }
        Err(FatmodError::DiskFull)
    }

    /// Collect the cluster chain starting at `first`, following FAT links
    /// until an end-of-chain sentinel.
    pub fn cluster_chain(&mut self, first: u32) -> FatmodResult<Vec<u32>> {
        let mut chain = Vec::new();
        let mut cluster = first;
        while cluster > 1 && cluster < FAT32_EOC {
            chain.push(cluster);
            if chain.len() > self.layout.usable_clusters as usize {
                return Err(FatmodError::Other(
                    "Cluster chain too long or circular".to_string(),
                ));
            }
            cluster = self.fat_entry(cluster)?;
        }
        Ok(chain)
    }
}
