// Volume layout
// Absolute byte offsets of the FAT and data regions, derived once from the
// boot sector, plus the cluster-number to byte-offset mapping

use fatmod_core::FatmodError;

use super::boot_sector::BootSector;
use super::constants::DIR_ENTRY_SIZE;

/// Byte-level layout of an open volume.
#[derive(Debug, Clone)]
pub struct VolumeLayout {
    pub bytes_per_sector: u32,
    pub sectors_per_cluster: u32,
    pub cluster_size: u32,
    pub fat_offset: u64,
    pub fat_size_bytes: u64,
    pub data_offset: u64,
    pub root_cluster: u32,
    /// Directory entries that fit in the single root cluster.
    pub root_entry_count: u32,
    /// Exclusive upper bound for any cluster number on this volume: the
    /// lesser of what the data region holds and what the FAT can describe.
    pub usable_clusters: u32,
}

impl VolumeLayout {
    pub fn from_boot_sector(boot: &BootSector) -> Result<Self, FatmodError> {
        if boot.bytes_per_sector == 0 || boot.sectors_per_cluster == 0 {
            return Err(FatmodError::Other(
                "Boot sector reports a zero sector or cluster size".to_string(),
            ));
        }

        let bytes_per_sector = boot.bytes_per_sector as u32;
        let sectors_per_cluster = boot.sectors_per_cluster as u32;
        let cluster_size = bytes_per_sector * sectors_per_cluster;

        // Counts from a corrupt boot sector can overflow u32, so all region
        // arithmetic is done in u64.
        let fat_offset = boot.reserved_sectors as u64 * bytes_per_sector as u64;
        let fat_size_bytes = boot.fat_size() as u64 * bytes_per_sector as u64;
        let data_start_sector =
            boot.reserved_sectors as u64 + boot.num_fats as u64 * boot.fat_size() as u64;
        let data_offset = data_start_sector * bytes_per_sector as u64;

        let data_sectors = (boot.total_sectors() as u64).saturating_sub(data_start_sector);
        let data_clusters = data_sectors / sectors_per_cluster as u64;
        let fat_entries = fat_size_bytes / 4;
        let usable_clusters = (data_clusters + 2)
            .min(fat_entries)
            .min(u32::MAX as u64) as u32;

        Ok(VolumeLayout {
            bytes_per_sector,
            sectors_per_cluster,
            cluster_size,
            fat_offset,
            fat_size_bytes,
            data_offset,
            root_cluster: boot.root_cluster,
            root_entry_count: cluster_size / DIR_ENTRY_SIZE as u32,
            usable_clusters,
        })
    }

    /// Absolute byte offset of a data cluster. Clusters 0 and 1 carry FAT
    /// metadata and never map into the data region.
    pub fn cluster_offset(&self, cluster: u32) -> Result<u64, FatmodError> {
        if cluster < 2 || cluster >= self.usable_clusters {
            return Err(FatmodError::InvalidCluster(cluster));
        }
        Ok(self.data_offset + (cluster as u64 - 2) * self.cluster_size as u64)
    }

    pub fn sector_offset(&self, sector: u32) -> u64 {
        sector as u64 * self.bytes_per_sector as u64
    }

    /// Byte offset of a cluster's 4-byte entry inside the FAT region.
    pub fn fat_entry_offset(&self, cluster: u32) -> u64 {
        self.fat_offset + cluster as u64 * 4
    }

    /// Clusters needed to hold `bytes` of file data.
    pub fn clusters_for(&self, bytes: u64) -> u32 {
        ((bytes + self.cluster_size as u64 - 1) / self.cluster_size as u64) as u32
    }
}
