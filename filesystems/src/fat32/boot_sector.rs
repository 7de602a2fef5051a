// FAT32 boot sector parsing
// Sector 0 is decoded field by field at the documented offsets; no struct
// casts, every field goes through from_le_bytes

use super::constants::*;

/// Geometry fields decoded from the boot sector.
#[derive(Debug, Clone)]
pub struct BootSector {
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u16,
    pub num_fats: u8,
    pub total_sectors_16: u16,
    pub fat_size_16: u16,
    pub total_sectors_32: u32,
    pub fat_size_32: u32,
    pub root_cluster: u32,
    pub volume_label: [u8; 11],
    pub boot_signature: [u8; 2],
}

fn read_u16(sector: &[u8; 512], offset: usize) -> u16 {
    u16::from_le_bytes([sector[offset], sector[offset + 1]])
}

fn read_u32(sector: &[u8; 512], offset: usize) -> u32 {
    u32::from_le_bytes([
        sector[offset],
        sector[offset + 1],
        sector[offset + 2],
        sector[offset + 3],
    ])
}

impl BootSector {
    /// Decode the geometry fields out of a raw boot sector.
    pub fn parse(sector: &[u8; 512]) -> Self {
        let mut volume_label = [0u8; 11];
        volume_label.copy_from_slice(&sector[BS32_VOL_LAB..BS32_VOL_LAB + 11]);

        BootSector {
            bytes_per_sector: read_u16(sector, BPB_BYTES_PER_SEC),
            sectors_per_cluster: sector[BPB_SEC_PER_CLUS],
            reserved_sectors: read_u16(sector, BPB_RSVD_SEC_CNT),
            num_fats: sector[BPB_NUM_FATS],
            total_sectors_16: read_u16(sector, BPB_TOT_SEC16),
            fat_size_16: read_u16(sector, BPB_FAT_SZ16),
            total_sectors_32: read_u32(sector, BPB_TOT_SEC32),
            fat_size_32: read_u32(sector, BPB_FAT_SZ32),
            root_cluster: read_u32(sector, BPB_ROOT_CLUS),
            volume_label,
            boot_signature: [
                sector[BOOT_SIGNATURE_OFFSET],
                sector[BOOT_SIGNATURE_OFFSET + 1],
            ],
        }
    }

    /// Sectors per FAT. The FAT32 field is authoritative; the legacy field is
    /// only consulted by `validate`.
    pub fn fat_size(&self) -> u32 {
        self.fat_size_32
    }

    /// Total sector count, preferring the 16-bit field when it is set.
    pub fn total_sectors(&self) -> u32 {
        if self.total_sectors_16 != 0 {
            self.total_sectors_16 as u32
        } else {
            self.total_sectors_32
        }
    }

    pub fn volume_label_string(&self) -> String {
        String::from_utf8_lossy(&self.volume_label)
            .trim_end()
            .to_string()
    }

    /// Compare the decoded geometry against the fixed configuration this tool
    /// targets. Mismatches are reported, never fatal.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.bytes_per_sector != EXPECTED_BYTES_PER_SECTOR {
            warnings.push(format!(
                "Sector size is {} bytes, expected {}",
                self.bytes_per_sector, EXPECTED_BYTES_PER_SECTOR
            ));
        }
        if self.sectors_per_cluster != EXPECTED_SECTORS_PER_CLUSTER {
            warnings.push(format!(
                "Cluster size is {} sectors, expected {}",
                self.sectors_per_cluster, EXPECTED_SECTORS_PER_CLUSTER
            ));
        }
        if self.reserved_sectors != EXPECTED_RESERVED_SECTORS {
            warnings.push(format!(
                "Reserved area is {} sectors, expected {}",
                self.reserved_sectors, EXPECTED_RESERVED_SECTORS
            ));
        }
        if self.num_fats != EXPECTED_NUM_FATS {
            warnings.push(format!(
                "Volume has {} FATs, expected {}",
                self.num_fats, EXPECTED_NUM_FATS
            ));
        }
        if self.root_cluster != EXPECTED_ROOT_CLUSTER {
            warnings.push(format!(
                "Root directory starts at cluster {}, expected {}",
                self.root_cluster, EXPECTED_ROOT_CLUSTER
            ));
        }
        if self.fat_size_16 as u32 != self.fat_size_32 {
            warnings.push(format!(
                "Legacy sectors-per-FAT field ({}) disagrees with the FAT32 field ({})",
                self.fat_size_16, self.fat_size_32
            ));
        }
        if self.boot_signature != BOOT_SIGNATURE {
            warnings.push(format!(
                "Boot signature is {:02X}{:02X}, expected 55AA",
                self.boot_signature[0], self.boot_signature[1]
            ));
        }

        warnings
    }
}
