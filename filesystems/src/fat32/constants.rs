// FAT32 on-disk constants
// Boot sector field offsets, FAT entry sentinels, directory entry attributes,
// and the fixed geometry this tool targets

// BPB field offsets within the boot sector
pub const BPB_BYTES_PER_SEC: usize = 0x0B; // u16: bytes per sector
pub const BPB_SEC_PER_CLUS: usize = 0x0D; // u8: sectors per cluster
pub const BPB_RSVD_SEC_CNT: usize = 0x0E; // u16: reserved sectors
pub const BPB_NUM_FATS: usize = 0x10; // u8: number of FATs
pub const BPB_TOT_SEC16: usize = 0x13; // u16: total sectors (small volumes)
pub const BPB_FAT_SZ16: usize = 0x16; // u16: sectors per FAT (FAT12/16)
pub const BPB_TOT_SEC32: usize = 0x20; // u32: total sectors (large volumes)
pub const BPB_FAT_SZ32: usize = 0x24; // u32: sectors per FAT (FAT32)
pub const BPB_ROOT_CLUS: usize = 0x2C; // u32: first cluster of the root directory
pub const BS32_VOL_LAB: usize = 0x47; // [u8; 11]: volume label
pub const BOOT_SIGNATURE_OFFSET: usize = 0x1FE;
pub const BOOT_SIGNATURE: [u8; 2] = [0x55, 0xAA];

// FAT32 entry values. Entries are 32 bits on disk but only the low 28 bits
// are significant; the top nibble is preserved by the firmware and ignored.
pub const FAT32_ENTRY_MASK: u32 = 0x0FFF_FFFF;
pub const FAT32_FREE: u32 = 0x0000_0000;
pub const FAT32_RESERVED_MIN: u32 = 0x0FFF_FFF0; // 0x0FFFFFF0..=0x0FFFFFF6 reserved
pub const FAT32_BAD: u32 = 0x0FFF_FFF7;
pub const FAT32_EOC: u32 = 0x0FFF_FFF8; // end-of-chain threshold, also the value written

// Directory entry attributes
pub const ATTR_READ_ONLY: u8 = 0x01;
pub const ATTR_HIDDEN: u8 = 0x02;
pub const ATTR_SYSTEM: u8 = 0x04;
pub const ATTR_VOLUME_ID: u8 = 0x08;
pub const ATTR_DIRECTORY: u8 = 0x10;
pub const ATTR_ARCHIVE: u8 = 0x20;
pub const ATTR_LONG_NAME: u8 = ATTR_READ_ONLY | ATTR_HIDDEN | ATTR_SYSTEM | ATTR_VOLUME_ID;

// Directory entry markers
pub const DIR_ENTRY_SIZE: usize = 32;
pub const ENTRY_FREE: u8 = 0x00; // slot never used, ends the directory
pub const ENTRY_DELETED: u8 = 0xE5; // slot tombstoned, reusable

// The fixed geometry this tool targets. A volume that deviates still opens,
// with warnings; all offset arithmetic uses the decoded fields regardless.
pub const EXPECTED_BYTES_PER_SECTOR: u16 = 512;
pub const EXPECTED_SECTORS_PER_CLUSTER: u8 = 2;
pub const EXPECTED_RESERVED_SECTORS: u16 = 32;
pub const EXPECTED_NUM_FATS: u8 = 1;
pub const EXPECTED_ROOT_CLUSTER: u32 = 2;
