// Test support: builds scratch FAT32 images in the fixed geometry fatmod
// targets (512-byte sectors, 2-sector clusters, 32 reserved sectors, one
// FAT, root directory in cluster 2)

use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use fatmod_filesystems::Fat32Volume;

pub const BYTES_PER_SECTOR: u16 = 512;
pub const SECTORS_PER_CLUSTER: u8 = 2;
pub const RESERVED_SECTORS: u16 = 32;
pub const NUM_FATS: u8 = 1;
pub const SECTORS_PER_FAT: u32 = 8;
pub const ROOT_CLUSTER: u32 = 2;
pub const CLUSTER_SIZE: u32 = BYTES_PER_SECTOR as u32 * SECTORS_PER_CLUSTER as u32;

/// Total sectors for the standard 1 MiB test volume: 1004 data clusters.
pub const TOTAL_SECTORS: u32 = 2048;

/// Total sectors for the tiny volume: 4 data clusters, of which the root
/// takes one, leaving exactly 3 allocatable.
pub const TINY_TOTAL_SECTORS: u32 = 48;

/// Write a freshly formatted FAT32 volume image at `path`.
pub fn format_volume(path: &Path, total_sectors: u32) {
    let mut boot = [0u8; 512];

    // Jump, OEM name, and the BPB fields fatmod decodes
    boot[0] = 0xEB;
    boot[1] = 0x58;
    boot[2] = 0x90;
    boot[3..11].copy_from_slice(b"MSWIN4.1");
    boot[11..13].copy_from_slice(&BYTES_PER_SECTOR.to_le_bytes());
    boot[13] = SECTORS_PER_CLUSTER;
    boot[14..16].copy_from_slice(&RESERVED_SECTORS.to_le_bytes());
    boot[16] = NUM_FATS;
    boot[21] = 0xF8; // media descriptor: fixed disk
    boot[22..24].copy_from_slice(&(SECTORS_PER_FAT as u16).to_le_bytes());
    boot[24..26].copy_from_slice(&63u16.to_le_bytes()); // sectors per track
    boot[26..28].copy_from_slice(&255u16.to_le_bytes()); // heads
    boot[32..36].copy_from_slice(&total_sectors.to_le_bytes());
    boot[36..40].copy_from_slice(&SECTORS_PER_FAT.to_le_bytes());
    boot[44..48].copy_from_slice(&ROOT_CLUSTER.to_le_bytes());
    boot[48..50].copy_from_slice(&1u16.to_le_bytes()); // FSInfo sector
    boot[50..52].copy_from_slice(&6u16.to_le_bytes()); // backup boot sector
    boot[64] = 0x80; // drive number
    boot[66] = 0x29; // extended boot signature
    boot[67..71].copy_from_slice(&0x1234_5678u32.to_le_bytes()); // volume id
    boot[71..82].copy_from_slice(b"FATMOD TEST");
    boot[82..90].copy_from_slice(b"FAT32   ");
    boot[510] = 0x55;
    boot[511] = 0xAA;

    // FAT: media entry, reserved entry, and the root directory chain
    let mut fat = vec![0u8; (SECTORS_PER_FAT * BYTES_PER_SECTOR as u32) as usize];
    fat[0..4].copy_from_slice(&0x0FFF_FFF8u32.to_le_bytes());
    fat[4..8].copy_from_slice(&0x0FFF_FFFFu32.to_le_bytes());
    fat[8..12].copy_from_slice(&0x0FFF_FFFFu32.to_le_bytes());

    // Root directory cluster: zeroed, volume label in slot 0
    let mut root = vec![0u8; CLUSTER_SIZE as usize];
    root[0..11].copy_from_slice(b"FATMOD TEST");
    root[11] = 0x08; // volume label attribute

    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .expect("should create test image");

    file.write_all(&boot).expect("boot sector write");
    file.seek(SeekFrom::Start(RESERVED_SECTORS as u64 * BYTES_PER_SECTOR as u64))
        .expect("seek to FAT");
    file.write_all(&fat).expect("FAT write");
    let data_start = (RESERVED_SECTORS as u64 + SECTORS_PER_FAT as u64) * BYTES_PER_SECTOR as u64;
    file.seek(SeekFrom::Start(data_start)).expect("seek to data");
    file.write_all(&root).expect("root cluster write");
    file.set_len(total_sectors as u64 * BYTES_PER_SECTOR as u64)
        .expect("extend image");
    file.sync_all().expect("sync test image");
}

fn open_volume(total_sectors: u32) -> (NamedTempFile, Fat32Volume) {
    let _ = env_logger::builder().is_test(true).try_init();
    let image = NamedTempFile::new().expect("should create temp file");
    format_volume(image.path(), total_sectors);
    let volume = Fat32Volume::open(image.path()).expect("should open test volume");
    (image, volume)
}

/// A 1 MiB volume with plenty of room.
pub fn new_test_volume() -> (NamedTempFile, Fat32Volume) {
    open_volume(TOTAL_SECTORS)
}

/// A volume with only 3 allocatable clusters, for exhaustion tests.
pub fn tiny_test_volume() -> (NamedTempFile, Fat32Volume) {
    open_volume(TINY_TOTAL_SECTORS)
}
