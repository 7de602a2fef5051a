// fatmod filesystem engine
// Edits a FAT32 volume image in place, without mounting it, through
// positioned sector and cluster I/O computed from the boot sector

pub mod fat32;

// Re-export the session type and the pieces callers name directly
pub use fat32::{dump_ascii, dump_hex, DirEntry, Fat32Volume, FileInfo, FileName};
