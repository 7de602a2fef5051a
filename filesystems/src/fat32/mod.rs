// FAT32 engine
// Boot sector geometry, derived volume layout, FAT chain access, the 8.3
// directory entry codec, and the file operations built on top of them

pub mod boot_sector;
pub mod constants;
pub mod dir_entry;
pub mod fat_table;
pub mod file_ops;
pub mod io;
pub mod layout;
pub mod root_dir;
pub mod timestamps;
pub mod volume;

pub use dir_entry::{DirEntry, FileName};
pub use file_ops::{dump_ascii, dump_hex};
pub use root_dir::FileInfo;
pub use volume::Fat32Volume;
