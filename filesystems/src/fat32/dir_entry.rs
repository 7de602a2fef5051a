// 8.3 directory entries
// The 32-byte short entry codec and the restricted 8.3 filename form this
// tool accepts (alphanumeric plus '-' and '_', always uppercase)

use fatmod_core::FatmodError;

use super::constants::*;

fn is_valid_83_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_'
}

/// Decode one space-padded name field, stopping at padding or at the first
/// byte outside the accepted character set.
fn decode_part(part: &[u8]) -> String {
    let mut out = String::new();
    for &b in part {
        if !is_valid_83_char(b) {
            break;
        }
        out.push(b as char);
    }
    out
}

/// A validated 8.3 filename, uppercased and space padded for storage.
#[derive(Debug, Clone, PartialEq)]
pub struct FileName {
    pub base: [u8; 8],
    pub ext: [u8; 3],
}

impl FileName {
    /// Parse and validate a user-supplied name. Lowercase input is folded to
    /// uppercase; anything outside the accepted 8.3 form is rejected.
    pub fn parse(input: &str) -> Result<Self, FatmodError> {
        if input.is_empty() {
            return Err(FatmodError::InvalidName("empty name".to_string()));
        }
        if input.starts_with('.') || input.ends_with('.') {
            return Err(FatmodError::InvalidName(format!(
                "{}: leading or trailing dot",
                input
            )));
        }

        let mut parts = input.splitn(2, '.');
        let base_str = parts.next().unwrap_or("");
        let ext_str = parts.next().unwrap_or("");

        if base_str.is_empty() || base_str.len() > 8 {
            return Err(FatmodError::InvalidName(format!(
                "{}: base name must be 1 to 8 characters",
                input
            )));
        }
        if ext_str.len() > 3 {
            return Err(FatmodError::InvalidName(format!(
                "{}: extension must be at most 3 characters",
                input
            )));
        }

        let mut base = [b' '; 8];
        for (i, b) in base_str.bytes().enumerate() {
            let upper = b.to_ascii_uppercase();
            if !is_valid_83_char(upper) {
                return Err(FatmodError::InvalidName(format!(
                    "{}: character {:?} is not allowed",
                    input, b as char
                )));
            }
            base[i] = upper;
        }

        let mut ext = [b' '; 3];
        for (i, b) in ext_str.bytes().enumerate() {
            let upper = b.to_ascii_uppercase();
            if !is_valid_83_char(upper) {
                return Err(FatmodError::InvalidName(format!(
                    "{}: character {:?} is not allowed",
                    input, b as char
                )));
            }
            ext[i] = upper;
        }

        Ok(FileName { base, ext })
    }

    /// Canonical display form, `BASE.EXT` or just `BASE`.
    pub fn display(&self) -> String {
        let base = decode_part(&self.base);
        let ext = decode_part(&self.ext);
        if ext.is_empty() {
            base
        } else {
            format!("{}.{}", base, ext)
        }
    }
}

/// In-memory form of the 32-byte FAT directory entry.
#[derive(Debug, Clone, PartialEq)]
pub struct DirEntry {
    pub name: [u8; 8],           // 0x00: base name, space padded
    pub ext: [u8; 3],            // 0x08: extension, space padded
    pub attributes: u8,          // 0x0B
    pub nt_reserved: u8,         // 0x0C
    pub creation_time_tenth: u8, // 0x0D: creation time, tenths of a second
    pub creation_time: u16,      // 0x0E
    pub creation_date: u16,      // 0x10
    pub last_access_date: u16,   // 0x12
    pub first_cluster_hi: u16,   // 0x14: high word of first cluster
    pub write_time: u16,         // 0x16
    pub write_date: u16,         // 0x18
    pub first_cluster_lo: u16,   // 0x1A: low word of first cluster
    pub file_size: u32,          // 0x1C: size in bytes
}

impl DirEntry {
    /// Decode a raw 32-byte slot.
    pub fn decode(raw: &[u8; DIR_ENTRY_SIZE]) -> Self {
        let mut name = [0u8; 8];
        name.copy_from_slice(&raw[0x00..0x08]);
        let mut ext = [0u8; 3];
        ext.copy_from_slice(&raw[0x08..0x0B]);

        DirEntry {
            name,
            ext,
            attributes: raw[0x0B],
            nt_reserved: raw[0x0C],
            creation_time_tenth: raw[0x0D],
            creation_time: u16::from_le_bytes([raw[0x0E], raw[0x0F]]),
            creation_date: u16::from_le_bytes([raw[0x10], raw[0x11]]),
            last_access_date: u16::from_le_bytes([raw[0x12], raw[0x13]]),
            first_cluster_hi: u16::from_le_bytes([raw[0x14], raw[0x15]]),
            write_time: u16::from_le_bytes([raw[0x16], raw[0x17]]),
            write_date: u16::from_le_bytes([raw[0x18], raw[0x19]]),
            first_cluster_lo: u16::from_le_bytes([raw[0x1A], raw[0x1B]]),
            file_size: u32::from_le_bytes([raw[0x1C], raw[0x1D], raw[0x1E], raw[0x1F]]),
        }
    }

    /// Encode back into the on-disk 32-byte form.
    pub fn encode(&self) -> [u8; DIR_ENTRY_SIZE] {
        let mut raw = [0u8; DIR_ENTRY_SIZE];
        raw[0x00..0x08].copy_from_slice(&self.name);
        raw[0x08..0x0B].copy_from_slice(&self.ext);
        raw[0x0B] = self.attributes;
        raw[0x0C] = self.nt_reserved;
        raw[0x0D] = self.creation_time_tenth;
        raw[0x0E..0x10].copy_from_slice(&self.creation_time.to_le_bytes());
        raw[0x10..0x12].copy_from_slice(&self.creation_date.to_le_bytes());
        raw[0x12..0x14].copy_from_slice(&self.last_access_date.to_le_bytes());
        raw[0x14..0x16].copy_from_slice(&self.first_cluster_hi.to_le_bytes());
        raw[0x16..0x18].copy_from_slice(&self.write_time.to_le_bytes());
        raw[0x18..0x1A].copy_from_slice(&self.write_date.to_le_bytes());
        raw[0x1A..0x1C].copy_from_slice(&self.first_cluster_lo.to_le_bytes());
        raw[0x1C..0x20].copy_from_slice(&self.file_size.to_le_bytes());
        raw
    }

    /// A fresh zero-length regular file. Every field outside the name, the
    /// attribute, and the timestamps is zeroed, so a reused tombstone slot
    /// carries nothing over from its previous occupant.
    pub fn new_file(name: &FileName) -> Self {
        let (date, time) = super::timestamps::now();
        DirEntry {
            name: name.base,
            ext: name.ext,
            attributes: ATTR_ARCHIVE,
            nt_reserved: 0,
            creation_time_tenth: 0,
            creation_time: time,
            creation_date: date,
            last_access_date: date,
            first_cluster_hi: 0,
            write_time: time,
            write_date: date,
            first_cluster_lo: 0,
            file_size: 0,
        }
    }

    pub fn first_cluster(&self) -> u32 {
        ((self.first_cluster_hi as u32) << 16) | self.first_cluster_lo as u32
    }

    pub fn set_first_cluster(&mut self, cluster: u32) {
        self.first_cluster_hi = (cluster >> 16) as u16;
        self.first_cluster_lo = cluster as u16;
    }

    /// Slot is available for a new entry: never used or tombstoned.
    pub fn is_free_slot(&self) -> bool {
        self.name[0] == ENTRY_FREE || self.name[0] == ENTRY_DELETED
    }

    pub fn is_long_name(&self) -> bool {
        self.attributes & ATTR_LONG_NAME == ATTR_LONG_NAME
    }

    pub fn is_volume_label(&self) -> bool {
        !self.is_long_name() && self.attributes & ATTR_VOLUME_ID != 0
    }

    pub fn is_directory(&self) -> bool {
        self.attributes & ATTR_DIRECTORY != 0
    }

    /// Decoded `BASE.EXT` form of the stored name.
    pub fn display_name(&self) -> String {
        let base = decode_part(&self.name);
        let ext = decode_part(&self.ext);
        if ext.is_empty() {
            base
        } else {
            format!("{}.{}", base, ext)
        }
    }
}
