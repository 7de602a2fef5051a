// FAT32 volume session
// Owns the image handle, the parsed boot sector, and the derived layout.
// Geometry is read once at open; every operation is a method on this value.

use std::path::Path;

use fatmod_core::{DiskImage, FatmodError};
use log::{debug, info, warn};

use super::boot_sector::BootSector;
use super::layout::VolumeLayout;

/// An open FAT32 volume image.
pub struct Fat32Volume {
    pub(crate) image: DiskImage,
    pub(crate) boot: BootSector,
    pub(crate) layout: VolumeLayout,
}

impl Fat32Volume {
    /// Open an image file and decode its geometry from sector 0.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FatmodError> {
        let image = DiskImage::open(path)?;
        Self::from_image(image)
    }

    /// Build a session from an already-open image. Geometry mismatches
    /// against the targeted configuration are logged as warnings only.
    pub fn from_image(mut image: DiskImage) -> Result<Self, FatmodError> {
        // The sector size is not known until the boot sector is decoded, so
        // the first read is a fixed 512 bytes.
        let mut sector = [0u8; 512];
        image.read_exact_at(0, &mut sector)?;

        let boot = BootSector::parse(&sector);
        for warning in boot.validate() {
            warn!("{}", warning);
        }

        let layout = VolumeLayout::from_boot_sector(&boot)?;
        let label = boot.volume_label_string();
        if !label.is_empty() {
            debug!("Volume label: {}", label);
        }
        info!(
            "Opened FAT32 volume: {} bytes/sector, {} sectors/cluster, FAT at {:#x}, data at {:#x}, {} usable clusters",
            boot.bytes_per_sector,
            boot.sectors_per_cluster,
            layout.fat_offset,
            layout.data_offset,
            layout.usable_clusters
        );

        Ok(Fat32Volume { image, boot, layout })
    }

    pub fn layout(&self) -> &VolumeLayout {
        &self.layout
    }

    pub fn boot_sector(&self) -> &BootSector {
        &self.boot
    }
}
