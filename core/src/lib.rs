pub mod error;
pub mod image;

pub use error::FatmodError;
pub use image::DiskImage;
