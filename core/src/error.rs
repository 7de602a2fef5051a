use thiserror::Error;

#[derive(Debug, Error)]
pub enum FatmodError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Root directory is full")]
    DirectoryFull,

    #[error("No free clusters available")]
    DiskFull,

    #[error("Invalid filename: {0}")]
    InvalidName(String),

    #[error("Write offset {offset} is beyond the end of the file (size {size})")]
    InvalidOffset { offset: u64, size: u32 },

    #[error("Invalid cluster number: {0}")]
    InvalidCluster(u32),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Other error: {0}")]
    Other(String),
}
