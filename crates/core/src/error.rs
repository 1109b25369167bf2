use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("EXIF parsing error: {0}")]
    Exif(#[from] exif::Error),

    #[error("walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("asset root does not exist: {}", .0.display())]
    AssetRootNotFound(PathBuf),

    #[error("asset root is not a directory: {}", .0.display())]
    AssetRootNotDirectory(PathBuf),

    #[error("unknown gallery: {0}")]
    UnknownGallery(String),

    #[error("gallery declared twice in config: {0}")]
    DuplicateGallery(String),

    #[error("gallery `{0}` is private; unlock it with the site password first")]
    GalleryLocked(String),

    #[error("gate digest must be 64 hex characters, got {0:?}")]
    InvalidDigest(String),
}

pub type Result<T> = std::result::Result<T, Error>;
