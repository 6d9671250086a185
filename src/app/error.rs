use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("Failed to create directory {}", .path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to write file {}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Duplicate output path: {}", .0.display())]
    DuplicatePath(PathBuf),
    #[error("Output path must be relative and stay inside the base directory: {}", .0.display())]
    InvalidPath(PathBuf),
}
