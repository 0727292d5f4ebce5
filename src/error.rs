use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Core library errors
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Coarse classification of filesystem failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoErrorKind {
    NotFound,
    AccessDenied,
    Other,
}

impl From<io::ErrorKind> for IoErrorKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => IoErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => IoErrorKind::AccessDenied,
            _ => IoErrorKind::Other,
        }
    }
}

impl ExplorerError {
    /// Attach a path to an I/O error, picking the most specific variant.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match IoErrorKind::from(err.kind()) {
            IoErrorKind::NotFound => ExplorerError::PathNotFound(path.to_path_buf()),
            IoErrorKind::AccessDenied => ExplorerError::PermissionDenied(path.to_path_buf()),
            IoErrorKind::Other => ExplorerError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Filesystem error kind, if this error came from the filesystem.
    pub fn io_kind(&self) -> Option<IoErrorKind> {
        match self {
            ExplorerError::PathNotFound(_) => Some(IoErrorKind::NotFound),
            ExplorerError::PermissionDenied(_) => Some(IoErrorKind::AccessDenied),
            ExplorerError::Io { source, .. } => Some(IoErrorKind::from(source.kind())),
            ExplorerError::Config(_)
            | ExplorerError::InvalidPath(_)
            | ExplorerError::Serialization(_) => None,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ExplorerError>;
