use std::fmt;

/// Errors that can occur while reading or writing media files.
#[derive(Debug)]
pub enum StorageError {
    /// Nothing is stored at the requested path.
    NotFound(String),
    /// The path is not a valid relative media path.
    InvalidPath(String),
    /// An I/O error occurred.
    Io(std::io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "media file not found: {path}"),
            Self::InvalidPath(msg) => write!(f, "invalid media path: {msg}"),
            Self::Io(err) => write!(f, "storage IO error: {err}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
