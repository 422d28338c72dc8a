use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by file and configuration operations.
///
/// A dismissed dialog is not an error: collaborators report it as `None`
/// and the triggering action becomes a no-op.
#[derive(Debug, Error)]
pub enum PaintError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported image format for {}: {reason}", path.display())]
    UnsupportedFormat { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for fallible paint operations
pub type PaintResult<T> = Result<T, PaintError>;

impl PaintError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn unsupported(path: &Path, reason: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Sort an `image` crate failure into the I/O or format bucket.
    pub fn from_image(path: &Path, err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(source) => Self::io(path, source),
            other => Self::unsupported(path, other.to_string()),
        }
    }

    /// Short label for the status line.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io { .. } => "I/O error",
            Self::UnsupportedFormat { .. } => "Unsupported format",
            Self::Config(_) => "Configuration error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_io_error_maps_to_io() {
        let err = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let mapped = PaintError::from_image(Path::new("a.png"), err);
        assert!(matches!(mapped, PaintError::Io { .. }));
        assert_eq!(mapped.kind(), "I/O error");
    }

    #[test]
    fn test_display_names_the_path() {
        let err = PaintError::unsupported(Path::new("picture.xyz"), "unknown extension");
        assert!(err.to_string().contains("picture.xyz"));
    }
}
