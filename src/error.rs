//! Error types for the segmentation pipeline.
//!
//! Input and detection failures abort a run before any artifact is written.
//! Per-cell identity problems are not errors: they are logged and the cell is
//! skipped (see [`crate::cells::order`]).

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Reason grid detection gave up on an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionFailure {
    /// The line detector returned fewer segments than required.
    InsufficientLines { found: usize, required: usize },
    /// Clustering produced fewer than two vertical or horizontal lines.
    InsufficientGrid { xs: usize, ys: usize },
}

impl fmt::Display for DetectionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionFailure::InsufficientLines { found, required } => write!(
                f,
                "insufficient_lines: found {found} line segments, need at least {required}; image too noisy or faint"
            ),
            DetectionFailure::InsufficientGrid { xs, ys } => write!(
                f,
                "insufficient_grid: {xs} vertical and {ys} horizontal grid lines after clustering, need at least 2 of each"
            ),
        }
    }
}

/// Errors surfaced by the library.
#[derive(Debug, Error)]
pub enum GridError {
    /// The source image does not exist.
    #[error("input image {} not found", path.display())]
    InputMissing { path: PathBuf },

    /// The source image exists but could not be decoded.
    #[error("failed to decode input image {}", path.display())]
    InputDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Grid detection could not recover a usable grid.
    #[error("grid detection failed: {0}")]
    Detection(DetectionFailure),

    /// Parameters outside their documented range, or a malformed buffer.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Filesystem failure while reading config or writing artifacts.
    #[error("i/o failure on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An artifact image could not be encoded.
    #[error("failed to encode {}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("json serialization failed")]
    Json(#[from] serde_json::Error),

    /// Failure reported by an external cell classifier.
    #[error("cell classifier failed")]
    Classifier(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl GridError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GridError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        GridError::Config(message.into())
    }

    /// True for missing or undecodable source images.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            GridError::InputMissing { .. } | GridError::InputDecode { .. }
        )
    }

    pub fn is_detection_error(&self) -> bool {
        matches!(self, GridError::Detection(_))
    }

    /// Returns the detection failure, if that is what this error is.
    pub fn detection_failure(&self) -> Option<DetectionFailure> {
        match self {
            GridError::Detection(failure) => Some(*failure),
            _ => None,
        }
    }
}

pub type Result<T, E = GridError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_messages_name_the_failure_kind() {
        let err = GridError::Detection(DetectionFailure::InsufficientLines {
            found: 3,
            required: 10,
        });
        let msg = err.to_string();
        assert!(msg.contains("insufficient_lines"), "{msg}");
        assert!(msg.contains('3'));
        assert!(!err.is_input_error());
        assert!(err.is_detection_error());
        assert!(err.detection_failure().is_some());

        let err = GridError::Detection(DetectionFailure::InsufficientGrid { xs: 1, ys: 4 });
        assert!(err.to_string().contains("insufficient_grid"));
    }

    #[test]
    fn missing_input_is_an_input_error() {
        let err = GridError::InputMissing {
            path: PathBuf::from("nope.png"),
        };
        assert!(err.is_input_error());
        assert!(err.to_string().contains("nope.png"));
        assert_eq!(err.detection_failure(), None);
    }
}
