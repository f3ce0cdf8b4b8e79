//! Error types

use std::path::PathBuf;

#[derive(Debug)]
pub enum GeotagError {
    /// A raw track sample with a missing or unparsable field. Skipped by sources.
    MalformedSample { field: &'static str, reason: String },
    /// The track source as a whole can't be read
    Track(String),
    /// A single photo can't be used: unreadable, no timestamp...
    Photo { path: PathBuf, reason: String },
    /// The metadata writer failed for a photo
    Sink { path: PathBuf, reason: String },
    Io(std::io::Error),
}

impl GeotagError {
    pub fn malformed(field: &'static str, reason: impl ToString) -> Self {
        Self::MalformedSample {
            field,
            reason: reason.to_string(),
        }
    }

    pub fn photo(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Photo {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for GeotagError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedSample { field, reason } => {
                write!(f, "Malformed sample, field `{field}`: {reason}")
            }
            Self::Track(reason) => write!(f, "Track error: {reason}"),
            Self::Photo { path, reason } => write!(f, "Photo {}: {reason}", path.display()),
            Self::Sink { path, reason } => {
                write!(f, "Failed on update {}: {reason}", path.display())
            }
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for GeotagError {}

impl From<std::io::Error> for GeotagError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<gpx::errors::GpxError> for GeotagError {
    fn from(e: gpx::errors::GpxError) -> Self {
        Self::Track(e.to_string())
    }
}
