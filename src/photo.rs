//! Photo definitions

use std::path::{Path, PathBuf};

use time::OffsetDateTime;

use crate::GeoSample;

/// A photo with its capture time, already shifted to UTC
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub path: PathBuf,
    pub time: OffsetDateTime,
}

impl Photo {
    pub fn new(path: impl Into<PathBuf>, time: OffsetDateTime) -> Self {
        Self {
            path: path.into(),
            time,
        }
    }

    /// File name without the directory, used to label the waypoint
    pub fn short_name(&self) -> String {
        short_name(&self.path)
    }
}

pub(crate) fn short_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => path.to_string_lossy().to_string(),
    }
}

/// A photo and the position found for it
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoAssociation {
    pub photo: Photo,
    pub sample: GeoSample,
}
