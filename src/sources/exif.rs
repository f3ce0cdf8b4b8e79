//! Photo times from the EXIF metadata

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use rexiv2::Metadata;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

use super::PhotoSource;
use crate::{GeotagError, Photo};

/// Capture time tags, by preference
const TIME_TAGS: [&str; 2] = ["Exif.Photo.DateTimeOriginal", "Exif.Image.DateTime"];

/// Reads the capture time of each photo with exiv2
pub struct ExifReader {
    files: Vec<PathBuf>,
    /// Added to the camera times, which have no zone information
    time_offset: Duration,
}

impl ExifReader {
    /// The files are processed sorted by path
    pub fn new(mut files: Vec<PathBuf>) -> Self {
        files.sort();

        Self {
            files,
            time_offset: Duration::ZERO,
        }
    }

    /// Hours to add to the camera times to reach UTC
    pub fn time_offset(&mut self, hours: i64) -> &mut Self {
        self.time_offset = Duration::hours(hours);

        self
    }

    fn read(&self, path: &Path) -> Result<Photo, GeotagError> {
        let exif = Metadata::new_from_path(path)
            .map_err(|e| GeotagError::photo(path, format!("Failed on read the EXIF: {}", e)))?;

        let raw = TIME_TAGS
            .iter()
            .filter(|tag| exif.has_tag(tag))
            .find_map(|tag| exif.get_tag_string(tag).ok())
            .ok_or_else(|| GeotagError::photo(path, "No usable time data"))?;

        let time = parse_photo_time(&raw).map_err(|e| GeotagError::photo(path, e))?;
        debug!("{}: taken at {}", path.display(), time);

        Ok(Photo::new(path, time + self.time_offset))
    }
}

impl PhotoSource for ExifReader {
    fn fetch(&mut self) -> Vec<Result<Photo, GeotagError>> {
        if let Err(e) = rexiv2::initialize() {
            warn!("Failed on initialize exiv2: {}", e);
        }

        self.files.iter().map(|f| self.read(f)).collect()
    }
}

/// Camera time, `YYYY:MM:DD HH:MM:SS`, taken as UTC
pub fn parse_photo_time(raw: &str) -> Result<OffsetDateTime, String> {
    let format = format_description!("[year]:[month]:[day] [hour]:[minute]:[second]");

    PrimitiveDateTime::parse(raw.trim(), format)
        .map(|t| t.assume_utc())
        .map_err(|e| format!("Failed on parse the time `{}`: {}", raw, e))
}

/// The `.jpg` files of a directory, sorted
pub fn jpegs_in_dir(dir: &Path) -> Result<Vec<PathBuf>, GeotagError> {
    let mut files = vec![];

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        let is_jpeg = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("jpg"))
            .unwrap_or(false);

        if is_jpeg && path.is_file() {
            files.push(path);
        }
    }

    files.sort();

    Ok(files)
}

#[cfg(test)]
pub mod tests {
    use std::fs;

    use time::macros::datetime;

    use super::{jpegs_in_dir, parse_photo_time, ExifReader};
    use crate::{GeotagError, PhotoSource};

    #[test]
    fn photo_time() -> Result<(), String> {
        assert_eq!(datetime!(2006-08-04 12:01:06 UTC), parse_photo_time("2006:08:04 12:01:06")?);
        assert_eq!(datetime!(2006-08-04 12:01:06 UTC), parse_photo_time(" 2006:08:04 12:01:06 ")?);
        assert!(parse_photo_time("2006-08-04T12:01:06").is_err());
        assert!(parse_photo_time("").is_err());

        Ok(())
    }

    #[test]
    fn unreadable_photos_are_per_photo() -> Result<(), String> {
        let dir = std::env::temp_dir().join(format!("photo2gpx-exif-{}", std::process::id()));
        fs::create_dir_all(&dir).map_err(|e| e.to_string())?;
        fs::write(dir.join("a.jpg"), b"not a jpeg").map_err(|e| e.to_string())?;

        let mut reader = ExifReader::new(vec![dir.join("missing.jpg"), dir.join("a.jpg")]);
        reader.time_offset(-3);
        let photos = reader.fetch();

        fs::remove_dir_all(&dir).map_err(|e| e.to_string())?;

        assert_eq!(2, photos.len());
        match &photos[0] {
            Err(GeotagError::Photo { path, .. }) => assert_eq!(&dir.join("a.jpg"), path),
            other => panic!("Expected a photo error, got {:?}", other),
        }
        match &photos[1] {
            Err(GeotagError::Photo { path, .. }) => assert_eq!(&dir.join("missing.jpg"), path),
            other => panic!("Expected a photo error, got {:?}", other),
        }

        Ok(())
    }

    #[test]
    fn jpeg_listing() -> Result<(), String> {
        let dir = std::env::temp_dir().join(format!("photo2gpx-list-{}", std::process::id()));
        fs::create_dir_all(dir.join("nested.jpg")).map_err(|e| e.to_string())?;
        for name in ["b.JPG", "a.jpg", "c.png", "notes.txt"] {
            fs::write(dir.join(name), b"").map_err(|e| e.to_string())?;
        }

        let files = jpegs_in_dir(&dir).map_err(|e| e.to_string());
        fs::remove_dir_all(&dir).map_err(|e| e.to_string())?;

        assert_eq!(vec![dir.join("a.jpg"), dir.join("b.JPG")], files?);

        Ok(())
    }
}
