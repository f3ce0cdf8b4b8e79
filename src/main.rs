//! photo2gpx cli - Geotag photos from a GPS tracklog

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use argopt::{cmd_group, subcmd};
use csv::ReaderBuilder;
use log::{info, LevelFilter};
use serde::Deserialize;

use photo2gpx::sources::{jpegs_in_dir, CsvSource, ExifReader, GpxSource};
use photo2gpx::{
    Exiv2Writer, FieldsConfiguration, Geotagger, MatchOptions, PositionSink, SampleSource,
    WaypointGenerator,
};

/// CLI of photo2gpx - Locate your photos on a GPS tracklog and export them as GPX waypoints
#[cmd_group(commands = [gpx, csv])]
fn main() -> Result<(), String> {}

/// Geotag photos from a GPX tracklog
#[subcmd]
fn gpx(
    /// GPX tracklog
    track_path: String,
    /// Photo files, when no directory is provided
    files: Vec<String>,
    /// Directory of .jpg photos
    #[opt(short, long)]
    photos: Option<String>,
    /// Hours to add to the photo times, which have no zone information
    #[opt(short, long)]
    timediff: Option<i64>,
    /// GPX path file destination. Default: stdout
    #[opt(short, long)]
    output: Option<String>,
    /// Write the position into the photos EXIF
    #[opt(short, long)]
    update_photos: bool,
    /// Interpolate between the track points around the photo time
    #[opt(short, long)]
    interpolate: bool,
    /// Max seconds between the photo and a track point, negative for no limit
    #[opt(long)]
    threshold: Option<i64>,
    /// Matching configuration. Default: .photo2gpx.yaml, ~/.photo2gpx.yaml
    #[opt(long)]
    config: Option<String>,
    /// Debug logging
    #[opt(short, long)]
    verbose: bool,
) -> Result<(), String> {
    init_logging(verbose);

    let track = File::open(&track_path)
        .map_err(|e| format!("Failed on open the GPX file: {}", e.to_string()))?;

    let conf = load_configs(config);
    let options = merge_options(conf.matching, timediff, interpolate, threshold);

    let source = GpxSource::new(io::BufReader::new(track));

    run(source, options, photo_files(photos, files)?, output, update_photos)
}

/// Geotag photos from a CSV tracklog
#[subcmd]
fn csv(
    /// CSV tracklog, with time, lat, lon and elevation columns
    track_path: String,
    /// Photo files, when no directory is provided
    files: Vec<String>,
    /// Directory of .jpg photos
    #[opt(short, long)]
    photos: Option<String>,
    /// Hours to add to the photo times, which have no zone information
    #[opt(short, long)]
    timediff: Option<i64>,
    /// GPX path file destination. Default: stdout
    #[opt(short, long)]
    output: Option<String>,
    /// Write the position into the photos EXIF
    #[opt(short, long)]
    update_photos: bool,
    /// Interpolate between the track points around the photo time
    #[opt(short, long)]
    interpolate: bool,
    /// Max seconds between the photo and a track point, negative for no limit
    #[opt(long)]
    threshold: Option<i64>,
    /// Fields and matching configuration. Default: .photo2gpx.yaml, ~/.photo2gpx.yaml
    #[opt(long)]
    config: Option<String>,
    /// Debug logging
    #[opt(short, long)]
    verbose: bool,
) -> Result<(), String> {
    init_logging(verbose);

    let track = File::open(&track_path)
        .map_err(|e| format!("Failed on open the CSV file: {}", e.to_string()))?;
    let rcsv = ReaderBuilder::new().flexible(true).from_reader(track);

    let conf = load_configs(config);
    let options = merge_options(conf.matching, timediff, interpolate, threshold);

    let source = CsvSource::new(rcsv, Some(conf.fields));

    run(source, options, photo_files(photos, files)?, output, update_photos)
}

fn run<SO>(
    source: SO,
    options: MatchOptions,
    files: Vec<PathBuf>,
    output: Option<String>,
    update_photos: bool,
) -> Result<(), String>
where
    SO: SampleSource,
{
    let tagger = Geotagger::from_source(source, options.matcher())
        .map_err(|e| format!("Failed on read the tracklog: {}", e))?;
    info!("{} track points loaded", tagger.series().len());

    let mut reader = ExifReader::new(files);
    reader.time_offset(options.time_offset);

    let mut writer = Exiv2Writer::new();
    let sink: Option<&mut dyn PositionSink> = if update_photos {
        Some(&mut writer)
    } else {
        None
    };

    let report = tagger.run(reader, sink);
    info!(
        "{} photos located, {} without track points, {} failures",
        report.associations.len(),
        report.unmatched.len(),
        report.failures.len()
    );

    let doc = WaypointGenerator::new(report.associations).generate()?;

    let destination: Box<dyn Write> = match output {
        Some(path) => Box::new(
            File::create(path)
                .map_err(|e| format!("Failed on create the destination file: {}", e.to_string()))?,
        ),
        None => Box::new(io::stdout()),
    };

    let mut writer = BufWriter::new(destination);
    ::gpx::write(&doc, &mut writer).map_err(|e| e.to_string())?;
    writer.flush().map_err(|e| e.to_string())?;

    Ok(())
}

/// The .jpg files of the photos directory, or the given files
fn photo_files(photos: Option<String>, files: Vec<String>) -> Result<Vec<PathBuf>, String> {
    match photos {
        Some(dir) => jpegs_in_dir(Path::new(&dir))
            .map_err(|e| format!("Failed on list the photos: {}", e)),
        None => Ok(files.into_iter().map(PathBuf::from).collect()),
    }
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }

    // Logs go to stderr, stdout may be the GPX document
    builder.target(env_logger::Target::Stderr).init();
}

/// Command line flags win over the config file
fn merge_options(
    mut options: MatchOptions,
    timediff: Option<i64>,
    interpolate: bool,
    threshold: Option<i64>,
) -> MatchOptions {
    if let Some(hours) = timediff {
        options.time_offset = hours;
    }
    if interpolate {
        options.interpolate = true;
    }
    if let Some(secs) = threshold {
        options.threshold = secs;
    }

    options
}

/// Load the current config
fn load_configs(provided: Option<String>) -> Configs {
    let mut options = vec![];

    if let Some(sprovided) = provided {
        options.push(sprovided);
    }

    options.push(".photo2gpx.yaml".to_string());

    if let Some(home) = dirs::home_dir() {
        if let Some(shome) = home.to_str() {
            options.push(format!("{}/.photo2gpx.yaml", shome));
        }
    }

    let mut yaml: Option<String> = None;
    for fi in options {
        if let Ok(s) = fs::read_to_string(fi) {
            yaml = Some(s);
            break;
        }
    }

    if let Some(s) = yaml {
        match serde_yaml::from_str::<Configs>(&s) {
            Ok(conf) => return conf,
            Err(e) => log::warn!("Ignoring the config file: {}", e),
        }
    }

    Configs::default()
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct Configs {
    pub fields: FieldsConfiguration,
    pub matching: MatchOptions,
}

#[test]
fn parse_configs() -> Result<(), String> {
    let yaml = "\nfields:\nmatching:";

    let conf: Configs = serde_yaml::from_str(&yaml).map_err(|e| e.to_string())?;

    assert_eq!(Configs::default(), conf);
    assert_eq!(300, conf.matching.threshold);
    assert_eq!("elevation".to_string(), conf.fields.elevation);

    let yaml = "\nfields:\n  elevation: altitude\nmatching:\n  threshold: -1\n  interpolate: true";

    let conf: Configs = serde_yaml::from_str(&yaml).map_err(|e| e.to_string())?;

    assert_eq!(
        Configs {
            fields: FieldsConfiguration {
                time: "time".to_string(),
                lat: "lat".to_string(),
                lon: "lon".to_string(),
                elevation: "altitude".to_string(),
            },
            matching: MatchOptions {
                threshold: -1,
                interpolate: true,
                time_offset: 0,
            }
        },
        conf
    );

    Ok(())
}

#[test]
fn flags_override_configs() {
    let options = merge_options(MatchOptions::default(), Some(-3), true, Some(60));

    assert_eq!(
        MatchOptions {
            threshold: 60,
            interpolate: true,
            time_offset: -3,
        },
        options
    );

    let options = merge_options(options, None, false, None);
    assert_eq!(60, options.threshold);
    assert!(options.interpolate);
}

#[test]
fn photos_dir_or_files() -> Result<(), String> {
    let dir = std::env::temp_dir().join(format!("photo2gpx-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).map_err(|e| e.to_string())?;
    for name in ["IMG_0002.JPG", "IMG_0001.jpg", "track.gpx"] {
        fs::write(dir.join(name), b"").map_err(|e| e.to_string())?;
    }

    let from_dir = photo_files(
        Some(dir.to_string_lossy().to_string()),
        vec!["ignored.jpg".to_string()],
    );
    fs::remove_dir_all(&dir).map_err(|e| e.to_string())?;

    assert_eq!(vec![dir.join("IMG_0001.jpg"), dir.join("IMG_0002.JPG")], from_dir?);

    let given = photo_files(None, vec!["b.jpg".to_string(), "a.jpg".to_string()])?;
    assert_eq!(vec![PathBuf::from("b.jpg"), PathBuf::from("a.jpg")], given);

    assert!(photo_files(Some("/photo2gpx/no/such/dir".to_string()), vec![]).is_err());

    Ok(())
}
