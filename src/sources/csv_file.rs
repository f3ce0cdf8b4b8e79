//! CSV file source integration

use std::io::Read;

use csv::{Reader, StringRecord};
use log::{debug, warn};

use super::{FieldsConfiguration, SampleSource};
use crate::{GeoSample, GeotagError, RawSample};

/// CSV tracklog source, one sample per row
pub struct CsvSource<T>
where
    T: Read,
{
    rdr: Reader<T>,
    fields: FieldsConfiguration,
}

impl<T> CsvSource<T>
where
    T: Read,
{
    pub fn new(rdr: Reader<T>, fields: Option<FieldsConfiguration>) -> Self {
        Self {
            rdr,
            fields: fields.unwrap_or_default(),
        }
    }
}

impl<T> SampleSource for CsvSource<T>
where
    T: Read,
{
    fn fetch(&mut self) -> Result<Vec<GeoSample>, GeotagError> {
        let mut samples = vec![];

        let mut header = self
            .rdr
            .headers()
            .map_err(|e| GeotagError::Track(format!("Failed on read the header: {}", e)))?
            .clone();
        let header_idx = parse_header(&self.fields, &mut header)?;

        for row in self.rdr.byte_records() {
            let brec =
                row.map_err(|e| GeotagError::Track(format!("Failed on read some row: {}", e)))?;

            let mut rec = match StringRecord::from_byte_record(brec) {
                Ok(rec) => rec,
                Err(e) => {
                    warn!("Skipping row: {}", e);
                    continue;
                }
            };
            rec.trim();

            if rec.iter().all(|f| f.is_empty()) {
                continue;
            }

            match GeoSample::try_from(parse_row(&header_idx, &rec)) {
                Ok(sample) => samples.push(sample),
                Err(e) => warn!("Skipping row {:?}: {}", rec, e),
            }
        }

        debug!("{} samples read from the CSV", samples.len());

        Ok(samples)
    }
}

/// Field to index map
#[derive(Debug)]
struct FieldsIndex {
    time: usize,
    lat: usize,
    lon: usize,
    elevation: usize,
}

fn parse_header(
    fields: &FieldsConfiguration,
    header: &mut StringRecord,
) -> Result<FieldsIndex, GeotagError> {
    header.trim();

    let find = |name: &str, label: &str| {
        header
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| GeotagError::Track(format!("{} header `{}` not found", label, name)))
    };

    Ok(FieldsIndex {
        time: find(fields.time.as_str(), "Time")?,
        lat: find(fields.lat.as_str(), "Latitude")?,
        lon: find(fields.lon.as_str(), "Longitude")?,
        elevation: find(fields.elevation.as_str(), "Elevation")?,
    })
}

fn parse_row(header: &FieldsIndex, row: &StringRecord) -> RawSample {
    let get = |idx: usize| row.get(idx).unwrap_or_default().to_string();

    RawSample {
        time: get(header.time),
        lat: get(header.lat),
        lon: get(header.lon),
        ele: get(header.elevation),
    }
}
