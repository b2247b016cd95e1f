//! CSV dataset loading
//!
//! Reads the device dataset once into a [`Catalog`]. Header names are trimmed
//! before matching; any failure aborts the whole load, there is no partial
//! catalog.

use csv::StringRecord;
use mobidex_core::{Catalog, DeviceRecord, Error, Field, FieldKind, Result};
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Load the catalog from a CSV file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        Error::Initialization(format!("failed to open dataset {}: {}", path.display(), e))
    })?;

    info!("Loading dataset from {:?}", path);
    read_catalog(io::BufReader::new(file))
}

/// Read the catalog from any CSV source
pub fn read_catalog<R: io::Read>(source: R) -> Result<Catalog> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(source);

    let raw_headers = reader
        .headers()
        .map_err(|e| Error::Initialization(format!("failed to read headers: {}", e)))?
        .clone();
    let headers = normalize_headers(&raw_headers);
    check_required_columns(&headers)?;
    reader.set_headers(headers);

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<DeviceRecord>().enumerate() {
        // header is line 1
        let line = i + 2;
        let record = row.map_err(|e| Error::Initialization(format!("line {}: {}", line, e)))?;
        validate_record(&record, line)?;
        records.push(record);
    }

    info!("Loaded {} devices", records.len());
    Ok(Catalog::new(records))
}

/// Column name a shadowed camera column is renamed to
const SHADOWED_CAMERA_COLUMN: &str = "_shadowed_camera_MP";

fn normalize_headers(raw: &StringRecord) -> StringRecord {
    let trimmed: Vec<&str> = raw.iter().map(str::trim).collect();
    let changed = raw
        .iter()
        .zip(trimmed.iter())
        .filter(|(before, after)| before != *after)
        .count();
    if changed > 0 {
        debug!("Trimmed whitespace from {} column names", changed);
    }

    // With both camera columns present the primary one wins.
    let primary = Field::CameraMp.column_name();
    if !trimmed.contains(&primary) {
        return trimmed.into_iter().collect();
    }
    trimmed
        .into_iter()
        .map(|name| {
            if name != primary && Field::CameraMp.matches_name(name) {
                debug!("Ignoring column '{}' in favour of '{}'", name, primary);
                SHADOWED_CAMERA_COLUMN
            } else {
                name
            }
        })
        .collect()
}

fn check_required_columns(headers: &StringRecord) -> Result<()> {
    let missing: Vec<&str> = Field::ALL
        .iter()
        .filter(|field| !headers.iter().any(|h| field.matches_name(h)))
        .map(|field| field.column_name())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Initialization(format!(
            "dataset is missing required column(s): {}",
            missing.join(", ")
        )))
    }
}

fn validate_record(record: &DeviceRecord, line: usize) -> Result<()> {
    if record.brand.trim().is_empty() {
        return Err(Error::Initialization(format!("line {}: 'brand' is empty", line)));
    }
    for field in Field::ALL.iter().filter(|f| f.kind() == FieldKind::Number) {
        if let Some(value) = record.number(*field) {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Initialization(format!(
                    "line {}: '{}' must be a non-negative number, got {}",
                    line, field, value
                )));
            }
        }
    }
    Ok(())
}
