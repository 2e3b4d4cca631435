// dataset_file.rs
//
// CSV boundary between the generator and the dashboard.

use chrono::NaiveDate;
use std::error::Error;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use super::dataset::Dataset;
use crate::errors::LoadError;
use crate::global_variables::EXPORT_FILE_PREFIX;
use crate::shared_data::TrafficObservation;

/// Write the whole dataset as one CSV table with a header row.
pub fn write_dataset(path: &str, data: &[TrafficObservation]) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut wtr = csv::Writer::from_path(path)?;
    for record in data {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    log::info!("Wrote {} observations to {}", data.len(), path);
    Ok(())
}

/// Load the dataset artifact. Any unreadable or malformed row fails the whole load.
pub fn load_dataset(path: &str) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut observations = Vec::new();
    for (row, result) in rdr.deserialize().enumerate() {
        let record: TrafficObservation = result.map_err(|source| LoadError::Csv {
            path: path.to_string(),
            source,
        })?;
        if let Some(reason) = record.inconsistency() {
            // +2: one-based lines and the header row.
            return Err(LoadError::Inconsistent {
                path: path.to_string(),
                line: row as u64 + 2,
                reason,
            });
        }
        observations.push(record);
    }
    if observations.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_string(),
        });
    }
    log::info!("Loaded {} observations from {}", observations.len(), path);
    Ok(Dataset::new(observations))
}

/// Serialize rows to CSV text with every column of the artifact.
pub fn export_csv(rows: &[&TrafficObservation]) -> Result<String, Box<dyn Error>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for record in rows {
        wtr.serialize(record)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

pub fn export_file_name(today: NaiveDate) -> String {
    format!("{}{}.csv", EXPORT_FILE_PREFIX, today.format("%Y%m%d"))
}

/// Write the export into `dir` and return where it landed.
pub fn write_export(
    dir: &str,
    today: NaiveDate,
    rows: &[&TrafficObservation],
) -> Result<PathBuf, Box<dyn Error>> {
    fs::create_dir_all(dir)?;
    let path = Path::new(dir).join(export_file_name(today));
    fs::write(&path, export_csv(rows)?)?;
    Ok(path)
}
