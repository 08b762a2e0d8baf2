//! Writer and reader for the reversibility result file: CSV rows of
//! `name,RI_value` in batch input order

use std::path::Path;

use indexmap::IndexMap;
use thiserror::Error;

/// Write name→RI pairs as a two-column CSV, preserving map order
pub fn write_reversibility<P: AsRef<Path>>(
    path: P,
    results: &IndexMap<String, f64>,
) -> Result<(), OutputError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    for (name, ri) in results {
        writer.write_record([name.as_str(), ri.to_string().as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a reversibility result file back into a name→RI map, preserving
/// file order
pub fn read_reversibility<P: AsRef<Path>>(
    path: P,
) -> Result<IndexMap<String, f64>, OutputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    let mut results = IndexMap::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let row = index + 1;
        let name = record.get(0).ok_or(OutputError::InvalidRow { row })?;
        let value: f64 = record
            .get(1)
            .ok_or(OutputError::InvalidRow { row })?
            .parse()
            .map_err(|_| OutputError::InvalidRow { row })?;
        results.insert(name.to_string(), value);
    }
    Ok(results)
}

/// Enum representing possible result file errors
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("unable to read or write result file")]
    Csv(#[from] csv::Error),
    #[error("unable to flush result file")]
    Io(#[from] std::io::Error),
    #[error("row {row} of the result file is not a name,value pair")]
    InvalidRow { row: usize },
}
