//! Reader for metabolite concentration tables: CSV with metabolite
//! identifiers in the first column and one column per experimental
//! condition. Values are in micromolar and converted to molar on load.

use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use thiserror::Error;

/// Conversion factor applied to every concentration read from the table
pub const MICROMOLAR_TO_MOLAR: f64 = 1e-6;

/// Read the concentrations measured under one named experimental
/// condition, keyed by metabolite identifier and scaled to molar.
/// Metabolites with an empty or non-finite entry are skipped, so they
/// later fall back to the fixed default concentration.
pub fn read_condition<P: AsRef<Path>>(
    path: P,
    condition: &str,
) -> Result<IndexMap<String, f64>, ConcentrationTableError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    parse_condition(reader, condition)
}

fn parse_condition<R: Read>(
    mut reader: csv::Reader<R>,
    condition: &str,
) -> Result<IndexMap<String, f64>, ConcentrationTableError> {
    let headers = reader.headers()?.clone();
    // The first column holds the metabolite index, conditions start at 1
    let column = headers
        .iter()
        .skip(1)
        .position(|header| header == condition)
        .map(|position| position + 1)
        .ok_or_else(|| ConcentrationTableError::UnknownCondition {
            condition: condition.to_string(),
            available: headers.iter().skip(1).map(String::from).collect(),
        })?;

    let mut concentrations = IndexMap::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        // Header is row 1, data starts at row 2
        let row = index + 2;
        let metabolite = record
            .get(0)
            .ok_or(ConcentrationTableError::MissingField { row })?;
        let cell = record
            .get(column)
            .ok_or(ConcentrationTableError::MissingField { row })?
            .trim();
        if cell.is_empty() {
            continue;
        }
        let value: f64 = cell
            .parse()
            .map_err(|_| ConcentrationTableError::InvalidNumber {
                row,
                value: cell.to_string(),
            })?;
        if !value.is_finite() {
            continue;
        }
        concentrations.insert(metabolite.to_string(), value * MICROMOLAR_TO_MOLAR);
    }
    Ok(concentrations)
}

/// Enum representing possible concentration table errors
#[derive(Debug, Error)]
pub enum ConcentrationTableError {
    #[error("unable to read concentration table")]
    Csv(#[from] csv::Error),
    #[error("condition {condition:?} not found in concentration table, available conditions: {available:?}")]
    UnknownCondition {
        condition: String,
        available: Vec<String>,
    },
    #[error("row {row} of the concentration table is missing a field")]
    MissingField { row: usize },
    #[error("row {row} of the concentration table has a non-numeric value {value:?}")]
    InvalidNumber { row: usize, value: String },
}

#[cfg(test)]
mod tests {
    use crate::io::concentration_table::{parse_condition, ConcentrationTableError};

    fn reader(data: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data.as_bytes())
    }

    #[test]
    fn test_condition_column_scaled() {
        let data = "metabolite,Glc,Prop\nC00031,250.0,125.0\nC00092,40.0,10.0\n";
        let concentrations = parse_condition(reader(data), "Glc").unwrap();
        assert_eq!(concentrations.len(), 2);
        assert!((concentrations["C00031"] - 250.0e-6).abs() < 1e-15);
        assert!((concentrations["C00092"] - 40.0e-6).abs() < 1e-15);
    }

    #[test]
    fn test_missing_values_skipped() {
        let data = "metabolite,Glc\nC00031,250.0\nC00092,\nC00085,NaN\n";
        let concentrations = parse_condition(reader(data), "Glc").unwrap();
        assert_eq!(concentrations.len(), 1);
        assert!(concentrations.contains_key("C00031"));
    }

    #[test]
    fn test_unknown_condition() {
        let data = "metabolite,Glc,Prop\nC00031,250.0,125.0\n";
        match parse_condition(reader(data), "Glu") {
            Err(ConcentrationTableError::UnknownCondition { available, .. }) => {
                assert_eq!(available, vec!["Glc".to_string(), "Prop".to_string()]);
            }
            other => panic!("Expected UnknownCondition, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_value() {
        let data = "metabolite,Glc\nC00031,abc\n";
        match parse_condition(reader(data), "Glc") {
            Err(ConcentrationTableError::InvalidNumber { row: 2, .. }) => {}
            other => panic!("Expected InvalidNumber, got {:?}", other),
        }
    }
}
