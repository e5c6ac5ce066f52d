//! Readers for the four reference CSV files.
//!
//! Columns are located by header name; extra columns are ignored.

#![deny(unsafe_code)]

pub mod ccs;
pub mod icd10pcs;

use std::path::{Path, PathBuf};

use crate::error::StandardsError;

/// A fully read CSV file with its header row.
pub(crate) struct CsvTable {
    path: PathBuf,
    headers: Vec<String>,
    records: Vec<csv::StringRecord>,
}

impl CsvTable {
    pub(crate) fn read(path: &Path) -> Result<Self, StandardsError> {
        let bytes = std::fs::read(path).map_err(|e| StandardsError::io(path, e))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes.as_slice());
        let headers = reader
            .headers()
            .map_err(|e| StandardsError::Csv {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?
            .iter()
            .map(|h| h.trim_matches('\u{feff}').trim().to_string())
            .collect();

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| StandardsError::Csv {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            records.push(record);
        }

        Ok(Self {
            path: path.to_path_buf(),
            headers,
            records,
        })
    }

    pub(crate) fn column(&self, name: &str) -> Result<usize, StandardsError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| StandardsError::MissingColumn {
                path: self.path.clone(),
                column: name.to_string(),
            })
    }

    pub(crate) fn records(&self) -> impl Iterator<Item = &csv::StringRecord> {
        self.records.iter()
    }

    /// Trimmed, non-empty cell value.
    pub(crate) fn required<'r>(
        &self,
        record: &'r csv::StringRecord,
        idx: usize,
        column: &str,
    ) -> Result<&'r str, StandardsError> {
        record
            .get(idx)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| self.invalid(record, format!("empty {column}")))
    }

    pub(crate) fn required_int(
        &self,
        record: &csv::StringRecord,
        idx: usize,
        column: &str,
    ) -> Result<i64, StandardsError> {
        let raw = self.required(record, idx, column)?;
        raw.parse::<i64>()
            .map_err(|_| self.invalid(record, format!("{column} is not an integer: '{raw}'")))
    }

    pub(crate) fn invalid(
        &self,
        record: &csv::StringRecord,
        message: impl Into<String>,
    ) -> StandardsError {
        StandardsError::InvalidValue {
            path: self.path.clone(),
            line: record.position().map_or(0, csv::Position::line),
            message: message.into(),
        }
    }
}
