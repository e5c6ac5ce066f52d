use std::path::Path;

use super::CsvTable;
use crate::cpt_range::CptRange;
use crate::error::StandardsError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CcsLabelRow {
    pub label: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CptCcsRow {
    pub range: CptRange,
    pub label: u32,
}

fn ccs_label(
    table: &CsvTable,
    record: &csv::StringRecord,
    idx: usize,
) -> Result<u32, StandardsError> {
    let raw = table.required_int(record, idx, "ccs_numerical_label")?;
    u32::try_from(raw).map_err(|_| table.invalid(record, format!("negative CCS label {raw}")))
}

/// Parses `ccs_label.csv` (`ccs_numerical_label`, `ccs_label`).
pub fn parse_ccs_label_csv(path: &Path) -> Result<Vec<CcsLabelRow>, StandardsError> {
    let table = CsvTable::read(path)?;
    let idx_label = table.column("ccs_numerical_label")?;
    let idx_text = table.column("ccs_label")?;

    table
        .records()
        .map(|record| {
            Ok(CcsLabelRow {
                label: ccs_label(&table, record, idx_label)?,
                text: table.required(record, idx_text, "ccs_label")?.to_string(),
            })
        })
        .collect()
}

/// Parses `cpt_ccs_mapping.csv` (`cpt_code_range`, `ccs_numerical_label`).
///
/// Ranges are validated here; a malformed range fails the whole file.
pub fn parse_cpt_ccs_mapping_csv(path: &Path) -> Result<Vec<CptCcsRow>, StandardsError> {
    let table = CsvTable::read(path)?;
    let idx_range = table.column("cpt_code_range")?;
    let idx_label = table.column("ccs_numerical_label")?;

    table
        .records()
        .map(|record| {
            let range = CptRange::parse(table.required(record, idx_range, "cpt_code_range")?)?;
            Ok(CptCcsRow {
                range,
                label: ccs_label(&table, record, idx_label)?,
            })
        })
        .collect()
}
