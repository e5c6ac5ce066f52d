use std::path::Path;

use periop_model::CardiacSubclass;

use super::CsvTable;
use crate::error::StandardsError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icd10CategoryRow {
    pub code: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icd10CardiacRow {
    pub code: String,
    pub subclass: CardiacSubclass,
}

/// Parses `icd10pcs_category.csv` (`Code`, `Category`).
pub fn parse_icd10pcs_category_csv(path: &Path) -> Result<Vec<Icd10CategoryRow>, StandardsError> {
    let table = CsvTable::read(path)?;
    let idx_code = table.column("Code")?;
    let idx_category = table.column("Category")?;

    table
        .records()
        .map(|record| {
            Ok(Icd10CategoryRow {
                code: table.required(record, idx_code, "Code")?.to_string(),
                category: table.required(record, idx_category, "Category")?.to_string(),
            })
        })
        .collect()
}

/// Parses `icd10pcs_cardiac_classification.csv`
/// (`icd10_code`, `cardiac_category_code`).
pub fn parse_icd10pcs_cardiac_csv(path: &Path) -> Result<Vec<Icd10CardiacRow>, StandardsError> {
    let table = CsvTable::read(path)?;
    let idx_code = table.column("icd10_code")?;
    let idx_subclass = table.column("cardiac_category_code")?;

    table
        .records()
        .map(|record| {
            let code = table.required(record, idx_code, "icd10_code")?.to_string();
            let raw = table.required_int(record, idx_subclass, "cardiac_category_code")?;
            let subclass =
                CardiacSubclass::from_code(raw).map_err(|e| table.invalid(record, e.to_string()))?;
            Ok(Icd10CardiacRow { code, subclass })
        })
        .collect()
}
