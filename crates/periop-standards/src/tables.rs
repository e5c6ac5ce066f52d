//! Immutable lookup tables for procedure classification.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::Path;

use periop_model::CardiacSubclass;
use tracing::{info, warn};

use crate::csv::ccs::{CcsLabelRow, CptCcsRow, parse_ccs_label_csv, parse_cpt_ccs_mapping_csv};
use crate::csv::icd10pcs::{
    Icd10CardiacRow, Icd10CategoryRow, parse_icd10pcs_cardiac_csv, parse_icd10pcs_category_csv,
};
use crate::error::StandardsError;
use crate::paths::ReferencePaths;

/// The four reference mappings, built once and shared read-only.
///
/// Within each table a later row overwrites an earlier row with the same key.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    icd10pcs_category: HashMap<String, String>,
    icd10pcs_cardiac: HashMap<String, CardiacSubclass>,
    ccs_labels: HashMap<u32, String>,
    cpt_to_ccs: HashMap<String, u32>,
}

/// Inserts all pairs, returning how many keys were overwritten with a
/// different value.
fn insert_all<K, V>(map: &mut HashMap<K, V>, pairs: impl IntoIterator<Item = (K, V)>) -> usize
where
    K: Eq + Hash,
    V: PartialEq,
{
    let mut overwritten = 0usize;
    for (key, value) in pairs {
        let changed = map.get(&key).is_some_and(|old| *old != value);
        if changed {
            overwritten += 1;
        }
        map.insert(key, value);
    }
    overwritten
}

impl ReferenceTables {
    pub fn from_rows(
        categories: Vec<Icd10CategoryRow>,
        cardiac: Vec<Icd10CardiacRow>,
        ccs_labels: Vec<CcsLabelRow>,
        cpt_mapping: Vec<CptCcsRow>,
    ) -> Self {
        let mut tables = Self::default();

        let overwritten = insert_all(
            &mut tables.icd10pcs_category,
            categories.into_iter().map(|row| (row.code, row.category)),
        );
        if overwritten > 0 {
            warn!(
                table = "icd10pcs_category",
                overwritten,
                "Duplicate codes with conflicting categories"
            );
        }

        let overwritten = insert_all(
            &mut tables.icd10pcs_cardiac,
            cardiac.into_iter().map(|row| (row.code, row.subclass)),
        );
        if overwritten > 0 {
            warn!(
                table = "icd10pcs_cardiac",
                overwritten,
                "Duplicate codes with conflicting subclasses"
            );
        }

        let overwritten = insert_all(
            &mut tables.ccs_labels,
            ccs_labels.into_iter().map(|row| (row.label, row.text)),
        );
        if overwritten > 0 {
            warn!(
                table = "ccs_label",
                overwritten,
                "Duplicate CCS labels with conflicting text"
            );
        }

        let overwritten = insert_all(
            &mut tables.cpt_to_ccs,
            cpt_mapping
                .iter()
                .flat_map(|row| row.range.codes().map(move |code| (code, row.label))),
        );
        if overwritten > 0 {
            warn!(
                table = "cpt_ccs_mapping",
                overwritten,
                "Overlapping CPT ranges; later rows win"
            );
        }

        tables
    }

    /// Loads and builds the tables from explicit file locations.
    pub fn load(paths: &ReferencePaths) -> Result<Self, StandardsError> {
        let tables = Self::from_rows(
            parse_icd10pcs_category_csv(&paths.icd10pcs_category)?,
            parse_icd10pcs_cardiac_csv(&paths.icd10pcs_cardiac)?,
            parse_ccs_label_csv(&paths.ccs_label)?,
            parse_cpt_ccs_mapping_csv(&paths.cpt_ccs_mapping)?,
        );
        info!(
            icd10pcs_codes = tables.icd10pcs_category.len(),
            icd10pcs_cardiac_codes = tables.icd10pcs_cardiac.len(),
            ccs_labels = tables.ccs_labels.len(),
            cpt_codes = tables.cpt_to_ccs.len(),
            "Reference tables loaded"
        );
        Ok(tables)
    }

    /// Loads the default file names from `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, StandardsError> {
        Self::load(&ReferencePaths::in_dir(dir))
    }

    pub fn icd10pcs_category(&self, code: &str) -> Option<&str> {
        self.icd10pcs_category.get(code).map(String::as_str)
    }

    pub fn icd10pcs_cardiac_subclass(&self, code: &str) -> Option<CardiacSubclass> {
        self.icd10pcs_cardiac.get(code).copied()
    }

    pub fn ccs_label_text(&self, label: u32) -> Option<&str> {
        self.ccs_labels.get(&label).map(String::as_str)
    }

    pub fn cpt_ccs_label(&self, cpt_code: &str) -> Option<u32> {
        self.cpt_to_ccs.get(cpt_code).copied()
    }

    /// CCS label text for a CPT code, when both lookups succeed.
    pub fn cpt_category(&self, cpt_code: &str) -> Option<&str> {
        self.cpt_ccs_label(cpt_code)
            .and_then(|label| self.ccs_label_text(label))
    }

    /// Every ICD10PCS code with a category; this is the ICD10PCS part of the
    /// surgical code universe.
    pub fn icd10pcs_codes(&self) -> impl Iterator<Item = &str> {
        self.icd10pcs_category.keys().map(String::as_str)
    }

    pub fn icd10pcs_code_count(&self) -> usize {
        self.icd10pcs_category.len()
    }

    pub fn icd10pcs_cardiac_code_count(&self) -> usize {
        self.icd10pcs_cardiac.len()
    }

    pub fn ccs_label_count(&self) -> usize {
        self.ccs_labels.len()
    }

    pub fn cpt_code_count(&self) -> usize {
        self.cpt_to_ccs.len()
    }
}
