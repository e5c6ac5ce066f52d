//! Reference directory resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the reference directory.
pub const REFERENCE_ENV_VAR: &str = "PERIOP_REFERENCE_DIR";

pub const ICD10PCS_CATEGORY_FILE: &str = "icd10pcs_category.csv";
pub const ICD10PCS_CARDIAC_FILE: &str = "icd10pcs_cardiac_classification.csv";
pub const CCS_LABEL_FILE: &str = "ccs_label.csv";
pub const CPT_CCS_MAPPING_FILE: &str = "cpt_ccs_mapping.csv";

/// Get the reference root directory.
///
/// Resolution order:
/// 1. `PERIOP_REFERENCE_DIR` environment variable
/// 2. `reference/` directory relative to workspace root
pub fn reference_root() -> PathBuf {
    if let Ok(root) = std::env::var(REFERENCE_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../reference")
}

/// Locations of the four reference tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePaths {
    pub icd10pcs_category: PathBuf,
    pub icd10pcs_cardiac: PathBuf,
    pub ccs_label: PathBuf,
    pub cpt_ccs_mapping: PathBuf,
}

impl ReferencePaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            icd10pcs_category: dir.join(ICD10PCS_CATEGORY_FILE),
            icd10pcs_cardiac: dir.join(ICD10PCS_CARDIAC_FILE),
            ccs_label: dir.join(CCS_LABEL_FILE),
            cpt_ccs_mapping: dir.join(CPT_CCS_MAPPING_FILE),
        }
    }
}

impl Default for ReferencePaths {
    fn default() -> Self {
        Self::in_dir(&reference_root())
    }
}
