#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::error::StandardsError;
use crate::manifest::{MANIFEST_FILE, MANIFEST_SCHEMA, Manifest, ManifestFile, sha256_hex};
use crate::paths::ReferencePaths;
use crate::tables::ReferenceTables;

/// The table a manifest entry provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReferenceRole {
    Icd10PcsCategory,
    Icd10PcsCardiac,
    CcsLabel,
    CptCcsMapping,
}

impl ReferenceRole {
    pub const ALL: [ReferenceRole; 4] = [
        ReferenceRole::Icd10PcsCategory,
        ReferenceRole::Icd10PcsCardiac,
        ReferenceRole::CcsLabel,
        ReferenceRole::CptCcsMapping,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceRole::Icd10PcsCategory => "icd10pcs_category",
            ReferenceRole::Icd10PcsCardiac => "icd10pcs_cardiac_classification",
            ReferenceRole::CcsLabel => "ccs_label",
            ReferenceRole::CptCcsMapping => "cpt_ccs_mapping",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == value)
    }
}

impl fmt::Display for ReferenceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct VerifySummary {
    pub reference_dir: PathBuf,
    pub release: Option<String>,
    pub file_count: usize,
    pub icd10pcs_codes: usize,
    pub icd10pcs_cardiac_codes: usize,
    pub ccs_labels: usize,
    pub cpt_codes: usize,
}

/// Reference tables loaded from a hash-pinned directory.
#[derive(Debug, Clone)]
pub struct ReferenceRegistry {
    pub manifest: Manifest,
    pub tables: ReferenceTables,
}

impl ReferenceRegistry {
    /// Reads `manifest.toml` in `reference_dir`, checks every listed file
    /// against its SHA-256, then builds the tables by role.
    pub fn verify_and_load(reference_dir: &Path) -> Result<(Self, VerifySummary), StandardsError> {
        let manifest = load_manifest(&reference_dir.join(MANIFEST_FILE))?;
        let by_role = index_roles(&manifest)?;
        let paths = verified_paths(reference_dir, &by_role)?;
        let tables = ReferenceTables::load(&paths)?;

        let summary = VerifySummary {
            reference_dir: reference_dir.to_path_buf(),
            release: manifest.release.clone(),
            file_count: manifest.files.len(),
            icd10pcs_codes: tables.icd10pcs_code_count(),
            icd10pcs_cardiac_codes: tables.icd10pcs_cardiac_code_count(),
            ccs_labels: tables.ccs_label_count(),
            cpt_codes: tables.cpt_code_count(),
        };
        info!(
            reference_dir = %reference_dir.display(),
            release = summary.release.as_deref().unwrap_or("unpinned"),
            "Reference manifest verified"
        );

        Ok((Self { manifest, tables }, summary))
    }
}

fn load_manifest(path: &Path) -> Result<Manifest, StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    toml::from_str(&contents).map_err(|e| StandardsError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Checks the header and every entry, keyed by role. Unknown roles are
/// rejected.
fn index_roles(
    manifest: &Manifest,
) -> Result<BTreeMap<ReferenceRole, &ManifestFile>, StandardsError> {
    let header = &manifest.manifest;
    if header.schema != MANIFEST_SCHEMA || header.schema_version != 1 {
        return Err(StandardsError::InvalidManifest {
            message: format!(
                "unsupported schema: {} v{}",
                header.schema, header.schema_version
            ),
        });
    }

    let mut by_role = BTreeMap::new();
    for file in &manifest.files {
        let Some(role) = ReferenceRole::parse(&file.role) else {
            return Err(StandardsError::InvalidManifest {
                message: format!("unknown role '{}' for {}", file.role, file.path),
            });
        };
        if by_role.insert(role, file).is_some() {
            return Err(StandardsError::DuplicateRole {
                role: file.role.clone(),
            });
        }
        check_entry(file)?;
    }

    if let Some(role) = ReferenceRole::ALL.into_iter().find(|r| !by_role.contains_key(r)) {
        return Err(StandardsError::MissingRole {
            role: role.to_string(),
        });
    }
    Ok(by_role)
}

fn check_entry(file: &ManifestFile) -> Result<(), StandardsError> {
    let path = PathBuf::from(&file.path);
    if file.sha256.len() != 64 || !file.sha256.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(StandardsError::InvalidSha256 {
            path,
            message: "sha256 must be 64 hex characters".to_string(),
        });
    }
    let escapes = path.components().any(|c| matches!(c, Component::ParentDir));
    if path.is_absolute() || escapes {
        return Err(StandardsError::InvalidPath {
            path,
            message: "manifest path must be relative to the reference directory".to_string(),
        });
    }
    Ok(())
}

fn verified_paths(
    reference_dir: &Path,
    by_role: &BTreeMap<ReferenceRole, &ManifestFile>,
) -> Result<ReferencePaths, StandardsError> {
    let path_for = |role: ReferenceRole| -> Result<PathBuf, StandardsError> {
        let file = by_role.get(&role).ok_or_else(|| StandardsError::MissingRole {
            role: role.to_string(),
        })?;
        let full_path = reference_dir.join(&file.path);
        check_digest(&full_path, &file.sha256)?;
        debug!(
            role = %role,
            path = %full_path.display(),
            "Reference file verified"
        );
        Ok(full_path)
    };

    Ok(ReferencePaths {
        icd10pcs_category: path_for(ReferenceRole::Icd10PcsCategory)?,
        icd10pcs_cardiac: path_for(ReferenceRole::Icd10PcsCardiac)?,
        ccs_label: path_for(ReferenceRole::CcsLabel)?,
        cpt_ccs_mapping: path_for(ReferenceRole::CptCcsMapping)?,
    })
}

fn check_digest(path: &Path, expected: &str) -> Result<(), StandardsError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => StandardsError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => StandardsError::io(path, e),
    })?;

    let actual = sha256_hex(&bytes);
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(StandardsError::Sha256Mismatch {
            path: path.to_path_buf(),
            expected: expected.to_ascii_lowercase(),
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_role_names() {
        for role in ReferenceRole::ALL {
            assert_eq!(ReferenceRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(ReferenceRole::parse("sdtm_datasets"), None);
        assert_eq!(
            ReferenceRole::Icd10PcsCardiac.to_string(),
            "icd10pcs_cardiac_classification"
        );
    }

    #[test]
    fn test_check_entry_rejects_bad_sha_and_paths() {
        let entry = |path: &str, sha256: String| ManifestFile {
            path: path.to_string(),
            sha256,
            role: "ccs_label".to_string(),
            notes: None,
        };
        let good = "a".repeat(64);

        assert!(check_entry(&entry("ccs_label.csv", good.clone())).is_ok());
        assert!(matches!(
            check_entry(&entry("ccs_label.csv", "abc".to_string())),
            Err(StandardsError::InvalidSha256 { .. })
        ));
        assert!(matches!(
            check_entry(&entry("/etc/ccs_label.csv", good.clone())),
            Err(StandardsError::InvalidPath { .. })
        ));
        assert!(matches!(
            check_entry(&entry("sub/../../ccs_label.csv", good)),
            Err(StandardsError::InvalidPath { .. })
        ));
    }
}
