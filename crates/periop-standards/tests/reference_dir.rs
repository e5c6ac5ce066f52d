//! The sample reference directory shipped at the workspace root.

use std::path::PathBuf;

use periop_model::CardiacSubclass;
use periop_standards::ReferenceRegistry;

fn shipped_reference_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../reference")
}

#[test]
fn shipped_manifest_verifies() {
    let dir = shipped_reference_dir();
    if !dir.join("manifest.toml").exists() {
        return; // Skip if the reference directory is not checked out
    }

    let (registry, summary) =
        ReferenceRegistry::verify_and_load(&dir).expect("verify shipped reference");
    assert_eq!(summary.release.as_deref(), Some("sample"));
    assert_eq!(summary.file_count, 4);
    assert_eq!(summary.icd10pcs_codes, 10);
    assert_eq!(summary.icd10pcs_cardiac_codes, 7);
    assert_eq!(summary.ccs_labels, 8);
    assert_eq!(summary.cpt_codes, 299);

    let tables = &registry.tables;
    assert_eq!(tables.icd10pcs_category("02RF38Z"), Some("CARD"));
    assert_eq!(
        tables.icd10pcs_cardiac_subclass("02RF38Z"),
        Some(CardiacSubclass::TranscatheterEndovascular)
    );
    assert_eq!(
        tables.cpt_category("0315T"),
        Some("Gastric bypass and volume reduction")
    );
    assert_eq!(
        tables.cpt_category("33533"),
        Some("Coronary artery bypass graft (CABG)")
    );
}
