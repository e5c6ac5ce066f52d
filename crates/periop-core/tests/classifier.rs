//! Procedure code classification.

use periop_core::{CoreError, MemorySource, ProcedureClassifier, cardiac_subclass_for_cpt};
use periop_model::{
    CardiacSubclass, CodeVocabulary, ConceptId, PersonId, ProceduralCategory, ProcedureCode,
    ProcedureEvent, ProcedureId,
};
use periop_standards::ReferenceTables;
use periop_standards::cpt_range::CptRange;
use periop_standards::csv::ccs::{CcsLabelRow, CptCcsRow};
use periop_standards::csv::icd10pcs::{Icd10CardiacRow, Icd10CategoryRow};

fn tables() -> ReferenceTables {
    let category = |code: &str, category: &str| Icd10CategoryRow {
        code: code.to_string(),
        category: category.to_string(),
    };
    ReferenceTables::from_rows(
        vec![
            category("02100Z9", "CBGB"),
            category("02HK3JZ", "PACE"),
            category("02Q50ZZ", "CARD"),
            category("0DTJ4ZZ", "APPY"),
        ],
        vec![
            Icd10CardiacRow {
                code: "02100Z9".to_string(),
                subclass: CardiacSubclass::Open,
            },
            Icd10CardiacRow {
                code: "02HK3JZ".to_string(),
                subclass: CardiacSubclass::EpCath,
            },
        ],
        vec![CcsLabelRow {
            label: 44,
            text: "Coronary artery bypass graft (CABG)".to_string(),
        }],
        vec![CptCcsRow {
            range: CptRange::parse("33510-33536").unwrap(),
            label: 44,
        }],
    )
}

// =========================================================================
// CPT4
// =========================================================================

#[test]
fn test_cpt_subclass_priority() {
    assert_eq!(
        cardiac_subclass_for_cpt("33025"),
        Some(CardiacSubclass::Other)
    );
    assert_eq!(
        cardiac_subclass_for_cpt("33024"),
        Some(CardiacSubclass::Open)
    );
    assert_eq!(
        cardiac_subclass_for_cpt("33016"),
        Some(CardiacSubclass::EpCath)
    );
    assert_eq!(
        cardiac_subclass_for_cpt("33361"),
        Some(CardiacSubclass::TranscatheterEndovascular)
    );
    assert_eq!(
        cardiac_subclass_for_cpt("35820"),
        Some(CardiacSubclass::Other)
    );
    assert_eq!(cardiac_subclass_for_cpt("44950"), None);
}

#[test]
fn test_cpt_classification() {
    let tables = tables();
    let classifier = ProcedureClassifier::new(&tables);

    let cabg = classifier
        .classify_code(&ProcedureCode::cpt4("33512"))
        .unwrap()
        .unwrap();
    assert_eq!(cabg.vocabulary, CodeVocabulary::Cpt4);
    assert!(cabg.is_cardiac);
    assert_eq!(cabg.cardiac_subclass, Some(CardiacSubclass::Open));
    assert_eq!(
        cabg.procedural_category,
        ProceduralCategory::Label("Coronary artery bypass graft (CABG)".to_string())
    );

    let appendectomy = classifier
        .classify_code(&ProcedureCode::cpt4("44950"))
        .unwrap()
        .unwrap();
    assert!(!appendectomy.is_cardiac);
    assert_eq!(appendectomy.cardiac_subclass, None);
    assert_eq!(
        appendectomy.procedural_category,
        ProceduralCategory::Unmapped
    );
    insta::assert_snapshot!(appendectomy.procedural_category, @"Does not map to any procedure in range");
}

#[test]
fn test_cpt_with_letter_is_not_cardiac() {
    let tables = tables();
    let classification = ProcedureClassifier::new(&tables)
        .classify_code(&ProcedureCode::cpt4("0345T"))
        .unwrap()
        .unwrap();
    assert!(!classification.is_cardiac);
}

// =========================================================================
// ICD10PCS
// =========================================================================

#[test]
fn test_icd10pcs_classification() {
    let tables = tables();
    let classifier = ProcedureClassifier::new(&tables);

    let bypass = classifier
        .classify_code(&ProcedureCode::icd10pcs("02100Z9"))
        .unwrap()
        .unwrap();
    assert!(bypass.is_cardiac);
    assert_eq!(bypass.cardiac_subclass, Some(CardiacSubclass::Open));
    assert_eq!(bypass.procedural_category.as_str(), "CBGB");

    let repair = classifier
        .classify_code(&ProcedureCode::icd10pcs("02Q50ZZ"))
        .unwrap()
        .unwrap();
    assert_eq!(repair.cardiac_subclass, Some(CardiacSubclass::Other));

    let appendectomy = classifier
        .classify_code(&ProcedureCode::icd10pcs("0DTJ4ZZ"))
        .unwrap()
        .unwrap();
    assert!(!appendectomy.is_cardiac);
    assert_eq!(appendectomy.cardiac_subclass, None);
}

#[test]
fn test_unmapped_icd10pcs_is_error() {
    let tables = tables();
    let err = ProcedureClassifier::new(&tables)
        .classify_code(&ProcedureCode::icd10pcs("0W9G30Z"))
        .unwrap_err();
    match err {
        CoreError::UnmappedIcd10Pcs { code } => assert_eq!(code, "0W9G30Z"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_vocabulary() {
    let tables = tables();
    let classifier = ProcedureClassifier::new(&tables);
    let result = classifier
        .classify_code(&ProcedureCode::new("HCPCS", "G0105"))
        .unwrap();
    assert_eq!(result, None);
}

// =========================================================================
// Via data source
// =========================================================================

#[test]
fn test_classify_is_repeatable() {
    let tables = tables();
    let classifier = ProcedureClassifier::new(&tables);
    let at = chrono::NaiveDate::from_ymd_opt(2022, 11, 2)
        .unwrap()
        .and_hms_opt(7, 45, 0)
        .unwrap();
    let source = MemorySource::new().with_procedure(ProcedureEvent {
        procedure_id: ProcedureId::new(11),
        person_id: PersonId::new(3),
        performed_at: at,
        concept_id: ConceptId::new(2107231),
        age_years: 64,
        code: ProcedureCode::cpt4("33016"),
    });

    let first = classifier.classify(&source, ProcedureId::new(11)).unwrap();
    let second = classifier.classify(&source, ProcedureId::new(11)).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.and_then(|c| c.cardiac_subclass),
        Some(CardiacSubclass::EpCath)
    );

    assert_eq!(
        classifier.classify(&source, ProcedureId::new(12)).unwrap(),
        None
    );
}
