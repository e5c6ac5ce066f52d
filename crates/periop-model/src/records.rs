//! Read-only record snapshots handed over by the data collaborator.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::enums::{CodeVocabulary, LabConcept, LabUnit};
use crate::ids::{ConceptId, PersonId, ProcedureId};

/// A single lab result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabMeasurement {
    pub measured_at: NaiveDateTime,
    pub value: f64,
    pub unit: LabUnit,
    pub concept: LabConcept,
}

impl LabMeasurement {
    /// Serum creatinine reading with the given `unit_source_value`.
    pub fn creatinine(measured_at: NaiveDateTime, value: f64, unit: &str) -> Self {
        Self {
            measured_at,
            value,
            unit: LabUnit::from_source_value(unit),
            concept: LabConcept::SerumCreatinine,
        }
    }

    pub fn is_serum_creatinine(&self) -> bool {
        self.concept == LabConcept::SerumCreatinine
    }
}

/// Billing code attached to a procedure, as found in the concept table.
///
/// The vocabulary stays a raw string here: procedures coded in vocabularies
/// other than CPT4/ICD10PCS exist and are simply not classifiable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcedureCode {
    pub vocabulary_id: String,
    pub code: String,
}

impl ProcedureCode {
    pub fn new(vocabulary_id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            vocabulary_id: vocabulary_id.into(),
            code: code.into(),
        }
    }

    pub fn cpt4(code: impl Into<String>) -> Self {
        Self::new(CodeVocabulary::Cpt4.as_str(), code)
    }

    pub fn icd10pcs(code: impl Into<String>) -> Self {
        Self::new(CodeVocabulary::Icd10Pcs.as_str(), code)
    }

    pub fn vocabulary(&self) -> Option<CodeVocabulary> {
        CodeVocabulary::from_vocabulary_id(&self.vocabulary_id)
    }
}

/// One procedure occurrence of a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureEvent {
    pub procedure_id: ProcedureId,
    pub person_id: PersonId,
    pub performed_at: NaiveDateTime,
    pub concept_id: ConceptId,
    /// Whole years of age at `performed_at`.
    pub age_years: u32,
    pub code: ProcedureCode,
}

/// Patient attributes evaluated at a procedure's timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientDemographics {
    pub age_years: u32,
    pub is_male: bool,
    /// Most recent body height (cm) before the procedure, if measured.
    pub height_cm: Option<f64>,
}

impl PatientDemographics {
    pub fn is_adult(&self) -> bool {
        self.age_years >= 18
    }
}
