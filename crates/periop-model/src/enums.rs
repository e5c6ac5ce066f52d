//! Type-safe enumerations for warehouse vocabularies and lab metadata.
//!
//! The warehouse represents these as free strings or integer codes; parsing
//! them once at the boundary keeps the decision logic exhaustive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::concepts::{BODY_HEIGHT_CONCEPT_ID, is_serum_creatinine};
use crate::error::ModelError;
use crate::ids::ConceptId;

/// Billing-code vocabularies the classifier understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeVocabulary {
    /// `CPT4`: Current Procedural Terminology.
    Cpt4,
    /// `ICD10PCS`: ICD-10 Procedure Coding System.
    Icd10Pcs,
}

impl CodeVocabulary {
    /// Returns the `vocabulary_id` as stored in the concept table.
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeVocabulary::Cpt4 => "CPT4",
            CodeVocabulary::Icd10Pcs => "ICD10PCS",
        }
    }

    /// Looks up a `vocabulary_id`. Matching is exact, as in the concept table.
    pub fn from_vocabulary_id(value: &str) -> Option<Self> {
        match value {
            "CPT4" => Some(CodeVocabulary::Cpt4),
            "ICD10PCS" => Some(CodeVocabulary::Icd10Pcs),
            _ => None,
        }
    }
}

impl fmt::Display for CodeVocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CodeVocabulary {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_vocabulary_id(s.trim()).ok_or_else(|| ModelError::UnknownVocabulary(s.into()))
    }
}

/// Cardiac procedure subclass.
///
/// The numeric codes are the ones used by the ICD10PCS cardiac classification
/// table (`cardiac_category_code`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardiacSubclass {
    /// Open cardiac surgery (code 1).
    Open,
    /// Electrophysiology or catheterization lab (code 2).
    EpCath,
    /// Transcatheter or endovascular (code 3).
    TranscatheterEndovascular,
    /// Other cardiac-adjacent procedures (code 4).
    Other,
}

impl CardiacSubclass {
    pub fn code(&self) -> u8 {
        match self {
            CardiacSubclass::Open => 1,
            CardiacSubclass::EpCath => 2,
            CardiacSubclass::TranscatheterEndovascular => 3,
            CardiacSubclass::Other => 4,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, ModelError> {
        match code {
            1 => Ok(CardiacSubclass::Open),
            2 => Ok(CardiacSubclass::EpCath),
            3 => Ok(CardiacSubclass::TranscatheterEndovascular),
            4 => Ok(CardiacSubclass::Other),
            other => Err(ModelError::InvalidCardiacSubclass(other)),
        }
    }

    /// Returns the display name used in derived datasets.
    pub fn as_str(&self) -> &'static str {
        match self {
            CardiacSubclass::Open => "Open",
            CardiacSubclass::EpCath => "EP/Cath",
            CardiacSubclass::TranscatheterEndovascular => "Transcatheter/Endovascular",
            CardiacSubclass::Other => "Other",
        }
    }
}

impl fmt::Display for CardiacSubclass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Declared unit of a lab result (`unit_source_value`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabUnit {
    /// `mg/dL`
    MilligramsPerDeciliter,
    /// SNOMED `258797006` (mg/dL).
    SnomedMilligramsPerDeciliter,
    /// `umol/L`
    MicromolesPerLiter,
    /// `cm`, used by body height.
    Centimeters,
    /// Anything else, kept verbatim.
    Other(String),
}

impl LabUnit {
    pub const SNOMED_MG_PER_DL: &'static str = "258797006";

    pub fn from_source_value(value: &str) -> Self {
        match value {
            "mg/dL" => LabUnit::MilligramsPerDeciliter,
            Self::SNOMED_MG_PER_DL => LabUnit::SnomedMilligramsPerDeciliter,
            "umol/L" => LabUnit::MicromolesPerLiter,
            "cm" => LabUnit::Centimeters,
            other => LabUnit::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LabUnit::MilligramsPerDeciliter => "mg/dL",
            LabUnit::SnomedMilligramsPerDeciliter => Self::SNOMED_MG_PER_DL,
            LabUnit::MicromolesPerLiter => "umol/L",
            LabUnit::Centimeters => "cm",
            LabUnit::Other(value) => value,
        }
    }

    /// True for units a serum creatinine reading can be normalized from.
    pub fn is_creatinine_unit(&self) -> bool {
        self.is_mg_per_dl() || *self == LabUnit::MicromolesPerLiter
    }

    /// True for the two markers that already denote mg/dL.
    pub fn is_mg_per_dl(&self) -> bool {
        matches!(
            self,
            LabUnit::MilligramsPerDeciliter | LabUnit::SnomedMilligramsPerDeciliter
        )
    }
}

impl fmt::Display for LabUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a lab measurement measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabConcept {
    SerumCreatinine,
    BodyHeight,
    Other(ConceptId),
}

impl LabConcept {
    pub fn from_concept_id(concept_id: ConceptId) -> Self {
        if is_serum_creatinine(concept_id) {
            LabConcept::SerumCreatinine
        } else if concept_id == BODY_HEIGHT_CONCEPT_ID {
            LabConcept::BodyHeight
        } else {
            LabConcept::Other(concept_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_from_str() {
        assert_eq!(
            "CPT4".parse::<CodeVocabulary>().unwrap(),
            CodeVocabulary::Cpt4
        );
        assert_eq!(
            " ICD10PCS ".parse::<CodeVocabulary>().unwrap(),
            CodeVocabulary::Icd10Pcs
        );
        assert!("HCPCS".parse::<CodeVocabulary>().is_err());
        assert_eq!(CodeVocabulary::from_vocabulary_id("cpt4"), None);
    }

    #[test]
    fn test_cardiac_subclass_codes() {
        for code in 1..=4 {
            let subclass = CardiacSubclass::from_code(code).unwrap();
            assert_eq!(i64::from(subclass.code()), code);
        }
        assert_eq!(
            CardiacSubclass::from_code(0),
            Err(ModelError::InvalidCardiacSubclass(0))
        );
        assert_eq!(CardiacSubclass::EpCath.to_string(), "EP/Cath");
    }

    #[test]
    fn test_lab_unit_parsing() {
        assert!(LabUnit::from_source_value("mg/dL").is_mg_per_dl());
        assert!(LabUnit::from_source_value("258797006").is_mg_per_dl());
        assert_eq!(
            LabUnit::from_source_value("umol/L"),
            LabUnit::MicromolesPerLiter
        );
        assert!(LabUnit::MicromolesPerLiter.is_creatinine_unit());

        let height = LabUnit::from_source_value("cm");
        assert_eq!(height, LabUnit::Centimeters);
        assert!(!height.is_creatinine_unit());

        let other = LabUnit::from_source_value("mmol/L");
        assert!(!other.is_mg_per_dl());
        assert!(!other.is_creatinine_unit());
        assert_eq!(other.as_str(), "mmol/L");
    }

    #[test]
    fn test_lab_concept_lookup() {
        assert_eq!(
            LabConcept::from_concept_id(ConceptId::new(3020564)),
            LabConcept::SerumCreatinine
        );
        assert_eq!(
            LabConcept::from_concept_id(ConceptId::new(3036277)),
            LabConcept::BodyHeight
        );
        assert_eq!(
            LabConcept::from_concept_id(ConceptId::new(1)),
            LabConcept::Other(ConceptId::new(1))
        );
    }
}
