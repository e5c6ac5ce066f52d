pub mod concepts;
pub mod enums;
pub mod error;
pub mod ids;
pub mod outcome;
pub mod records;

pub use enums::{CardiacSubclass, CodeVocabulary, LabConcept, LabUnit};
pub use error::{ModelError, Result};
pub use ids::{ConceptId, PersonId, ProcedureId};
pub use outcome::{AkiStage, ProceduralCategory, ProcedureClassification};
pub use records::{LabMeasurement, PatientDemographics, ProcedureCode, ProcedureEvent};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_codes_follow_declaration_order() {
        let stages = [
            AkiStage::Confounded,
            AkiStage::NoBaseline,
            AkiStage::AdvancedCkd,
            AkiStage::NoPostopData,
            AkiStage::NoAki,
            AkiStage::Stage1,
            AkiStage::Stage2,
            AkiStage::Stage3,
        ];
        for pair in stages.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].code() < pair[1].code());
        }
        assert!(stages.iter().filter(|s| s.is_sentinel()).count() == 4);
    }

    #[test]
    fn classification_serializes() {
        let classification = ProcedureClassification {
            vocabulary: CodeVocabulary::Cpt4,
            code: "33510".to_string(),
            is_cardiac: true,
            cardiac_subclass: Some(CardiacSubclass::Open),
            procedural_category: ProceduralCategory::Unmapped,
        };
        let json = serde_json::to_string(&classification).expect("serialize classification");
        assert!(json.contains("\"Does not map to any procedure in range\""));
        let round: ProcedureClassification =
            serde_json::from_str(&json).expect("deserialize classification");
        assert_eq!(round, classification);
    }
}
