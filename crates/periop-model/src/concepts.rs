//! Fixed OMOP concept identifiers the derivations depend on.

use crate::ids::ConceptId;

/// Serum creatinine measurement concepts (mass/volume and moles/volume).
pub const SERUM_CREATININE_CONCEPT_IDS: [ConceptId; 2] =
    [ConceptId::new(3016723), ConceptId::new(3020564)];

/// Body height measurement concept.
pub const BODY_HEIGHT_CONCEPT_ID: ConceptId = ConceptId::new(3036277);

/// `gender_concept_id` of patients assigned male.
pub const MALE_GENDER_CONCEPT_ID: ConceptId = ConceptId::new(45880669);

/// Ancestor of every standard surgical CPT4 procedure concept.
pub const SURGICAL_PROCEDURE_CONCEPT_ID: ConceptId = ConceptId::new(4301351);

pub fn is_serum_creatinine(concept_id: ConceptId) -> bool {
    SERUM_CREATININE_CONCEPT_IDS.contains(&concept_id)
}
