//! Cardiac and clinical-category classification of procedure codes.

use periop_model::{
    CardiacSubclass, CodeVocabulary, ProceduralCategory, ProcedureClassification, ProcedureCode,
    ProcedureId,
};
use periop_standards::ReferenceTables;
use tracing::debug;

use crate::cpt::cardiac_subclass_for_cpt;
use crate::error::{CoreError, Result};
use crate::source::ClinicalDataSource;

/// ICD10PCS categories that denote cardiac surgery.
pub const CARDIAC_ICD10PCS_CATEGORIES: [&str; 5] = ["CARD", "CBGB", "CBGC", "HTP", "PACE"];

pub fn is_cardiac_icd10pcs_category(category: &str) -> bool {
    CARDIAC_ICD10PCS_CATEGORIES.contains(&category)
}

/// Classifies procedures against the shared reference tables.
#[derive(Debug, Clone, Copy)]
pub struct ProcedureClassifier<'a> {
    tables: &'a ReferenceTables,
}

impl<'a> ProcedureClassifier<'a> {
    pub fn new(tables: &'a ReferenceTables) -> Self {
        Self { tables }
    }

    /// Looks up the procedure's code and classifies it.
    ///
    /// `Ok(None)` when the procedure is unknown or its vocabulary is neither
    /// CPT4 nor ICD10PCS.
    pub fn classify<S>(
        &self,
        source: &S,
        id: ProcedureId,
    ) -> Result<Option<ProcedureClassification>>
    where
        S: ClinicalDataSource + ?Sized,
    {
        let Some(code) = source.procedure_code(id)? else {
            debug!(procedure_id = %id, "Procedure not found");
            return Ok(None);
        };
        self.classify_code(&code)
    }

    pub fn classify_code(&self, code: &ProcedureCode) -> Result<Option<ProcedureClassification>> {
        let Some(vocabulary) = code.vocabulary() else {
            debug!(
                vocabulary_id = %code.vocabulary_id,
                code = %code.code,
                "Unsupported code vocabulary"
            );
            return Ok(None);
        };
        let classification = match vocabulary {
            CodeVocabulary::Cpt4 => self.classify_cpt(&code.code),
            CodeVocabulary::Icd10Pcs => self.classify_icd10pcs(&code.code)?,
        };
        Ok(Some(classification))
    }

    fn classify_cpt(&self, code: &str) -> ProcedureClassification {
        let cardiac_subclass = cardiac_subclass_for_cpt(code);
        let procedural_category = self
            .tables
            .cpt_category(code)
            .map_or(ProceduralCategory::Unmapped, |label| {
                ProceduralCategory::Label(label.to_string())
            });
        ProcedureClassification {
            vocabulary: CodeVocabulary::Cpt4,
            code: code.to_string(),
            is_cardiac: cardiac_subclass.is_some(),
            cardiac_subclass,
            procedural_category,
        }
    }

    fn classify_icd10pcs(&self, code: &str) -> Result<ProcedureClassification> {
        let category = self
            .tables
            .icd10pcs_category(code)
            .ok_or_else(|| CoreError::UnmappedIcd10Pcs {
                code: code.to_string(),
            })?;
        let is_cardiac = is_cardiac_icd10pcs_category(category);
        let cardiac_subclass = is_cardiac.then(|| {
            self.tables
                .icd10pcs_cardiac_subclass(code)
                .unwrap_or(CardiacSubclass::Other)
        });
        Ok(ProcedureClassification {
            vocabulary: CodeVocabulary::Icd10Pcs,
            code: code.to_string(),
            is_cardiac,
            cardiac_subclass,
            procedural_category: ProceduralCategory::Label(category.to_string()),
        })
    }
}
