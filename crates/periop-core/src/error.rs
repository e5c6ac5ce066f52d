use thiserror::Error;

/// Errors surfaced by classification and staging.
///
/// Clinical ambiguity never lands here; it is expressed as `None` or as an
/// [`AkiStage`](periop_model::AkiStage) sentinel.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("clinical data source failed: {0}")]
    Source(#[from] anyhow::Error),

    /// The code is ICD10PCS but has no row in the category table, which
    /// also defines the ICD10PCS surgical universe.
    #[error("ICD10PCS code {code} has no category in the reference tables")]
    UnmappedIcd10Pcs { code: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
