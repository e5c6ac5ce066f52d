use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown code vocabulary: {0}")]
    UnknownVocabulary(String),
    #[error("invalid cardiac subclass code: {0}")]
    InvalidCardiacSubclass(i64),
    #[error("invalid AKI stage code: {0}")]
    InvalidStageCode(i64),
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
