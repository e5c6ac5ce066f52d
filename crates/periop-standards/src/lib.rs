#![deny(unsafe_code)]

pub mod cpt_range;
pub mod csv;
pub mod error;
pub mod manifest;
pub mod paths;
pub mod registry;
pub mod surgical;
pub mod tables;

pub use crate::cpt_range::{CptCodeParts, CptRange};
pub use crate::error::StandardsError;
pub use crate::paths::{REFERENCE_ENV_VAR, ReferencePaths, reference_root};
pub use crate::registry::{ReferenceRegistry, VerifySummary};
pub use crate::surgical::SurgicalConceptSet;
pub use crate::tables::ReferenceTables;
