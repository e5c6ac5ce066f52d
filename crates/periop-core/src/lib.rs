//! AKI staging and procedure classification for perioperative research data.
//!
//! Two independent services share read-only reference data:
//!
//! - [`ProcedureClassifier`] labels a procedure code as cardiac or not, with a
//!   cardiac subclass and a clinical category.
//! - [`AkiStager`] derives a post-operative acute kidney injury stage from
//!   serum creatinine around the procedure.
//!
//! Both pull records from a [`ClinicalDataSource`].

pub mod classifier;
pub mod close_surgery;
pub mod cpt;
pub mod creatinine;
pub mod demographics;
pub mod egfr;
pub mod error;
pub mod source;
pub mod stager;
pub mod staging;
pub mod windows;

pub use classifier::ProcedureClassifier;
pub use close_surgery::has_close_surgery_without_creatinine;
pub use cpt::cardiac_subclass_for_cpt;
pub use creatinine::{Creatinine, normalize_reading, peak_creatinine};
pub use demographics::age_in_years;
pub use egfr::{Egfr, estimate_egfr};
pub use error::{CoreError, Result};
pub use source::{ClinicalDataSource, MemorySource};
pub use stager::AkiStager;
pub use staging::decide_stage;
pub use windows::PostopPeaks;
