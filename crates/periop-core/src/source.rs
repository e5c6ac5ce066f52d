//! The data collaborator seam.
//!
//! Classification and staging never query a warehouse directly. They ask a
//! [`ClinicalDataSource`] for record snapshots and work on those.
//!
//! # Example
//!
//! ```ignore
//! use periop_core::{AkiStager, MemorySource};
//!
//! let source = MemorySource::new()
//!     .with_person(person_id, birth, gender_concept_id)
//!     .with_procedure(event)
//!     .with_measurement(person_id, reading);
//! let stage = AkiStager::new(&universe).stage(&source, event.procedure_id)?;
//! ```

use std::collections::HashMap;

use anyhow::Result;
use chrono::NaiveDateTime;
use periop_model::{
    ConceptId, LabMeasurement, PatientDemographics, PersonId, ProcedureCode, ProcedureEvent,
    ProcedureId,
};

use crate::demographics::demographics_at;

/// Read-only access to the clinical records a derivation needs.
///
/// Errors are opaque; they are surfaced as
/// [`CoreError::Source`](crate::CoreError::Source).
pub trait ClinicalDataSource {
    /// The procedure occurrence, or `None` if the id is unknown.
    fn procedure(&self, id: ProcedureId) -> Result<Option<ProcedureEvent>>;

    /// The billing code of the procedure's concept.
    fn procedure_code(&self, id: ProcedureId) -> Result<Option<ProcedureCode>> {
        Ok(self.procedure(id)?.map(|event| event.code))
    }

    /// Serum creatinine readings of the patient between `from` and `to`.
    ///
    /// May return a superset of the window; callers re-filter exactly.
    fn creatinine_readings(
        &self,
        person: PersonId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<LabMeasurement>>;

    /// Age, sex and latest height as of the procedure's timestamp.
    fn demographics(&self, id: ProcedureId) -> Result<Option<PatientDemographics>>;

    /// Every procedure occurrence of the patient. Surgical filtering happens
    /// in the caller; implementations may narrow the history further, e.g.
    /// to visits with a creatinine draw.
    fn surgical_history(&self, person: PersonId) -> Result<Vec<ProcedureEvent>>;

    /// Timestamps of every valid serum creatinine draw of the patient.
    fn creatinine_timestamps(&self, person: PersonId) -> Result<Vec<NaiveDateTime>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PersonRecord {
    birth: NaiveDateTime,
    gender_concept_id: ConceptId,
}

/// In-memory [`ClinicalDataSource`] over already fetched records.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    persons: HashMap<PersonId, PersonRecord>,
    procedures: Vec<ProcedureEvent>,
    measurements: HashMap<PersonId, Vec<LabMeasurement>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_person(
        mut self,
        person: PersonId,
        birth: NaiveDateTime,
        gender_concept_id: ConceptId,
    ) -> Self {
        self.persons.insert(
            person,
            PersonRecord {
                birth,
                gender_concept_id,
            },
        );
        self
    }

    pub fn with_procedure(mut self, event: ProcedureEvent) -> Self {
        self.procedures.push(event);
        self
    }

    pub fn with_measurement(mut self, person: PersonId, measurement: LabMeasurement) -> Self {
        self.measurements.entry(person).or_default().push(measurement);
        self
    }

    pub fn with_measurements<I>(mut self, person: PersonId, measurements: I) -> Self
    where
        I: IntoIterator<Item = LabMeasurement>,
    {
        self.measurements
            .entry(person)
            .or_default()
            .extend(measurements);
        self
    }

    fn person_measurements(&self, person: PersonId) -> &[LabMeasurement] {
        self.measurements
            .get(&person)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl ClinicalDataSource for MemorySource {
    fn procedure(&self, id: ProcedureId) -> Result<Option<ProcedureEvent>> {
        Ok(self
            .procedures
            .iter()
            .find(|event| event.procedure_id == id)
            .cloned())
    }

    fn creatinine_readings(
        &self,
        person: PersonId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<LabMeasurement>> {
        Ok(self
            .person_measurements(person)
            .iter()
            .filter(|m| m.is_serum_creatinine() && from <= m.measured_at && m.measured_at <= to)
            .cloned()
            .collect())
    }

    fn demographics(&self, id: ProcedureId) -> Result<Option<PatientDemographics>> {
        let Some(event) = self.procedures.iter().find(|event| event.procedure_id == id) else {
            return Ok(None);
        };
        Ok(self.persons.get(&event.person_id).map(|person| {
            demographics_at(
                person.birth,
                person.gender_concept_id,
                self.person_measurements(event.person_id),
                event.performed_at,
            )
        }))
    }

    fn surgical_history(&self, person: PersonId) -> Result<Vec<ProcedureEvent>> {
        Ok(self
            .procedures
            .iter()
            .filter(|event| event.person_id == person)
            .cloned()
            .collect())
    }

    fn creatinine_timestamps(&self, person: PersonId) -> Result<Vec<NaiveDateTime>> {
        let mut times: Vec<NaiveDateTime> = self
            .person_measurements(person)
            .iter()
            .filter(|m| m.is_serum_creatinine() && m.unit.is_creatinine_unit() && !m.value.is_nan())
            .map(|m| m.measured_at)
            .collect();
        times.sort_unstable();
        Ok(times)
    }
}
