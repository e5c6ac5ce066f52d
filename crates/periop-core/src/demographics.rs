//! Patient attributes as of a procedure timestamp.

use chrono::{Datelike, NaiveDateTime, Timelike};
use periop_model::concepts::MALE_GENDER_CONCEPT_ID;
use periop_model::{ConceptId, LabConcept, LabMeasurement, PatientDemographics};

/// Whole calendar years elapsed from `birth` to `at`.
///
/// A birthday counts from the same month, day and time of day onward.
/// Events before birth yield 0.
pub fn age_in_years(birth: NaiveDateTime, at: NaiveDateTime) -> u32 {
    let key = |t: NaiveDateTime| (t.month(), t.day(), t.hour(), t.minute(), t.second());
    let mut years = at.year() - birth.year();
    if key(at) < key(birth) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

pub fn is_male_gender(gender_concept_id: ConceptId) -> bool {
    gender_concept_id == MALE_GENDER_CONCEPT_ID
}

/// Most recent body height at or before `at`.
pub fn latest_height_cm(measurements: &[LabMeasurement], at: NaiveDateTime) -> Option<f64> {
    measurements
        .iter()
        .filter(|m| m.concept == LabConcept::BodyHeight && m.measured_at <= at && !m.value.is_nan())
        .max_by_key(|m| m.measured_at)
        .map(|m| m.value)
}

/// Demographics for a patient at `at`.
pub fn demographics_at(
    birth: NaiveDateTime,
    gender_concept_id: ConceptId,
    measurements: &[LabMeasurement],
    at: NaiveDateTime,
) -> PatientDemographics {
    PatientDemographics {
        age_years: age_in_years(birth, at),
        is_male: is_male_gender(gender_concept_id),
        height_cm: latest_height_cm(measurements, at),
    }
}
