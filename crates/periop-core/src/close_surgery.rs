//! Detection of a follow-up surgery that hides the index procedure's AKI.
//!
//! When a second surgery follows within a week and no creatinine was drawn in
//! between, a post-op creatinine rise cannot be attributed to the index
//! procedure.

use chrono::{Duration, NaiveDateTime};
use periop_model::{ProcedureEvent, ProcedureId};
use periop_standards::SurgicalConceptSet;

pub const CLOSE_SURGERY_DAYS: i64 = 7;

/// Adult surgical events from a patient's history.
pub fn eligible_surgeries<'a>(
    history: &'a [ProcedureEvent],
    universe: &'a SurgicalConceptSet,
) -> impl Iterator<Item = &'a ProcedureEvent> {
    history
        .iter()
        .filter(|event| event.age_years >= 18 && universe.contains(event.concept_id))
}

/// The next distinct surgical timestamp after `at`, if any.
fn next_surgery(sorted_unique: &[NaiveDateTime], at: NaiveDateTime) -> Option<NaiveDateTime> {
    let idx = sorted_unique.partition_point(|t| *t <= at);
    sorted_unique.get(idx).copied()
}

/// True when the procedure is followed by another surgery within 7 days with
/// no creatinine timestamp in `(index, next]`.
///
/// A procedure that is not itself an eligible surgery yields `false`.
pub fn has_close_surgery_without_creatinine(
    index: ProcedureId,
    history: &[ProcedureEvent],
    universe: &SurgicalConceptSet,
    creatinine_times: &[NaiveDateTime],
) -> bool {
    let surgeries: Vec<&ProcedureEvent> = eligible_surgeries(history, universe).collect();
    let Some(index_at) = surgeries
        .iter()
        .find(|event| event.procedure_id == index)
        .map(|event| event.performed_at)
    else {
        return false;
    };

    let mut times: Vec<NaiveDateTime> = surgeries.iter().map(|event| event.performed_at).collect();
    times.sort_unstable();
    times.dedup();

    let Some(next_at) = next_surgery(&times, index_at) else {
        return false;
    };
    if next_at - index_at > Duration::days(CLOSE_SURGERY_DAYS) {
        return false;
    }

    !creatinine_times
        .iter()
        .any(|t| index_at < *t && *t <= next_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successor_skips_equal_timestamps() {
        let base = chrono::NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let times = [base, base + Duration::days(3)];
        assert_eq!(next_surgery(&times, base), Some(times[1]));
        assert_eq!(next_surgery(&times, times[1]), None);
    }
}
