//! Per-procedure AKI staging against a data source.

use chrono::Duration;
use periop_model::{AkiStage, ProcedureId};
use periop_standards::SurgicalConceptSet;
use tracing::debug;

use crate::close_surgery::has_close_surgery_without_creatinine;
use crate::creatinine::Creatinine;
use crate::egfr::Egfr;
use crate::error::{CoreError, Result};
use crate::source::ClinicalDataSource;
use crate::staging::decide_stage;
use crate::windows::{POSTOP_DAYS, PostopPeaks, Window, baseline_creatinine, preop_egfr};

/// Stages procedures. Records are fetched only as far as the decision needs.
#[derive(Debug, Clone, Copy)]
pub struct AkiStager<'a> {
    universe: &'a SurgicalConceptSet,
}

impl<'a> AkiStager<'a> {
    pub fn new(universe: &'a SurgicalConceptSet) -> Self {
        Self { universe }
    }

    /// Stage of the procedure, or `Ok(None)` when the procedure is unknown.
    pub fn stage<S>(&self, source: &S, id: ProcedureId) -> Result<Option<AkiStage>>
    where
        S: ClinicalDataSource + ?Sized,
    {
        let Some(event) = source.procedure(id)? else {
            debug!(procedure_id = %id, "Procedure not found");
            return Ok(None);
        };
        let person = event.person_id;
        let t = event.performed_at;

        let baseline_window = Window::baseline(t);
        let preop = source.creatinine_readings(person, baseline_window.start, baseline_window.end)?;
        let baseline = baseline_creatinine(&preop, t);

        let egfr = if baseline.is_some() {
            let demographics = source.demographics(id)?;
            preop_egfr(baseline, demographics.as_ref())
        } else {
            None
        };

        let postop = if baseline.is_some() && !egfr.is_some_and(Egfr::is_advanced_ckd) {
            let readings = source.creatinine_readings(person, t, t + Duration::days(POSTOP_DAYS))?;
            PostopPeaks::from_readings(&readings, t)
        } else {
            PostopPeaks::default()
        };

        let stage = decide_stage(baseline, egfr, &postop, || {
            let history = source.surgical_history(person)?;
            let creatinine_times = source.creatinine_timestamps(person)?;
            Ok::<_, CoreError>(has_close_surgery_without_creatinine(
                id,
                &history,
                self.universe,
                &creatinine_times,
            ))
        })?;

        debug!(
            procedure_id = %id,
            baseline = baseline.map(Creatinine::mg_per_dl),
            egfr = egfr.map(Egfr::value),
            peak_2_days = postop.within_2_days.map(Creatinine::mg_per_dl),
            peak_7_days = postop.within_7_days.map(Creatinine::mg_per_dl),
            stage = stage.code(),
            "AKI stage decided"
        );
        Ok(Some(stage))
    }
}
