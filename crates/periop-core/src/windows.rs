//! Pre-op and post-op creatinine windows around a procedure.

use chrono::{Duration, NaiveDateTime};
use periop_model::{LabMeasurement, PatientDemographics};

use crate::creatinine::{Creatinine, peak_creatinine};
use crate::egfr::{Egfr, estimate_egfr};

pub const BASELINE_LOOKBACK_DAYS: i64 = 60;
pub const EARLY_POSTOP_DAYS: i64 = 2;
pub const POSTOP_DAYS: i64 = 7;

/// A half-open time window `(start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Window {
    /// `(t - 60 days, t]`
    pub fn baseline(performed_at: NaiveDateTime) -> Self {
        Self {
            start: performed_at - Duration::days(BASELINE_LOOKBACK_DAYS),
            end: performed_at,
        }
    }

    /// `(t, t + days]`
    pub fn postop(performed_at: NaiveDateTime, days: i64) -> Self {
        Self {
            start: performed_at,
            end: performed_at + Duration::days(days),
        }
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start < at && at <= self.end
    }

    /// Serum creatinine readings inside the window.
    pub fn creatinine<'a>(
        &self,
        readings: &'a [LabMeasurement],
    ) -> impl Iterator<Item = &'a LabMeasurement> + use<'a> {
        let window = *self;
        readings
            .iter()
            .filter(move |r| r.is_serum_creatinine() && window.contains(r.measured_at))
    }
}

/// Highest valid creatinine in the baseline window.
pub fn baseline_creatinine(
    readings: &[LabMeasurement],
    performed_at: NaiveDateTime,
) -> Option<Creatinine> {
    peak_creatinine(Window::baseline(performed_at).creatinine(readings))
}

/// Lowest pre-op eGFR.
///
/// eGFR falls as creatinine rises, so this is the eGFR of the baseline
/// maximum. Unknown without demographics.
pub fn preop_egfr(
    baseline: Option<Creatinine>,
    demographics: Option<&PatientDemographics>,
) -> Option<Egfr> {
    estimate_egfr(baseline, demographics?)
}

/// Post-op peak creatinine within 2 and 7 days of the procedure.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PostopPeaks {
    pub within_2_days: Option<Creatinine>,
    pub within_7_days: Option<Creatinine>,
}

impl PostopPeaks {
    pub fn from_readings(readings: &[LabMeasurement], performed_at: NaiveDateTime) -> Self {
        Self {
            within_2_days: peak_creatinine(
                Window::postop(performed_at, EARLY_POSTOP_DAYS).creatinine(readings),
            ),
            within_7_days: peak_creatinine(
                Window::postop(performed_at, POSTOP_DAYS).creatinine(readings),
            ),
        }
    }
}
