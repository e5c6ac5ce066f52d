//! Serum creatinine normalization.
//!
//! Readings arrive in mixed units. Only mg/dL (or its SNOMED marker) and
//! µmol/L are accepted; µmol/L values are converted before the physiological
//! range check, so a large µmol/L value can survive where the same number in
//! mg/dL would not.

use std::fmt;

use periop_model::{LabMeasurement, LabUnit};
use tracing::debug;

/// µmol/L per mg/dL of creatinine.
pub const UMOL_PER_MG_DL: f64 = 88.4;

/// Lowest plausible serum creatinine, inclusive.
pub const MIN_CREATININE_MG_DL: f64 = 0.2;

/// Upper bound of plausible serum creatinine, exclusive.
pub const MAX_CREATININE_MG_DL: f64 = 25.0;

/// A serum creatinine value in mg/dL inside `[0.2, 25.0)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Creatinine(f64);

impl Creatinine {
    /// Accepts an mg/dL value if it lies in the plausible range.
    pub fn new(mg_per_dl: f64) -> Option<Self> {
        (MIN_CREATININE_MG_DL..MAX_CREATININE_MG_DL)
            .contains(&mg_per_dl)
            .then_some(Self(mg_per_dl))
    }

    pub fn mg_per_dl(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Creatinine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mg/dL", self.0)
    }
}

/// Converts a single reading to mg/dL and range-checks it.
///
/// Returns `None` for unrecognized units and implausible values.
pub fn normalize_reading(reading: &LabMeasurement) -> Option<Creatinine> {
    let mg_per_dl = match &reading.unit {
        LabUnit::MicromolesPerLiter => reading.value / UMOL_PER_MG_DL,
        LabUnit::MilligramsPerDeciliter | LabUnit::SnomedMilligramsPerDeciliter => reading.value,
        LabUnit::Centimeters | LabUnit::Other(_) => return None,
    };
    Creatinine::new(mg_per_dl)
}

/// Highest valid creatinine among `readings`, or `None` when nothing survives.
pub fn peak_creatinine<'a, I>(readings: I) -> Option<Creatinine>
where
    I: IntoIterator<Item = &'a LabMeasurement>,
{
    let mut peak: Option<Creatinine> = None;
    let mut discarded = 0usize;
    for reading in readings {
        match normalize_reading(reading) {
            Some(value) => {
                if peak.is_none_or(|current| value > current) {
                    peak = Some(value);
                }
            }
            None => discarded += 1,
        }
    }
    if discarded > 0 {
        debug!(
            discarded,
            "Discarded creatinine readings outside unit or range"
        );
    }
    peak
}
