//! Estimated glomerular filtration rate.
//!
//! Adults use the CKD-EPI creatinine equation with the sex-specific kappa,
//! alpha and multiplier below; patients under 18 use the bedside Schwartz
//! equation, which needs a height.

use std::fmt;

use periop_model::PatientDemographics;
use tracing::debug;

use crate::creatinine::Creatinine;

/// eGFR below this marks advanced chronic kidney disease.
pub const ADVANCED_CKD_EGFR: u32 = 15;

const CKD_EPI_SCALE: f64 = 142.0;
const CKD_EPI_UPPER_EXPONENT: f64 = -1.2;
const CKD_EPI_AGE_BASE: f64 = 0.9938;
const SCHWARTZ_COEFFICIENT: f64 = 0.413;
const MAX_RAW_EGFR: f64 = 300.0;

/// A rounded eGFR in mL/min/1.73m².
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Egfr(u32);

impl Egfr {
    pub fn value(self) -> u32 {
        self.0
    }

    pub fn is_advanced_ckd(self) -> bool {
        self.0 < ADVANCED_CKD_EGFR
    }
}

impl fmt::Display for Egfr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct SexCoefficients {
    kappa: f64,
    alpha: f64,
    multiplier: f64,
}

const MALE: SexCoefficients = SexCoefficients {
    kappa: 0.9,
    alpha: -0.302,
    multiplier: 1.0,
};

const FEMALE: SexCoefficients = SexCoefficients {
    kappa: 0.7,
    alpha: -0.241,
    multiplier: 1.012,
};

fn ckd_epi(creatinine: f64, age_years: u32, is_male: bool) -> f64 {
    let c = if is_male { &MALE } else { &FEMALE };
    let ratio = creatinine / c.kappa;
    CKD_EPI_SCALE
        * ratio.min(1.0).powf(c.alpha)
        * ratio.max(1.0).powf(CKD_EPI_UPPER_EXPONENT)
        * CKD_EPI_AGE_BASE.powf(f64::from(age_years))
        * c.multiplier
}

/// Unrounded eGFR, or `None` when a minor has no height on record.
pub fn raw_egfr(creatinine: Creatinine, demographics: &PatientDemographics) -> Option<f64> {
    let cr = creatinine.mg_per_dl();
    if demographics.is_adult() {
        Some(ckd_epi(cr, demographics.age_years, demographics.is_male))
    } else {
        demographics
            .height_cm
            .map(|height| SCHWARTZ_COEFFICIENT * height / cr)
    }
}

/// eGFR for a (pre-op maximum) creatinine.
///
/// The raw value must lie in `(0, 300)`; it is range-checked before rounding
/// and rounded half-to-even. Out-of-range values are unknown, not clamped.
pub fn estimate_egfr(
    creatinine: Option<Creatinine>,
    demographics: &PatientDemographics,
) -> Option<Egfr> {
    let creatinine = creatinine?;
    let Some(raw) = raw_egfr(creatinine, demographics) else {
        debug!(
            age_years = demographics.age_years,
            "eGFR unknown: no height for pediatric patient"
        );
        return None;
    };
    if !(raw > 0.0 && raw < MAX_RAW_EGFR) {
        debug!(raw, "eGFR unknown: raw value out of range");
        return None;
    }
    // In range, so the cast is exact.
    Some(Egfr(raw.round_ties_even() as u32))
}
