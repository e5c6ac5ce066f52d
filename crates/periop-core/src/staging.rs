//! AKI stage decision over already-resolved inputs.

use periop_model::AkiStage;

use crate::creatinine::Creatinine;
use crate::egfr::Egfr;
use crate::windows::PostopPeaks;

const STAGE3_RATIO: f64 = 3.0;
const STAGE2_RATIO: f64 = 2.0;
const STAGE1_RATIO: f64 = 1.5;
/// Absolute 48-hour rise (mg/dL) that also counts as stage 1.
const STAGE1_ABSOLUTE_RISE: f64 = 0.3;

/// Applies the staging rules in order; the first match wins.
///
/// `confounded` is only called once baseline, eGFR and post-op data have
/// passed, so callers can defer the close-surgery lookup until then.
pub fn decide_stage<E>(
    baseline: Option<Creatinine>,
    preop_egfr: Option<Egfr>,
    postop: &PostopPeaks,
    confounded: impl FnOnce() -> Result<bool, E>,
) -> Result<AkiStage, E> {
    let Some(baseline) = baseline else {
        return Ok(AkiStage::NoBaseline);
    };
    if preop_egfr.is_some_and(Egfr::is_advanced_ckd) {
        return Ok(AkiStage::AdvancedCkd);
    }
    let Some(peak) = postop.within_7_days else {
        return Ok(AkiStage::NoPostopData);
    };
    if confounded()? {
        return Ok(AkiStage::Confounded);
    }
    Ok(stage_from_rise(
        baseline.mg_per_dl(),
        peak.mg_per_dl(),
        postop.within_2_days.map(Creatinine::mg_per_dl),
    ))
}

/// KDIGO creatinine criteria. Comparisons are inclusive and unrounded.
pub fn stage_from_rise(baseline: f64, peak_7_days: f64, peak_2_days: Option<f64>) -> AkiStage {
    if peak_7_days >= STAGE3_RATIO * baseline {
        AkiStage::Stage3
    } else if peak_7_days >= STAGE2_RATIO * baseline {
        AkiStage::Stage2
    } else if peak_7_days >= STAGE1_RATIO * baseline
        || peak_2_days.is_some_and(|early| early >= baseline + STAGE1_ABSOLUTE_RISE)
    {
        AkiStage::Stage1
    } else {
        AkiStage::NoAki
    }
}
