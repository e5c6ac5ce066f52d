//! Creatinine normalization and eGFR estimation.

use chrono::NaiveDate;
use periop_core::creatinine::{MAX_CREATININE_MG_DL, MIN_CREATININE_MG_DL};
use periop_core::{Creatinine, Egfr, estimate_egfr, normalize_reading, peak_creatinine};
use periop_model::{LabMeasurement, PatientDemographics};
use proptest::prelude::*;

fn reading(value: f64, unit: &str) -> LabMeasurement {
    let at = NaiveDate::from_ymd_opt(2023, 3, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    LabMeasurement::creatinine(at, value, unit)
}

fn mg(value: f64, unit: &str) -> Option<f64> {
    normalize_reading(&reading(value, unit)).map(Creatinine::mg_per_dl)
}

// =========================================================================
// Unit conversion and range filtering
// =========================================================================

#[test]
fn test_umol_converted_before_range_check() {
    let value = mg(1769.6, "umol/L").expect("20.0 mg/dL is in range");
    assert!((value - 20.018).abs() < 1e-3);

    let value = mg(1800.0, "umol/L").expect("20.36 mg/dL is in range");
    assert!((value - 20.3619).abs() < 1e-4);
}

#[test]
fn test_out_of_range_discarded() {
    assert_eq!(mg(0.1, "mg/dL"), None);
    assert_eq!(mg(25.0, "mg/dL"), None);
    assert_eq!(mg(2300.0, "umol/L"), None);
    assert_eq!(mg(17.0, "umol/L"), None);
}

#[test]
fn test_peak_ignores_discarded_readings() {
    let readings = [
        reading(30.0, "mg/dL"),
        reading(1.1, "mg/dL"),
        reading(150.0, "umol/L"),
        reading(4.0, "mmol/L"),
    ];
    let peak = peak_creatinine(&readings).unwrap();
    assert!((peak.mg_per_dl() - 150.0 / 88.4).abs() < 1e-12);
}

// =========================================================================
// eGFR
// =========================================================================

fn adult(age_years: u32, is_male: bool) -> PatientDemographics {
    PatientDemographics {
        age_years,
        is_male,
        height_cm: None,
    }
}

#[test]
fn test_egfr_adult_male_at_kappa() {
    // 142 * 0.9938^40 = 110.73
    let egfr = estimate_egfr(Creatinine::new(0.9), &adult(40, true)).unwrap();
    assert_eq!(egfr.value(), 111);
}

#[test]
fn test_egfr_advanced_ckd() {
    let egfr = estimate_egfr(Creatinine::new(6.0), &adult(70, false)).unwrap();
    assert!(egfr.is_advanced_ckd(), "eGFR {egfr}");
}

#[test]
fn test_egfr_unknown_without_creatinine() {
    assert_eq!(estimate_egfr(None, &adult(40, true)), None);
}

#[test]
fn test_egfr_rounds_half_to_even() {
    let child = |height| PatientDemographics {
        age_years: 8,
        is_male: false,
        height_cm: Some(height),
    };
    // 0.413 * h / 0.413 = h
    let cr = Creatinine::new(0.413);
    assert_eq!(estimate_egfr(cr, &child(100.5)).map(Egfr::value), Some(100));
    assert_eq!(estimate_egfr(cr, &child(101.5)).map(Egfr::value), Some(102));
}

proptest! {
    #[test]
    fn normalized_values_stay_in_range(value in -100.0f64..5000.0, umol in any::<bool>()) {
        let unit = if umol { "umol/L" } else { "mg/dL" };
        if let Some(cr) = normalize_reading(&reading(value, unit)) {
            prop_assert!(cr.mg_per_dl() >= MIN_CREATININE_MG_DL);
            prop_assert!(cr.mg_per_dl() < MAX_CREATININE_MG_DL);
        }
    }

    #[test]
    fn adult_egfr_falls_as_creatinine_rises(
        low in 0.2f64..12.0,
        delta in 0.01f64..12.0,
        age in 18u32..100,
        is_male in any::<bool>(),
    ) {
        let demographics = adult(age, is_male);
        let a = estimate_egfr(Creatinine::new(low), &demographics);
        let b = estimate_egfr(Creatinine::new(low + delta), &demographics);
        if let (Some(a), Some(b)) = (a, b) {
            prop_assert!(b <= a);
        }
    }
}
