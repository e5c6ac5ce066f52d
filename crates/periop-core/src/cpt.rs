//! CPT4 cardiac and anesthesia code rules.
//!
//! Cardiac CPT codes are recognized by numeric range. The four groups
//! overlap (33016-33019 is both EP/Cath and Other), so lookups go through
//! [`cardiac_subclass_for_cpt`], which applies them in priority order.

use std::sync::LazyLock;

use periop_model::CardiacSubclass;
use regex::Regex;

/// Inclusive numeric CPT range.
type CodeRange = (u64, u64);

const OPEN_CARDIAC: &[CodeRange] = &[
    (33020, 33100),
    (33120, 33130),
    (33140, 33141),
    (33300, 33315),
    (33321, 33322),
    (33335, 33335),
    (33390, 33417),
    (33422, 33471),
    (33474, 33476),
    (33478, 33478),
    (33496, 33496),
    (33500, 33507),
    (33508, 33508),
    (33510, 33516),
    (33517, 33530),
    (33533, 33548),
    (33572, 33572),
    (33600, 33622),
    (33641, 33697),
    (33702, 33722),
    (33724, 33732),
    (33735, 33768),
    (33770, 33783),
    (33786, 33788),
    (33800, 33853),
    (33858, 33877),
    (33910, 33926),
    (33927, 33945),
    (33975, 33983),
];

/// Pericardial window; inside the open range but classified as Other.
const OPEN_CARDIAC_EXCLUDED: u64 = 33025;

const EP_CATH: &[CodeRange] = &[
    (33016, 33019),
    (33202, 33275),
    (33285, 33286),
    (33289, 33289),
    (92920, 92979),
    (92950, 92985),
    (92998, 92998),
    (93451, 93533),
    (93600, 93662),
];

const TRANSCATHETER_ENDOVASCULAR: &[CodeRange] = &[
    (33340, 33340),
    (33361, 33364),
    (33418, 33420),
    (33477, 33477),
    (33880, 33891),
    (33990, 33993),
    (92986, 92986),
    (92987, 92987),
    (92990, 92990),
    (93580, 93592),
];

const OTHER_CARDIAC: &[CodeRange] = &[
    (33016, 33019),
    (33025, 33025),
    (35820, 35820),
    (35840, 35840),
    (33365, 33369),
    (33320, 33320),
    (33330, 33330),
    (33946, 33959),
    (33962, 33974),
    (33984, 33989),
    (33999, 33999),
];

const OBSTETRIC_ANESTHESIA: &[&str] = &["01961", "01963", "01967", "01968", "01969"];

const OPEN_CARDIAC_ANESTHESIA: &[&str] = &["00561", "00562", "00563", "00566", "00567", "00580"];

static ANESTHESIA_CPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[01][0-9]{3}$").expect("Invalid anesthesia CPT regex"));

/// Numeric value of an all-digit code; anything else never matches a range.
fn numeric_code(code: &str) -> Option<u64> {
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.parse().ok()
}

fn in_ranges(ranges: &[CodeRange], code: u64) -> bool {
    ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&code))
}

pub fn is_open_cardiac_cpt(code: &str) -> bool {
    numeric_code(code)
        .is_some_and(|n| n != OPEN_CARDIAC_EXCLUDED && in_ranges(OPEN_CARDIAC, n))
}

pub fn is_ep_cath_cpt(code: &str) -> bool {
    numeric_code(code).is_some_and(|n| in_ranges(EP_CATH, n))
}

pub fn is_transcatheter_endovascular_cpt(code: &str) -> bool {
    numeric_code(code).is_some_and(|n| in_ranges(TRANSCATHETER_ENDOVASCULAR, n))
}

pub fn is_other_cardiac_cpt(code: &str) -> bool {
    numeric_code(code).is_some_and(|n| in_ranges(OTHER_CARDIAC, n))
}

/// Cardiac subclass of a CPT4 code, or `None` for non-cardiac codes.
///
/// Priority: Open, EP/Cath, Transcatheter/Endovascular, Other.
pub fn cardiac_subclass_for_cpt(code: &str) -> Option<CardiacSubclass> {
    if is_open_cardiac_cpt(code) {
        Some(CardiacSubclass::Open)
    } else if is_ep_cath_cpt(code) {
        Some(CardiacSubclass::EpCath)
    } else if is_transcatheter_endovascular_cpt(code) {
        Some(CardiacSubclass::TranscatheterEndovascular)
    } else if is_other_cardiac_cpt(code) {
        Some(CardiacSubclass::Other)
    } else {
        None
    }
}

/// Anesthesia CPT codes are `00100`-`01999`.
pub fn is_anesthesia_cpt(code: &str) -> bool {
    ANESTHESIA_CPT.is_match(code)
}

pub fn is_obstetric_anesthesia_cpt(code: &str) -> bool {
    OBSTETRIC_ANESTHESIA.contains(&code)
}

pub fn is_open_cardiac_anesthesia_cpt(code: &str) -> bool {
    OPEN_CARDIAC_ANESTHESIA.contains(&code)
}
