//! CPT code range grammar used by the CPT→CCS mapping table.
//!
//! Each row of the mapping names an inclusive range such as `33020-33100`,
//! `G0100-G0105` or `0001T-0020T`. Both ends follow `[A-Z]? [0-9]+ [A-Z]?`
//! and must share the same alphabetic markers and numeric-body width, so a
//! range expands to individual codes by counting through the numeric body
//! and re-padding it.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::StandardsError;

static CPT_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]?)([0-9]+)([A-Z]?)$").expect("Invalid CPT code regex")
});

/// One end of a range, split into its markers and numeric body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CptCodeParts {
    pub prefix: Option<char>,
    pub number: u64,
    pub width: usize,
    pub suffix: Option<char>,
}

impl CptCodeParts {
    pub fn parse(code: &str) -> Option<Self> {
        let caps = CPT_CODE_PATTERN.captures(code)?;
        let marker = |idx: usize| caps.get(idx).and_then(|m| m.as_str().chars().next());
        let digits = caps.get(2)?.as_str();
        Some(Self {
            prefix: marker(1),
            number: digits.parse().ok()?,
            width: digits.len(),
            suffix: marker(3),
        })
    }
}

/// An inclusive, validated CPT code range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CptRange {
    prefix: Option<char>,
    suffix: Option<char>,
    start: u64,
    end: u64,
    width: usize,
}

impl CptRange {
    /// Parses `FROM-TO`.
    ///
    /// # Errors
    ///
    /// Returns [`StandardsError::InvalidCptRange`] when either end is not a
    /// well-formed code, the ends disagree on markers or width, or the range
    /// is descending.
    pub fn parse(text: &str) -> Result<Self, StandardsError> {
        let (from, to) = text
            .trim()
            .split_once('-')
            .ok_or_else(|| StandardsError::cpt_range(text, "expected FROM-TO"))?;
        let from = from.trim();
        let to = to.trim();

        let start = CptCodeParts::parse(from)
            .ok_or_else(|| StandardsError::cpt_range(text, format!("malformed start '{from}'")))?;
        let end = CptCodeParts::parse(to)
            .ok_or_else(|| StandardsError::cpt_range(text, format!("malformed end '{to}'")))?;

        if start.prefix != end.prefix || start.suffix != end.suffix {
            return Err(StandardsError::cpt_range(
                text,
                "range ends carry different alphabetic markers",
            ));
        }
        if start.width != end.width {
            return Err(StandardsError::cpt_range(
                text,
                format!("numeric widths differ ({} vs {})", start.width, end.width),
            ));
        }
        if start.number > end.number {
            return Err(StandardsError::cpt_range(text, "range is descending"));
        }

        Ok(Self {
            prefix: start.prefix,
            suffix: start.suffix,
            start: start.number,
            end: end.number,
            width: start.width,
        })
    }

    /// Number of codes covered; never zero.
    pub fn code_count(&self) -> u64 {
        self.end - self.start + 1
    }

    fn format_code(&self, number: u64) -> String {
        let mut code = String::with_capacity(self.width + 2);
        if let Some(prefix) = self.prefix {
            code.push(prefix);
        }
        code.push_str(&format!("{number:0width$}", width = self.width));
        if let Some(suffix) = self.suffix {
            code.push(suffix);
        }
        code
    }

    /// Every code in the range, in ascending order.
    pub fn codes(&self) -> impl Iterator<Item = String> + '_ {
        (self.start..=self.end).map(|number| self.format_code(number))
    }
}

impl fmt::Display for CptRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.format_code(self.start),
            self.format_code(self.end)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(text: &str) -> Vec<String> {
        CptRange::parse(text).unwrap().codes().collect()
    }

    #[test]
    fn test_numeric_range() {
        let codes = expand("33020-33023");
        assert_eq!(codes, vec!["33020", "33021", "33022", "33023"]);
    }

    #[test]
    fn test_zero_padding_preserved() {
        let codes = expand("00098-00102");
        assert_eq!(codes, vec!["00098", "00099", "00100", "00101", "00102"]);
    }

    #[test]
    fn test_prefix_only() {
        let codes = expand("G0100-G0102");
        assert_eq!(codes, vec!["G0100", "G0101", "G0102"]);
    }

    #[test]
    fn test_suffix_only() {
        let codes = expand("0001T-0003T");
        assert_eq!(codes, vec!["0001T", "0002T", "0003T"]);
    }

    #[test]
    fn test_prefix_and_suffix() {
        let codes = expand("A009B-A011B");
        assert_eq!(codes, vec!["A009B", "A010B", "A011B"]);
    }

    #[test]
    fn test_single_code_range() {
        let range = CptRange::parse("99999-99999").unwrap();
        assert_eq!(range.code_count(), 1);
        assert_eq!(range.to_string(), "99999-99999");
    }

    #[test]
    fn test_width_mismatch_rejected() {
        let err = CptRange::parse("999-1000").unwrap_err();
        assert!(matches!(err, StandardsError::InvalidCptRange { .. }));
        assert!(err.to_string().contains("widths differ"));
    }

    #[test]
    fn test_marker_mismatch_rejected() {
        assert!(CptRange::parse("G0100-H0105").is_err());
        assert!(CptRange::parse("0001T-0003").is_err());
    }

    #[test]
    fn test_malformed_markers_rejected() {
        assert!(CptRange::parse("g0100-g0105").is_err());
        assert!(CptRange::parse("GG100-GG105").is_err());
        assert!(CptRange::parse("0A01-0A05").is_err());
        assert!(CptRange::parse("33020").is_err());
        assert!(CptRange::parse("-33020").is_err());
    }

    #[test]
    fn test_descending_rejected() {
        assert!(CptRange::parse("33100-33020").is_err());
    }

    #[test]
    fn test_whitespace_around_ends() {
        let codes = expand(" 33020 - 33021 ");
        assert_eq!(codes, vec!["33020", "33021"]);
    }
}
