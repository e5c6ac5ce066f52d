//! Derived variables returned to callers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::{CardiacSubclass, CodeVocabulary};
use crate::error::ModelError;

/// Postoperative AKI stage, or the sentinel explaining why no stage exists.
///
/// Variants are declared in code order, so the derived ordering matches the
/// integer codes used in downstream datasets. Serializes as that integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AkiStage {
    /// -4: an adjacent surgery without an interstitial creatinine draw.
    Confounded,
    /// -3: no valid pre-op creatinine in the baseline window.
    NoBaseline,
    /// -2: pre-op eGFR below 15.
    AdvancedCkd,
    /// -1: no valid creatinine within 7 days after the procedure.
    NoPostopData,
    /// 0
    NoAki,
    Stage1,
    Stage2,
    Stage3,
}

impl AkiStage {
    pub fn code(&self) -> i8 {
        match self {
            AkiStage::Confounded => -4,
            AkiStage::NoBaseline => -3,
            AkiStage::AdvancedCkd => -2,
            AkiStage::NoPostopData => -1,
            AkiStage::NoAki => 0,
            AkiStage::Stage1 => 1,
            AkiStage::Stage2 => 2,
            AkiStage::Stage3 => 3,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, ModelError> {
        match code {
            -4 => Ok(AkiStage::Confounded),
            -3 => Ok(AkiStage::NoBaseline),
            -2 => Ok(AkiStage::AdvancedCkd),
            -1 => Ok(AkiStage::NoPostopData),
            0 => Ok(AkiStage::NoAki),
            1 => Ok(AkiStage::Stage1),
            2 => Ok(AkiStage::Stage2),
            3 => Ok(AkiStage::Stage3),
            other => Err(ModelError::InvalidStageCode(other)),
        }
    }

    /// True for the exclusion codes (negative values).
    pub fn is_sentinel(&self) -> bool {
        self.code() < 0
    }

    /// True for stages 1-3.
    pub fn is_aki(&self) -> bool {
        self.code() > 0
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AkiStage::Confounded => "Confounded",
            AkiStage::NoBaseline => "NoBaseline",
            AkiStage::AdvancedCkd => "AdvancedCKD",
            AkiStage::NoPostopData => "NoPostopData",
            AkiStage::NoAki => "NoAKI",
            AkiStage::Stage1 => "Stage1",
            AkiStage::Stage2 => "Stage2",
            AkiStage::Stage3 => "Stage3",
        }
    }
}

impl fmt::Display for AkiStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AkiStage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i8(self.code())
    }
}

impl<'de> Deserialize<'de> for AkiStage {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i64::deserialize(deserializer)?;
        AkiStage::from_code(code).map_err(serde::de::Error::custom)
    }
}

/// Clinical category label of a procedure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProceduralCategory {
    Label(String),
    /// CPT code with no CCS label.
    Unmapped,
}

impl ProceduralCategory {
    pub const UNMAPPED_TEXT: &'static str = "Does not map to any procedure in range";

    pub fn as_str(&self) -> &str {
        match self {
            ProceduralCategory::Label(label) => label,
            ProceduralCategory::Unmapped => Self::UNMAPPED_TEXT,
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, ProceduralCategory::Label(_))
    }
}

impl fmt::Display for ProceduralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProceduralCategory {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProceduralCategory {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == Self::UNMAPPED_TEXT {
            Ok(ProceduralCategory::Unmapped)
        } else {
            Ok(ProceduralCategory::Label(s))
        }
    }
}

/// Classification of a single procedure code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcedureClassification {
    pub vocabulary: CodeVocabulary,
    pub code: String,
    pub is_cardiac: bool,
    /// Present exactly when `is_cardiac` is true.
    pub cardiac_subclass: Option<CardiacSubclass>,
    pub procedural_category: ProceduralCategory,
}
