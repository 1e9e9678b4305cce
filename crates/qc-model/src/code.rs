//! Measurement codes for the sweatshirt point-of-measure chart.
//!
//! The set is closed: twenty required single-letter codes (`A`..`T`) plus a
//! small number of named optional codes. Variants are declared in canonical
//! order, which is the lexical order of their canonical strings, so the
//! derived `Ord` sorts `PRINT_PLACEMENT_FROM_CF` between `P` and `Q`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MeasurementCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    #[serde(rename = "PRINT_PLACEMENT_FROM_CF")]
    PrintPlacementFromCf,
    Q,
    R,
    S,
    T,
}

/// Every valid code, in canonical order.
const ALL_CODES: [MeasurementCode; 21] = [
    MeasurementCode::A,
    MeasurementCode::B,
    MeasurementCode::C,
    MeasurementCode::D,
    MeasurementCode::E,
    MeasurementCode::F,
    MeasurementCode::G,
    MeasurementCode::H,
    MeasurementCode::I,
    MeasurementCode::J,
    MeasurementCode::K,
    MeasurementCode::L,
    MeasurementCode::M,
    MeasurementCode::N,
    MeasurementCode::O,
    MeasurementCode::P,
    MeasurementCode::PrintPlacementFromCf,
    MeasurementCode::Q,
    MeasurementCode::R,
    MeasurementCode::S,
    MeasurementCode::T,
];

const REQUIRED_CODES: [MeasurementCode; 20] = [
    MeasurementCode::A,
    MeasurementCode::B,
    MeasurementCode::C,
    MeasurementCode::D,
    MeasurementCode::E,
    MeasurementCode::F,
    MeasurementCode::G,
    MeasurementCode::H,
    MeasurementCode::I,
    MeasurementCode::J,
    MeasurementCode::K,
    MeasurementCode::L,
    MeasurementCode::M,
    MeasurementCode::N,
    MeasurementCode::O,
    MeasurementCode::P,
    MeasurementCode::Q,
    MeasurementCode::R,
    MeasurementCode::S,
    MeasurementCode::T,
];

const OPTIONAL_CODES: [MeasurementCode; 1] = [MeasurementCode::PrintPlacementFromCf];

impl MeasurementCode {
    /// All valid codes (required and optional) in canonical order.
    pub fn all() -> &'static [MeasurementCode] {
        &ALL_CODES
    }

    /// Codes that every measurement file must supply.
    pub fn required() -> &'static [MeasurementCode] {
        &REQUIRED_CODES
    }

    pub fn optional() -> &'static [MeasurementCode] {
        &OPTIONAL_CODES
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, MeasurementCode::PrintPlacementFromCf)
    }

    /// Canonical (uppercase) code string.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementCode::A => "A",
            MeasurementCode::B => "B",
            MeasurementCode::C => "C",
            MeasurementCode::D => "D",
            MeasurementCode::E => "E",
            MeasurementCode::F => "F",
            MeasurementCode::G => "G",
            MeasurementCode::H => "H",
            MeasurementCode::I => "I",
            MeasurementCode::J => "J",
            MeasurementCode::K => "K",
            MeasurementCode::L => "L",
            MeasurementCode::M => "M",
            MeasurementCode::N => "N",
            MeasurementCode::O => "O",
            MeasurementCode::P => "P",
            MeasurementCode::PrintPlacementFromCf => "PRINT_PLACEMENT_FROM_CF",
            MeasurementCode::Q => "Q",
            MeasurementCode::R => "R",
            MeasurementCode::S => "S",
            MeasurementCode::T => "T",
        }
    }

    /// Human-readable point-of-measure name.
    pub fn name(&self) -> &'static str {
        match self {
            MeasurementCode::A => "Length from shoulder",
            MeasurementCode::B => "Chest Width",
            MeasurementCode::C => "Chest Width (1/2 Armhole)",
            MeasurementCode::D => "Bottom width (Above Waistband)",
            MeasurementCode::E => "Hem Width",
            MeasurementCode::F => "Back Width",
            MeasurementCode::G => "Back Width (1/2 Armhole)",
            MeasurementCode::H => "Neck Width (Seam to Seam)",
            MeasurementCode::I => "Sleeve Length",
            MeasurementCode::J => "Sleeve Width",
            MeasurementCode::K => "Sleeve Width (Above Cuff)",
            MeasurementCode::L => "Sleeve Opening",
            MeasurementCode::M => "Cuff Length",
            MeasurementCode::N => "Armhole",
            MeasurementCode::O => "Back Neck Drop",
            MeasurementCode::P => "Front Neck Drop",
            MeasurementCode::PrintPlacementFromCf => "Print Placement From CF",
            MeasurementCode::Q => "Collar Width",
            MeasurementCode::R => "Shoulder Drop",
            MeasurementCode::S => "Waistband Length",
            MeasurementCode::T => "Forward Shoulder Seam",
        }
    }

    /// Case-insensitive lookup of a code. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_uppercase();
        ALL_CODES
            .iter()
            .copied()
            .find(|code| code.as_str() == normalized)
    }

    /// Comma-separated list of every valid code, for diagnostics.
    pub fn valid_codes_list() -> String {
        join_codes(&ALL_CODES)
    }
}

/// Join codes into a `", "`-separated list.
pub fn join_codes(codes: &[MeasurementCode]) -> String {
    codes
        .iter()
        .map(MeasurementCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for MeasurementCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ModelError::UnknownMeasurementCode(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_matches_lexical_order() {
        let mut by_string: Vec<&str> = MeasurementCode::all().iter().map(|c| c.as_str()).collect();
        by_string.sort_unstable();
        let by_enum: Vec<&str> = MeasurementCode::all().iter().map(|c| c.as_str()).collect();
        assert_eq!(by_string, by_enum);

        let mut sorted = MeasurementCode::all().to_vec();
        sorted.sort();
        assert_eq!(sorted, MeasurementCode::all());
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(MeasurementCode::parse("h"), Some(MeasurementCode::H));
        assert_eq!(
            MeasurementCode::parse(" print_placement_from_cf "),
            Some(MeasurementCode::PrintPlacementFromCf)
        );
        assert_eq!(MeasurementCode::parse("U"), None);
        assert_eq!(MeasurementCode::parse(""), None);
    }

    #[test]
    fn required_excludes_optional() {
        assert_eq!(MeasurementCode::required().len(), 20);
        assert!(MeasurementCode::required().iter().all(|c| c.is_required()));
        assert!(!MeasurementCode::PrintPlacementFromCf.is_required());
    }
}
