//! Weight unit handling.
//!
//! Weight is always persisted in pounds. Conversion to and from the user's
//! preferred display unit happens once, at the read/write boundary of the
//! engine, and both directions round to 2 decimal places there. Storage
//! never sees kilograms.

use core::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Pounds per kilogram, used converting kg to lb.
pub const LBS_PER_KG: f64 = 2.20462;

/// Kilograms per pound, used converting lb to kg.
pub const KG_PER_LB: f64 = 0.453592;

/// The weight unit shown to the user.
///
/// Pounds is the canonical storage unit; kilograms exists only at the
/// display boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WeightUnit {
    /// Pounds (canonical).
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "lbs"))]
    Pounds,
    /// Kilograms.
    #[cfg_attr(feature = "serde", serde(rename = "kgs"))]
    Kilograms,
}

impl WeightUnit {
    /// Short label for display ("lbs" or "kg").
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            WeightUnit::Pounds => "lbs",
            WeightUnit::Kilograms => "kg",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::Pounds => write!(f, "lbs"),
            WeightUnit::Kilograms => write!(f, "kgs"),
        }
    }
}

impl FromStr for WeightUnit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lbs" | "lb" | "pounds" => Ok(WeightUnit::Pounds),
            "kgs" | "kg" | "kilograms" => Ok(WeightUnit::Kilograms),
            _ => Err(ParseError::UnknownWeightUnit(s.to_string())),
        }
    }
}

/// Convert a canonical (pounds) value to the display unit.
#[must_use]
pub fn to_display(canonical_lbs: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Pounds => round2(canonical_lbs),
        WeightUnit::Kilograms => round2(canonical_lbs * KG_PER_LB),
    }
}

/// Convert a display-unit value to canonical pounds.
#[must_use]
pub fn to_canonical(display_value: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Pounds => round2(display_value),
        WeightUnit::Kilograms => round2(display_value * LBS_PER_KG),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_kg_to_lbs() {
        assert_eq!(to_canonical(100.0, WeightUnit::Kilograms), 220.46);
        assert_eq!(to_canonical(1.0, WeightUnit::Kilograms), 2.2);
    }

    #[test]
    fn test_lbs_to_kg() {
        assert_eq!(to_display(220.46, WeightUnit::Kilograms), 100.0);
        assert_eq!(to_display(180.0, WeightUnit::Kilograms), 81.65);
    }

    #[test]
    fn test_pounds_passes_through() {
        assert_eq!(to_display(180.5, WeightUnit::Pounds), 180.5);
        assert_eq!(to_canonical(180.5, WeightUnit::Pounds), 180.5);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        assert_eq!(to_canonical(72.575, WeightUnit::Kilograms), 160.0);
        assert_eq!(to_display(0.013, WeightUnit::Pounds), 0.01);
    }

    #[test]
    fn test_unit_parse() {
        assert_eq!("lbs".parse::<WeightUnit>().unwrap(), WeightUnit::Pounds);
        assert_eq!("KG".parse::<WeightUnit>().unwrap(), WeightUnit::Kilograms);
        assert!("stone".parse::<WeightUnit>().is_err());
    }

    proptest! {
        // Round-trip through the canonical unit stays within the 0.01
        // rounding granularity applied at each boundary.
        #[test]
        fn round_trip_kg_within_tolerance(kg in 1.0f64..500.0) {
            let lbs = to_canonical(kg, WeightUnit::Kilograms);
            let back = to_display(lbs, WeightUnit::Kilograms);
            prop_assert!((back - round2(kg)).abs() <= 0.01);
        }

        #[test]
        fn round_trip_lbs_exact(lbs in 1.0f64..1000.0) {
            let canonical = to_canonical(lbs, WeightUnit::Pounds);
            prop_assert_eq!(to_display(canonical, WeightUnit::Pounds), canonical);
        }
    }
}
