//! Core record types for tracked health metrics.

use core::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use time::{Date, OffsetDateTime};

use crate::error::ParseError;

/// The three tracked metric kinds.
///
/// Every store and engine operation takes a `MetricKind` beside a common
/// sample shape, so each operation has a single code path that matches on
/// the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MetricKind {
    /// Body weight, stored canonically in pounds.
    Weight,
    /// Calorie intake events, optionally labeled with a food name.
    Calories,
    /// Exercise duration in minutes.
    Exercise,
}

impl MetricKind {
    /// All metric kinds, in a fixed order.
    pub const ALL: [MetricKind; 3] = [
        MetricKind::Weight,
        MetricKind::Calories,
        MetricKind::Exercise,
    ];

    /// How samples of this kind collapse into a single per-day value.
    ///
    /// A day's weight readings average into one representative figure;
    /// calories and exercise minutes accumulate over the day.
    #[must_use]
    pub fn day_aggregate(self) -> DayAggregate {
        match self {
            MetricKind::Weight => DayAggregate::Average,
            MetricKind::Calories | MetricKind::Exercise => DayAggregate::Sum,
        }
    }

    /// Display unit label for this kind, given the weight unit preference.
    #[must_use]
    pub fn unit_label(self, weight_unit: crate::WeightUnit) -> &'static str {
        match self {
            MetricKind::Weight => weight_unit.label(),
            MetricKind::Calories => "kcal",
            MetricKind::Exercise => "mins",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Weight => write!(f, "weight"),
            MetricKind::Calories => write!(f, "calories"),
            MetricKind::Exercise => write!(f, "exercise"),
        }
    }
}

impl FromStr for MetricKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "weight" => Ok(MetricKind::Weight),
            "calories" => Ok(MetricKind::Calories),
            "exercise" => Ok(MetricKind::Exercise),
            _ => Err(ParseError::UnknownMetricKind(s.to_string())),
        }
    }
}

/// How per-day values are derived from raw samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayAggregate {
    /// Sum all samples within the day.
    Sum,
    /// Average all samples within the day.
    Average,
}

/// A stored sample of one metric.
///
/// The `value` field carries pounds for weight, kcal for calories, and
/// minutes for exercise. `name` is populated only for calorie samples that
/// were logged with a food label.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    /// Database row ID, assigned by the store on insert.
    pub id: i64,
    /// When the sample was recorded.
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub timestamp: OffsetDateTime,
    /// The recorded value in the metric's canonical unit.
    pub value: f64,
    /// Optional free-text label (calorie samples only).
    pub name: Option<String>,
}

/// A sample that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NewSample {
    /// When the sample was recorded.
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub timestamp: OffsetDateTime,
    /// The recorded value in the metric's canonical unit.
    pub value: f64,
    /// Optional free-text label (calorie samples only).
    pub name: Option<String>,
}

impl NewSample {
    /// A weight sample. `pounds` must already be in the canonical unit.
    #[must_use]
    pub fn weight(timestamp: OffsetDateTime, pounds: f64) -> Self {
        Self {
            timestamp,
            value: pounds,
            name: None,
        }
    }

    /// An unlabeled calorie sample.
    #[must_use]
    pub fn calories(timestamp: OffsetDateTime, calories: f64) -> Self {
        Self {
            timestamp,
            value: calories,
            name: None,
        }
    }

    /// A calorie sample carrying a food label.
    #[must_use]
    pub fn named_calories(timestamp: OffsetDateTime, calories: f64, name: &str) -> Self {
        Self {
            timestamp,
            value: calories,
            name: Some(name.to_string()),
        }
    }

    /// An exercise sample.
    #[must_use]
    pub fn exercise(timestamp: OffsetDateTime, minutes: f64) -> Self {
        Self {
            timestamp,
            value: minutes,
            name: None,
        }
    }
}

/// One calendar day of a dense chart series.
///
/// Derived transiently by the daily series builder; never persisted. Days
/// within one series are unique and ascending.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DailyValue {
    /// The calendar day this value belongs to.
    pub day: Date,
    /// The observed per-day aggregate, or the gap filler for missing days.
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    #[cfg(feature = "serde")]
    use time::macros::date;

    #[test]
    fn test_metric_kind_from_str() {
        assert_eq!("weight".parse::<MetricKind>().unwrap(), MetricKind::Weight);
        assert_eq!(
            "Calories".parse::<MetricKind>().unwrap(),
            MetricKind::Calories
        );
        assert_eq!(
            "EXERCISE".parse::<MetricKind>().unwrap(),
            MetricKind::Exercise
        );
        assert!("steps".parse::<MetricKind>().is_err());
    }

    #[test]
    fn test_metric_kind_display_round_trip() {
        for kind in MetricKind::ALL {
            assert_eq!(kind.to_string().parse::<MetricKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_day_aggregate_per_kind() {
        assert_eq!(MetricKind::Weight.day_aggregate(), DayAggregate::Average);
        assert_eq!(MetricKind::Calories.day_aggregate(), DayAggregate::Sum);
        assert_eq!(MetricKind::Exercise.day_aggregate(), DayAggregate::Sum);
    }

    #[test]
    fn test_new_sample_constructors() {
        let ts = datetime!(2024-03-01 08:00:00 UTC);

        let weight = NewSample::weight(ts, 180.5);
        assert_eq!(weight.value, 180.5);
        assert!(weight.name.is_none());

        let named = NewSample::named_calories(ts, 95.0, "Apple");
        assert_eq!(named.name.as_deref(), Some("Apple"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_sample_serde_round_trip() {
        let sample = Sample {
            id: 7,
            timestamp: datetime!(2024-03-01 08:00:00 UTC),
            value: 150.25,
            name: Some("Lunch".to_string()),
        };

        let json = serde_json::to_string(&sample).unwrap();
        let back: Sample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_daily_value_day_serializes_as_calendar_date() {
        let point = DailyValue {
            day: date!(2024 - 03 - 15),
            value: 1800.0,
        };

        // Day keys are calendar dates on the wire, not (year, ordinal).
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"day":"2024-03-15","value":1800.0}"#);

        let back: DailyValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }
}
