//! Numeric fields recorded by hand on timeline entries.
//!
//! Hours, quantities, costs and amounts arrive from whatever the site office
//! typed in. A [`Measure`] keeps three cases apart instead of folding them all
//! into zero at parse time:
//!
//! - `Absent`: null, missing, or an empty string. Contributes zero silently.
//! - `Value`: a finite, non-negative number (numeric strings like `"7.5"` count).
//! - `Malformed`: anything else. Contributes zero, but the engine reports it.
//!
//! Serialization round-trips: `Value` writes a number, `Absent` writes null,
//! and `Malformed` writes back the raw text it was read from.

use std::borrow::Cow;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Measure {
    #[default]
    Absent,
    Value(f64),
    Malformed(String),
}

impl Measure {
    /// Build a measure from a number, rejecting negatives and non-finite values.
    #[must_use]
    pub fn from_number(value: f64) -> Self {
        if value.is_finite() && value >= 0.0 {
            // Normalizes -0.0 so it serializes as 0
            Self::Value(value + 0.0)
        } else {
            Self::Malformed(value.to_string())
        }
    }

    /// Parse free text the way it would have been typed into a form.
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Absent;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Self::Value(value + 0.0),
            _ => Self::Malformed(raw.to_string()),
        }
    }

    /// The value this field contributes to arithmetic.
    #[must_use]
    pub const fn or_zero(&self) -> f64 {
        match self {
            Self::Value(value) => *value,
            Self::Absent | Self::Malformed(_) => 0.0,
        }
    }

    /// Raw text of a malformed field, if this is one.
    #[must_use]
    pub fn malformed(&self) -> Option<&str> {
        match self {
            Self::Malformed(raw) => Some(raw),
            _ => None,
        }
    }

    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<f64> for Measure {
    fn from(value: f64) -> Self {
        Self::from_number(value)
    }
}

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_none(),
            Self::Value(value) => serializer.serialize_f64(*value),
            Self::Malformed(raw) => serializer.serialize_str(raw),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMeasure {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl<'de> Deserialize<'de> for Measure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<RawMeasure>::deserialize(deserializer)?;
        Ok(match raw {
            None => Self::Absent,
            Some(RawMeasure::Number(value)) => Self::from_number(value),
            Some(RawMeasure::Text(text)) => Self::from_text(&text),
            Some(RawMeasure::Other(other)) => Self::Malformed(other.to_string()),
        })
    }
}

impl JsonSchema for Measure {
    fn schema_name() -> Cow<'static, str> {
        "Measure".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "description": "Hand-entered number: a non-negative number, numeric text, or null",
            "type": ["number", "string", "null"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(8), Measure::Value(8.0))]
    #[case(json!(7.5), Measure::Value(7.5))]
    #[case(json!("12"), Measure::Value(12.0))]
    #[case(json!(" 3.25 "), Measure::Value(3.25))]
    #[case(json!(null), Measure::Absent)]
    #[case(json!(""), Measure::Absent)]
    #[case(json!("eight"), Measure::Malformed("eight".into()))]
    #[case(json!(-4), Measure::Malformed("-4".into()))]
    #[case(json!("-4"), Measure::Malformed("-4".into()))]
    #[case(json!(true), Measure::Malformed("true".into()))]
    fn parses_hand_entered_values(#[case] input: serde_json::Value, #[case] expected: Measure) {
        let parsed: Measure = serde_json::from_value(input).unwrap();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn missing_field_is_absent() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default)]
            hours: Measure,
        }
        let holder: Holder = serde_json::from_str("{}").unwrap();
        assert!(holder.hours.is_absent());
    }

    #[test]
    fn malformed_and_absent_contribute_zero() {
        assert_eq!(Measure::Absent.or_zero(), 0.0);
        assert_eq!(Measure::Malformed("n/a".into()).or_zero(), 0.0);
        assert_eq!(Measure::Value(2.5).or_zero(), 2.5);
    }

    #[test]
    fn malformed_text_survives_roundtrip() {
        let original = Measure::Malformed("approx 4".into());
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, "\"approx 4\"");
        let back: Measure = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn negative_numbers_never_become_values() {
        assert_eq!(Measure::from(-1.0).value(), None);
        assert_eq!(Measure::from(f64::NAN).value(), None);
        assert_eq!(Measure::from(0.0).value(), Some(0.0));
    }
}
