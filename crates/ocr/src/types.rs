use serde::Serialize;
use std::fmt;

use mensura_core::Measurement;

/// A `(numeral, unit token)` pair as lexically found in OCR text.
/// Ephemeral: created per pipeline invocation, discarded after
/// classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub number: String,
    pub unit: String,
}

/// Why a scanned pair was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    InvalidNumber,
    UnknownUnit,
    ValueOutOfRange,
    /// Reported by the storage layer on a `(value, unit)` uniqueness
    /// violation — text classification itself never produces this.
    DuplicateValue,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::InvalidNumber => write!(f, "invalid_number"),
            RejectReason::UnknownUnit => write!(f, "unknown_unit"),
            RejectReason::ValueOutOfRange => write!(f, "value_out_of_range"),
            RejectReason::DuplicateValue => write!(f, "duplicate_value"),
        }
    }
}

/// The value as it was read: parsed when the numeral was well formed,
/// otherwise the raw text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReadValue {
    Number(f64),
    Text(String),
}

/// A scanned pair that did not survive classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub value: ReadValue,
    /// Canonical symbol when the unit resolved, the raw token otherwise.
    pub unit: String,
    pub reason: RejectReason,
}

/// Outcome of classifying one scanned pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Accepted(Measurement),
    Rejected(Rejection),
}

impl Classified {
    pub fn accepted(&self) -> Option<&Measurement> {
        match self {
            Classified::Accepted(m) => Some(m),
            Classified::Rejected(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_reason_display_is_machine_readable() {
        assert_eq!(RejectReason::UnknownUnit.to_string(), "unknown_unit");
        assert_eq!(RejectReason::DuplicateValue.to_string(), "duplicate_value");
    }

    #[test]
    fn rejection_serializes_like_the_wire_format() {
        let r = Rejection {
            value: ReadValue::Number(999.0),
            unit: "kg".to_string(),
            reason: RejectReason::ValueOutOfRange,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "value": 999.0,
                "unit": "kg",
                "reason": "value_out_of_range",
            })
        );

        let r = Rejection {
            value: ReadValue::Text("1.2.3".to_string()),
            unit: "xx".to_string(),
            reason: RejectReason::InvalidNumber,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["value"], "1.2.3");
    }
}
