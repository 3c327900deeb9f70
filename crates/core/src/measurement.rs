use serde::{Deserialize, Serialize};
use std::fmt;

use crate::unit::Unit;

/// The persisted unit of record.
///
/// The storage layer enforces that no two rows share both fields exactly
/// (floating-point equality on `value`); this type makes no attempt to
/// guard against that itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub unit: Unit,
}

impl Measurement {
    pub fn new(value: f64, unit: Unit) -> Self {
        Measurement { value, unit }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}
