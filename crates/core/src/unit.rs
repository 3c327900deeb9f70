use serde::{Deserialize, Serialize};
use std::fmt;

/// A unit symbol from the fixed accepted vocabulary.
///
/// Symbols carry their display form (`µg`, `km/hr`), never the ASCII-folded
/// form the fuzzy matcher compares with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "kg")]
    Kg,
    #[serde(rename = "g")]
    G,
    #[serde(rename = "mg")]
    Mg,
    #[serde(rename = "µg")]
    Ug,
    #[serde(rename = "l")]
    L,
    #[serde(rename = "ml")]
    Ml,
    #[serde(rename = "m")]
    M,
    #[serde(rename = "cm")]
    Cm,
    #[serde(rename = "mm")]
    Mm,
    #[serde(rename = "km")]
    Km,
    #[serde(rename = "inch")]
    Inch,
    #[serde(rename = "km/hr")]
    KmPerHr,
    #[serde(rename = "m/s")]
    MPerS,
    #[serde(rename = "sec")]
    Sec,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::G => "g",
            Unit::Mg => "mg",
            Unit::Ug => "µg",
            Unit::L => "l",
            Unit::Ml => "ml",
            Unit::M => "m",
            Unit::Cm => "cm",
            Unit::Mm => "mm",
            Unit::Km => "km",
            Unit::Inch => "inch",
            Unit::KmPerHr => "km/hr",
            Unit::MPerS => "m/s",
            Unit::Sec => "sec",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::str::FromStr for Unit {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kg" => Ok(Unit::Kg),
            "g" => Ok(Unit::G),
            "mg" => Ok(Unit::Mg),
            "µg" => Ok(Unit::Ug),
            "l" => Ok(Unit::L),
            "ml" => Ok(Unit::Ml),
            "m" => Ok(Unit::M),
            "cm" => Ok(Unit::Cm),
            "mm" => Ok(Unit::Mm),
            "km" => Ok(Unit::Km),
            "inch" => Ok(Unit::Inch),
            "km/hr" => Ok(Unit::KmPerHr),
            "m/s" => Ok(Unit::MPerS),
            "sec" => Ok(Unit::Sec),
            other => Err(format!("Unknown unit symbol: '{other}'")),
        }
    }
}
