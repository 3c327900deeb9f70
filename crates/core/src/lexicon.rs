//! The immutable lookup tables unit recovery runs against: the matching
//! vocabulary, the misread table and the plausible-range table. All three
//! are process-wide constants; nothing mutates them after startup.

use crate::unit::Unit;

/// Matching vocabulary for unit recovery.
///
/// Order matters and must not be reshuffled: when two entries are
/// equidistant from an input token, the earlier entry wins. Entries like
/// `ug`, `gm` and `s` are accepted spellings that resolve to their display
/// form through [`misread_correction`] after matching.
pub const VOCABULARY: &[&str] = &[
    "kg", "g", "mg", "µg", "ug", "gm", "l", "ml", "m", "cm", "mm", "km", "inch", "km/hr", "m/s",
    "s", "sec",
];

/// Known OCR misreads mapped to the token they were meant to be.
///
/// Applied at most twice per token: once to the folded input before fuzzy
/// matching, once to the selected vocabulary entry afterwards. Every value
/// is a canonical symbol, so the second application always terminates.
pub const MISREADS: &[(&str, &str)] = &[
    ("ug", "µg"),
    ("gm", "g"),
    ("mgm", "mg"),
    ("kc", "kg"),
    ("kg.", "kg"),
    ("kgm", "kg"),
    ("lg", "kg"),
    ("nms", "m/s"),
    ("mps", "m/s"),
    ("ms", "m/s"),
    ("kmh", "km/hr"),
    ("km/h", "km/hr"),
    ("kmph", "km/hr"),
    ("s", "sec"),
    ("sec.", "sec"),
    ("secs", "sec"),
];

/// Inclusive plausible-value range per unit, `(unit, min, max)`.
pub const THRESHOLDS: &[(Unit, f64, f64)] = &[
    (Unit::Kg, 0.0, 100.0),
    (Unit::G, 1.0, 500.0),
    (Unit::Mg, 1.0, 1000.0),
    (Unit::Ug, 1.0, 100.0),
    (Unit::L, 0.01, 100.0),
    (Unit::Ml, 0.1, 100.0),
    (Unit::M, 0.1, 100.0),
    (Unit::Cm, 1.0, 100.0),
    (Unit::Mm, 1.0, 100.0),
    (Unit::Km, 0.01, 100.0),
    (Unit::Inch, 0.01, 10.0),
    (Unit::KmPerHr, 1.0, 300.0),
    (Unit::MPerS, 0.1, 100.0),
    (Unit::Sec, 0.01, 500.0),
];

/// Look up a token in the misread table. Tokens are matched as written;
/// callers fold case and the micro sign before the first lookup.
pub fn misread_correction(token: &str) -> Option<&'static str> {
    MISREADS
        .iter()
        .find(|(from, _)| *from == token)
        .map(|(_, to)| *to)
}

/// The declared plausible range for a unit, if any. A unit without an
/// entry is unconstrained.
pub fn plausible_range(unit: Unit) -> Option<(f64, f64)> {
    THRESHOLDS
        .iter()
        .find(|(u, _, _)| *u == unit)
        .map(|(_, min, max)| (*min, *max))
}
