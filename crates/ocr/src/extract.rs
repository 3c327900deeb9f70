use regex::Regex;
use std::sync::OnceLock;

use crate::types::RawToken;

/// A numeral with at most one `.` or `,` decimal separator, followed by up
/// to five lowercase letters or `/`. The whitespace between the two is
/// optional — OCR output drops and invents spacing freely.
fn re_pair() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"(\d+(?:[.,]\d+)?)\s*([a-z/]{1,5})").expect("invalid regex"))
}

/// Scan raw OCR text for `(numeral, unit token)` pairs, left to right.
///
/// Returns every non-overlapping match in order of appearance. A numeral
/// with no unit-like token after it is simply not emitted. No parsing,
/// correction or decimal normalization happens here.
pub fn extract_pairs(text: &str) -> Vec<RawToken> {
    re_pair()
        .captures_iter(text)
        .map(|c| RawToken {
            number: c[1].to_string(),
            unit: c[2].to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(text: &str) -> Vec<(String, String)> {
        extract_pairs(text)
            .into_iter()
            .map(|t| (t.number, t.unit))
            .collect()
    }

    #[test]
    fn finds_pairs_in_order() {
        assert_eq!(
            pairs("23.5 kg and 10g more"),
            vec![
                ("23.5".to_string(), "kg".to_string()),
                ("10".to_string(), "g".to_string()),
            ]
        );
    }

    #[test]
    fn comma_decimal_is_captured_verbatim() {
        assert_eq!(pairs("23,5 kg"), vec![("23,5".to_string(), "kg".to_string())]);
    }

    #[test]
    fn whitespace_between_number_and_unit_is_optional() {
        assert_eq!(pairs("100ml"), vec![("100".to_string(), "ml".to_string())]);
        assert_eq!(pairs("100   ml"), vec![("100".to_string(), "ml".to_string())]);
    }

    #[test]
    fn slash_units_are_single_tokens() {
        assert_eq!(
            pairs("60 km/hr"),
            vec![("60".to_string(), "km/hr".to_string())]
        );
    }

    #[test]
    fn numeral_without_unit_is_skipped() {
        assert!(pairs("12345").is_empty());
        assert!(pairs("42 ").is_empty());
    }

    #[test]
    fn unit_without_numeral_is_skipped() {
        assert!(pairs("kg ml sec").is_empty());
    }

    #[test]
    fn empty_and_noise_inputs_yield_nothing() {
        assert!(pairs("").is_empty());
        assert!(pairs("...,,//").is_empty());
    }

    #[test]
    fn tolerates_ocr_line_noise() {
        assert_eq!(
            pairs("wt.\n23.5kg\nexp 12/2026"),
            vec![
                ("23.5".to_string(), "kg".to_string()),
                ("12".to_string(), "/".to_string()),
            ]
        );
    }
}
