//! Unit spelling-correction against the fixed vocabulary.

use mensura_core::lexicon::{misread_correction, VOCABULARY};
use mensura_core::Unit;

use crate::distance::edit_distance;

/// Edits allowed between a token and a vocabulary entry before the match
/// is discarded. Two edits recover most single-glyph OCR damage without
/// letting arbitrary words collapse onto short symbols.
const MAX_EDITS: usize = 2;

/// Fold a token into the form used for comparison: trimmed, lowercased,
/// micro sign replaced with a plain `u`.
fn fold(token: &str) -> String {
    token.trim().to_lowercase().replace('µ', "u")
}

/// Recover a canonical unit from a raw OCR token.
///
/// The token is folded, substituted once through the misread table, then
/// fuzzy matched against every vocabulary entry. The entry at the strictly
/// smallest edit distance wins, accepted only at distance ≤ 2; ties keep
/// the earlier vocabulary entry. The selected entry passes through the
/// misread table one more time, so accepted spellings like `s` and `gm`
/// come back as `sec` and `g`. Returns `None` when nothing is close
/// enough.
pub fn normalize_unit(raw: &str) -> Option<Unit> {
    let folded = fold(raw);
    // First hop: a token the misread table knows is replaced outright
    // before any fuzzy matching, and the replacement is authoritative.
    let token = match misread_correction(&folded) {
        Some(mapped) => fold(mapped),
        None => folded,
    };

    let mut best: Option<(&'static str, usize)> = None;
    for &entry in VOCABULARY {
        let d = edit_distance(&token, &fold(entry));
        // Strictly smaller only, so ties resolve to the earlier entry.
        if best.map_or(d <= MAX_EDITS, |(_, best_d)| d < best_d) {
            best = Some((entry, d));
        }
    }

    let (entry, _) = best?;
    // Second hop: vocabulary spellings that stand for another symbol
    // resolve to it. Looked up as written, so `µg` stays `µg`.
    let symbol = misread_correction(entry).unwrap_or(entry);
    symbol.parse().ok()
}
