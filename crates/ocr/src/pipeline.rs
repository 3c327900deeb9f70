use thiserror::Error;

use mensura_core::Measurement;

use crate::correct::normalize_unit;
use crate::extract::extract_pairs;
use crate::preprocess;
use crate::recognizer::{OcrBackend, OcrError};
use crate::types::{Classified, RawToken, ReadValue, RejectReason, Rejection};
use crate::validate::within_plausible_range;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Image preprocessing failed: {0}")]
    Preprocess(#[from] preprocess::PreprocessError),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
}

/// The result of a single capture run.
#[derive(Debug)]
pub struct CaptureResult {
    /// Text as recognized, before canonicalization.
    pub ocr_text: String,
    /// Ordered classification of every scanned pair.
    pub results: Vec<Classified>,
}

/// Classify every `(numeral, unit token)` pair found in one blob of OCR
/// text.
///
/// Pure function of its input: each pair parses, normalizes and validates
/// independently, and a malformed pair becomes a rejection in the output
/// rather than an error of the whole call. Duplicate detection against
/// storage is the caller's job — a uniqueness violation there should be
/// surfaced as a rejection with [`RejectReason::DuplicateValue`] alongside
/// the ones produced here.
pub fn classify_text(text: &str) -> Vec<Classified> {
    // Same canonicalization the original OCR path applies: the extractor
    // grammar only knows lowercase letters, and the micro sign folds to
    // `u` so `µg` survives tokenization.
    let text = text.to_lowercase().replace('µ', "u");
    extract_pairs(&text).into_iter().map(classify_pair).collect()
}

fn classify_pair(token: RawToken) -> Classified {
    let Some(value) = parse_value(&token.number) else {
        return Classified::Rejected(Rejection {
            value: ReadValue::Text(token.number),
            unit: token.unit,
            reason: RejectReason::InvalidNumber,
        });
    };

    let Some(unit) = normalize_unit(&token.unit) else {
        return Classified::Rejected(Rejection {
            value: ReadValue::Number(value),
            unit: token.unit,
            reason: RejectReason::UnknownUnit,
        });
    };

    if !within_plausible_range(unit, value) {
        return Classified::Rejected(Rejection {
            value: ReadValue::Number(value),
            unit: unit.to_string(),
            reason: RejectReason::ValueOutOfRange,
        });
    }

    Classified::Accepted(Measurement { value, unit })
}

/// Parse a numeral after normalizing a `,` decimal separator to `.`.
fn parse_value(raw: &str) -> Option<f64> {
    raw.replace(',', ".").parse::<f64>().ok()
}

/// Orchestrates a full capture: preprocess → OCR → classification.
///
/// Holds no mutable state; safe to share across request handlers.
pub struct CapturePipeline<R: OcrBackend> {
    recognizer: R,
}

impl<R: OcrBackend> CapturePipeline<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    /// Process raw image bytes (from an upload or camera capture).
    pub fn process_bytes(&self, data: &[u8]) -> Result<CaptureResult, PipelineError> {
        let image = preprocess::prepare_for_ocr(data)?;
        let ocr_text = self.recognizer.recognize(&image)?;
        let results = classify_text(&ocr_text);
        Ok(CaptureResult { ocr_text, results })
    }
}
