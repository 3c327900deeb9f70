pub mod correct;
pub mod distance;
pub mod extract;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;
pub mod types;
pub mod validate;

pub use correct::normalize_unit;
pub use distance::edit_distance;
pub use extract::extract_pairs;
pub use pipeline::{classify_text, CapturePipeline, CaptureResult, PipelineError};
pub use preprocess::{prepare_for_ocr, PreprocessError};
pub use recognizer::{MockRecognizer, OcrBackend, OcrError, CHAR_WHITELIST};
pub use types::{Classified, RawToken, ReadValue, RejectReason, Rejection};
pub use validate::within_plausible_range;
