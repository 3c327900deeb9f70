pub mod lexicon;
pub mod measurement;
pub mod unit;

pub use lexicon::{misread_correction, plausible_range, MISREADS, THRESHOLDS, VOCABULARY};
pub use measurement::Measurement;
pub use unit::Unit;
