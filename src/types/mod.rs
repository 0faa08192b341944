//! Type definitions for the mixing predictor

pub mod report;
pub mod sample;

pub use report::{MixingReport, OUTPUT_LABELS};
pub use sample::MixingInputs;
