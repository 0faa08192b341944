//! Mixing Predictor Library
//!
//! Feeds two process parameters (volume and impeller speed) into a
//! pre-trained ONNX surrogate model and reports the predicted mixing
//! parameters: shear rate, power, tip speed, Reynolds number, power number.

pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod types;

pub use config::AppConfig;
pub use error::{InferError, LoadError};
pub use models::inference::{InferenceEngine, InferenceResult};
pub use models::loader::{LoadedModel, ModelLoader};
pub use types::{report::MixingReport, sample::MixingInputs};
