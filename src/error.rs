//! Error types for model loading and inference.

use std::io;

use thiserror::Error;

use crate::models::signature::TensorDims;

/// Errors raised while opening an ONNX model into a session.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The bytes or file were rejected by the runtime, or the model declares
    /// no inputs or no outputs.
    #[error("invalid model: {reason}")]
    InvalidModel { reason: String },

    /// The temporary model file could not be created or written.
    #[error("model file I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while running a prediction against a loaded model.
#[derive(Debug, Error)]
pub enum InferError {
    /// The model's first input has a rank this tool does not bind.
    #[error("unsupported input shape {dims}: the model must accept a rank-1 or rank-2 input")]
    UnsupportedShape { dims: TensorDims },

    /// The runtime raised an error during execution.
    #[error("inference failed: {message}")]
    RuntimeFailure { message: String },
}
