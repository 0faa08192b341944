//! ONNX model loading and inference

pub mod inference;
pub mod loader;
pub mod signature;

pub use inference::{InferenceEngine, InferenceResult};
pub use loader::{LoadedModel, ModelLoader};
pub use signature::{InputLayout, ModelSignature};
