//! ONNX model loader

use std::io::Write;
use std::path::Path;

use ort::session::{builder::GraphOptimizationLevel, Session};
use tracing::{debug, info, warn};

use crate::error::LoadError;
use crate::models::signature::{InputLayout, ModelSignature};

/// Loaded ONNX model with its signature and the input binding resolved at
/// load time.
#[derive(Debug)]
pub struct LoadedModel {
    /// Model name used in logs and reports
    pub name: String,
    /// ONNX Runtime session
    pub session: Session,
    /// Declared input and output specs
    pub signature: ModelSignature,
    /// Name of the input the scalar values are bound to
    pub input_name: String,
    /// Declared output names, in declaration order
    pub output_names: Vec<String>,
    /// Binding strategy for the first input
    pub input_layout: InputLayout,
}

/// Loader for ONNX models
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with default settings (1 thread)
    pub fn new() -> Result<Self, LoadError> {
        Self::with_threads(1)
    }

    /// Create a new model loader with specified number of threads
    pub fn with_threads(onnx_threads: usize) -> Result<Self, LoadError> {
        ort::init().commit().map_err(|e| LoadError::InvalidModel {
            reason: format!("onnxruntime initialization failed: {e}"),
        })?;
        info!(onnx_threads = onnx_threads, "ONNX Runtime initialized");
        Ok(Self { onnx_threads })
    }

    /// Load a model from a file on disk.
    pub fn load_from_path<P: AsRef<Path>>(
        &self,
        path: P,
        name: &str,
    ) -> Result<LoadedModel, LoadError> {
        let path = path.as_ref();

        info!(model = %name, path = %path.display(), threads = self.onnx_threads, "Loading ONNX model");

        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.with_intra_threads(self.onnx_threads))
            .and_then(|b| b.commit_from_file(path))
            .map_err(|e| LoadError::InvalidModel {
                reason: e.to_string(),
            })?;

        let signature = ModelSignature::from_session(&session)?;

        if signature.inputs.len() > 1 {
            warn!(
                model = %name,
                declared = signature.inputs.len(),
                "Model declares multiple inputs; only the first will be bound"
            );
        }

        let primary = signature.primary_input();
        let input_name = primary.name.clone();
        let input_layout = InputLayout::from_dims(&primary.dims);
        let output_names = signature.output_names();

        debug!(
            model = %name,
            input = %input_name,
            dims = %primary.dims,
            layout = ?input_layout,
            "Resolved input binding"
        );

        info!(
            model = %name,
            input = %input_name,
            outputs = output_names.len(),
            "Model loaded successfully"
        );

        Ok(LoadedModel {
            name: name.to_string(),
            session,
            signature,
            input_name,
            output_names,
            input_layout,
        })
    }

    /// Load a model from raw bytes.
    ///
    /// The bytes are written to a uniquely named temporary file so the
    /// runtime can open them. The file is removed when this call returns,
    /// whether loading succeeded or failed.
    pub fn load_from_bytes(&self, bytes: &[u8], name: &str) -> Result<LoadedModel, LoadError> {
        self.load_from_bytes_in(bytes, name, std::env::temp_dir())
    }

    fn load_from_bytes_in<P: AsRef<Path>>(
        &self,
        bytes: &[u8],
        name: &str,
        dir: P,
    ) -> Result<LoadedModel, LoadError> {
        let mut tmp = tempfile::Builder::new()
            .prefix("mixing-model-")
            .suffix(".onnx")
            .tempfile_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;

        debug!(
            model = %name,
            path = %tmp.path().display(),
            bytes = bytes.len(),
            "Wrote model bytes to temporary file"
        );

        // `tmp` is dropped on every exit path, deleting the file.
        self.load_from_path(tmp.path(), name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bytes_are_rejected_and_cleaned_up() {
        let loader = ModelLoader::new().unwrap();
        let dir = tempfile::tempdir().unwrap();

        let err = loader
            .load_from_bytes_in(b"not an onnx graph", "garbage", dir.path())
            .unwrap_err();
        assert!(matches!(err, LoadError::InvalidModel { .. }));

        // The temporary model file must not outlive the failed load.
        let leftover = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftover, 0);
    }

    // Success-path load tests require a real ONNX model artifact.
}
