//! Inference invocation for mixing parameter models

use std::time::Instant;

use ort::value::{DynValue, Tensor};
use tracing::{debug, warn};

use crate::error::InferError;
use crate::models::loader::LoadedModel;
use crate::models::signature::InputLayout;
use crate::types::sample::MixingInputs;

/// One named output tensor returned by the model.
#[derive(Debug, Clone)]
pub struct NamedOutput {
    /// Declared output name
    pub name: String,
    /// Concrete dims of the returned tensor
    pub dims: Vec<i64>,
    /// Flattened values
    pub values: Vec<f32>,
}

/// Ordered outputs of a single inference invocation.
///
/// Created per invocation and discarded once the caller has rendered it;
/// nothing is cached between runs.
#[derive(Debug, Clone)]
pub struct InferenceResult {
    pub outputs: Vec<NamedOutput>,
}

impl InferenceResult {
    /// Flattened values of the first declared output, which carries the
    /// predicted mixing parameters.
    pub fn primary_values(&self) -> &[f32] {
        self.outputs
            .first()
            .map(|o| o.values.as_slice())
            .unwrap_or(&[])
    }
}

/// Runs mixing parameter predictions against one loaded model.
pub struct InferenceEngine {
    model: LoadedModel,
}

impl InferenceEngine {
    /// Create an engine around an already loaded model.
    pub fn new(model: LoadedModel) -> Self {
        Self { model }
    }

    /// Name of the underlying model.
    pub fn model_name(&self) -> &str {
        &self.model.name
    }

    /// The loaded model, including its declared signature.
    pub fn model(&self) -> &LoadedModel {
        &self.model
    }

    /// Run one prediction for the given volume and impeller speed.
    ///
    /// All declared outputs are requested and returned in declaration order,
    /// untruncated.
    pub fn predict(&mut self, inputs: &MixingInputs) -> Result<InferenceResult, InferError> {
        let start = Instant::now();

        let (shape, data) = build_input(&self.model.input_layout, inputs)?;

        let input_tensor =
            Tensor::from_array((shape, data)).map_err(|e| InferError::RuntimeFailure {
                message: e.to_string(),
            })?;

        let outputs = self
            .model
            .session
            .run(
                ort::inputs![&self.model.input_name => input_tensor].map_err(|e| {
                    InferError::RuntimeFailure {
                        message: e.to_string(),
                    }
                })?,
            )
            .map_err(|e| InferError::RuntimeFailure {
                message: e.to_string(),
            })?;

        let mut collected = Vec::with_capacity(self.model.output_names.len());
        for name in &self.model.output_names {
            match outputs.get(name.as_str()) {
                Some(value) => collected.push(extract_output(name, value)?),
                None => {
                    warn!(output = %name, "Declared output missing from run results");
                }
            }
        }

        debug!(
            model = %self.model.name,
            outputs = collected.len(),
            latency_us = start.elapsed().as_micros() as u64,
            "Inference complete"
        );

        Ok(InferenceResult { outputs: collected })
    }
}

/// Build the tensor shape and data for the model's first input.
///
/// The two doubles are cast to f32 before binding. Ranks other than 1 and 2
/// are rejected without touching the runtime.
fn build_input(
    layout: &InputLayout,
    inputs: &MixingInputs,
) -> Result<(Vec<i64>, Vec<f32>), InferError> {
    let values = vec![inputs.volume as f32, inputs.impeller_speed as f32];

    match layout {
        InputLayout::Rank1 => Ok((vec![2], values)),
        InputLayout::Rank2 => Ok((vec![1, 2], values)),
        InputLayout::Unsupported(dims) => Err(InferError::UnsupportedShape { dims: dims.clone() }),
    }
}

/// Extract one output tensor as flattened f32 values.
///
/// Integer label outputs are widened to f32 so every output stays renderable.
fn extract_output(name: &str, value: &DynValue) -> Result<NamedOutput, InferError> {
    if let Ok((shape, data)) = value.try_extract_raw_tensor::<f32>() {
        return Ok(NamedOutput {
            name: name.to_string(),
            dims: shape.iter().copied().collect(),
            values: data.to_vec(),
        });
    }

    if let Ok((shape, data)) = value.try_extract_raw_tensor::<i64>() {
        return Ok(NamedOutput {
            name: name.to_string(),
            dims: shape.iter().copied().collect(),
            values: data.iter().map(|&v| v as f32).collect(),
        });
    }

    Err(InferError::RuntimeFailure {
        message: format!("output '{name}' is not a numeric tensor"),
    })
}
