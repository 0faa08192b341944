//! Prediction report data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::inference::InferenceResult;
use crate::types::sample::MixingInputs;

/// Display labels for the five mixing parameters, in model output order.
pub const OUTPUT_LABELS: [&str; 5] = [
    "Shear Rate",
    "Power",
    "Tip Speed",
    "Reynolds Number",
    "Power Number",
];

/// One labeled scalar in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: f32,
}

/// Report built from one inference invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixingReport {
    /// Unique report identifier
    pub report_id: String,

    /// Name of the model that produced the outputs
    pub model_name: String,

    /// Inputs the prediction was run with
    pub inputs: MixingInputs,

    /// Labeled mixing parameters; empty when the model returned fewer
    /// values than the label list
    pub labeled: Vec<LabeledValue>,

    /// Flattened primary output, untruncated
    pub raw_values: Vec<f32>,

    /// Whether all five labeled parameters were present
    pub complete: bool,

    /// Report generation timestamp
    pub timestamp: DateTime<Utc>,
}

impl MixingReport {
    /// Build a report from the primary output of an inference result.
    ///
    /// A primary output shorter than the label list marks the report
    /// incomplete; values are never indexed past what the model returned.
    pub fn from_result(model_name: &str, inputs: MixingInputs, result: &InferenceResult) -> Self {
        let raw_values: Vec<f32> = result.primary_values().to_vec();
        let complete = raw_values.len() >= OUTPUT_LABELS.len();

        if !complete {
            warn!(
                model = %model_name,
                returned = raw_values.len(),
                expected = OUTPUT_LABELS.len(),
                "Model returned fewer values than the labeled parameters"
            );
        }

        let labeled = if complete {
            OUTPUT_LABELS
                .iter()
                .zip(raw_values.iter())
                .map(|(label, &value)| LabeledValue {
                    label: (*label).to_string(),
                    value,
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            report_id: uuid::Uuid::new_v4().to_string(),
            model_name: model_name.to_string(),
            inputs,
            labeled,
            raw_values,
            complete,
            timestamp: Utc::now(),
        }
    }
}
