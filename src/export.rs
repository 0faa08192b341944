//! Rendering and export of prediction results

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::models::inference::InferenceResult;
use crate::types::report::{MixingReport, OUTPUT_LABELS};

/// Render the report as the plain-text block shown to the user.
///
/// Complete reports list the five labeled parameters; incomplete reports
/// fall back to a warning plus the raw values, positionally numbered.
pub fn render_text(report: &MixingReport) -> String {
    if report.complete {
        report
            .labeled
            .iter()
            .map(|lv| format!("{}: {}", lv.label, lv.value))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        let mut lines = vec![format!(
            "Warning: model returned {} value(s), expected {}. Raw values:",
            report.raw_values.len(),
            OUTPUT_LABELS.len()
        )];
        for (i, value) in report.raw_values.iter().enumerate() {
            lines.push(format!("Output {}: {}", i + 1, value));
        }
        lines.join("\n")
    }
}

/// Render all output tensors as CSV, one row per flattened output.
pub fn render_csv(result: &InferenceResult) -> String {
    result
        .outputs
        .iter()
        .map(|output| {
            output
                .values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the CSV rendering to a file.
pub fn write_csv<P: AsRef<Path>>(result: &InferenceResult, path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render_csv(result))
        .with_context(|| format!("Failed to write CSV to {}", path.display()))?;

    info!(path = %path.display(), "Results exported as CSV");
    Ok(())
}

/// Serialize the full report as pretty-printed JSON.
pub fn render_json(report: &MixingReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report as JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inference::NamedOutput;
    use crate::types::sample::MixingInputs;

    fn result_with_outputs(outputs: Vec<Vec<f32>>) -> InferenceResult {
        InferenceResult {
            outputs: outputs
                .into_iter()
                .enumerate()
                .map(|(i, values)| NamedOutput {
                    name: format!("output_{i}"),
                    dims: vec![1, values.len() as i64],
                    values,
                })
                .collect(),
        }
    }

    #[test]
    fn test_complete_report_renders_labeled_lines() {
        let result = result_with_outputs(vec![vec![1.5, 2.0, 3.25, 4.0, 5.0]]);
        let report =
            MixingReport::from_result("model", MixingInputs::new(2.5, 100.0), &result);
        let text = render_text(&report);

        assert_eq!(
            text,
            "Shear Rate: 1.5\nPower: 2\nTip Speed: 3.25\nReynolds Number: 4\nPower Number: 5"
        );
    }

    #[test]
    fn test_short_report_renders_warning_and_raw_values() {
        let result = result_with_outputs(vec![vec![1.0, 2.0, 3.0]]);
        let report = MixingReport::from_result("model", MixingInputs::new(1.0, 1.0), &result);
        let text = render_text(&report);

        assert!(text.starts_with("Warning: model returned 3 value(s)"));
        assert!(text.contains("Output 1: 1"));
        assert!(text.contains("Output 3: 3"));
        assert!(!text.contains("Shear Rate"));
    }

    #[test]
    fn test_csv_is_one_row_per_output() {
        let result = result_with_outputs(vec![vec![1.5, 2.0, 3.25], vec![9.0]]);

        assert_eq!(render_csv(&result), "1.5,2,3.25\n9");
    }

    #[test]
    fn test_csv_writes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        let result = result_with_outputs(vec![vec![1.0, 2.0]]);

        write_csv(&result, &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "1,2");
    }

    #[test]
    fn test_json_round_trips_the_report() {
        let result = result_with_outputs(vec![vec![1.0, 2.0, 3.0, 4.0, 5.0]]);
        let report = MixingReport::from_result("model", MixingInputs::new(1.0, 1.0), &result);
        let json = render_json(&report).unwrap();
        let parsed: MixingReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.report_id, report.report_id);
        assert_eq!(parsed.labeled.len(), 5);
    }
}
