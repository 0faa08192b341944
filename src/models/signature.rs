//! Model signature inspection and input shape dispatch.

use std::fmt;

use ort::session::Session;
use ort::value::ValueType;

use crate::error::LoadError;

/// Declared dimensions of a tensor, `None` for symbolic or unknown sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorDims(pub Vec<Option<i64>>);

impl TensorDims {
    pub fn rank(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for TensorDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, dim) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match dim {
                Some(n) => write!(f, "{n}")?,
                None => write!(f, "?")?,
            }
        }
        write!(f, "]")
    }
}

/// Name and declared dims of one model input or output.
#[derive(Debug, Clone)]
pub struct TensorSpec {
    pub name: String,
    pub dims: TensorDims,
}

/// Ordered input and output specs read from a loaded model.
#[derive(Debug, Clone)]
pub struct ModelSignature {
    pub inputs: Vec<TensorSpec>,
    pub outputs: Vec<TensorSpec>,
}

impl ModelSignature {
    /// Read the declared signature from an ORT session.
    ///
    /// A model with no inputs or no outputs is rejected.
    pub fn from_session(session: &Session) -> Result<Self, LoadError> {
        let inputs: Vec<TensorSpec> = session
            .inputs
            .iter()
            .map(|input| tensor_spec(&input.name, &input.input_type))
            .collect();

        let outputs: Vec<TensorSpec> = session
            .outputs
            .iter()
            .map(|output| tensor_spec(&output.name, &output.output_type))
            .collect();

        if inputs.is_empty() || outputs.is_empty() {
            return Err(LoadError::InvalidModel {
                reason: format!(
                    "model declares {} input(s) and {} output(s)",
                    inputs.len(),
                    outputs.len()
                ),
            });
        }

        Ok(Self { inputs, outputs })
    }

    /// First declared input, the one the two scalar values are bound to.
    ///
    /// `from_session` guarantees at least one input exists.
    pub fn primary_input(&self) -> &TensorSpec {
        &self.inputs[0]
    }

    /// Declared output names, in declaration order.
    pub fn output_names(&self) -> Vec<String> {
        self.outputs.iter().map(|o| o.name.clone()).collect()
    }
}

fn tensor_spec(name: &str, value_type: &ValueType) -> TensorSpec {
    let dims = match value_type {
        ValueType::Tensor { dimensions: shape, .. } => shape
            .iter()
            .map(|d| if *d < 0 { None } else { Some(*d) })
            .collect(),
        // Non-tensor IO carries no dims; binding rejects it at dispatch.
        _ => Vec::new(),
    };

    TensorSpec {
        name: name.to_string(),
        dims: TensorDims(dims),
    }
}

/// Binding strategy for the first declared model input, resolved once at
/// load time rather than re-inspected per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLayout {
    /// Flat vector, e.g. `[2]`: bound as `[volume, impeller_speed]`.
    Rank1,
    /// Batch-of-one vector, e.g. `[1, 2]`: bound as `[[volume, impeller_speed]]`.
    Rank2,
    /// Any other rank; prediction fails fast without invoking the runtime.
    Unsupported(TensorDims),
}

impl InputLayout {
    pub fn from_dims(dims: &TensorDims) -> Self {
        match dims.rank() {
            1 => InputLayout::Rank1,
            2 => InputLayout::Rank2,
            _ => InputLayout::Unsupported(dims.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank1_dims_dispatch_to_flat_vector() {
        let dims = TensorDims(vec![Some(2)]);
        assert_eq!(InputLayout::from_dims(&dims), InputLayout::Rank1);
    }

    #[test]
    fn test_rank2_dims_dispatch_to_batched_vector() {
        let dims = TensorDims(vec![Some(1), Some(2)]);
        assert_eq!(InputLayout::from_dims(&dims), InputLayout::Rank2);

        // Symbolic batch dimension dispatches the same way.
        let dims = TensorDims(vec![None, Some(2)]);
        assert_eq!(InputLayout::from_dims(&dims), InputLayout::Rank2);
    }

    #[test]
    fn test_higher_ranks_are_unsupported() {
        let dims = TensorDims(vec![Some(2), Some(2), Some(2)]);
        assert_eq!(
            InputLayout::from_dims(&dims),
            InputLayout::Unsupported(dims.clone())
        );
    }

    #[test]
    fn test_scalar_rank_is_unsupported() {
        let dims = TensorDims(Vec::new());
        assert!(matches!(
            InputLayout::from_dims(&dims),
            InputLayout::Unsupported(_)
        ));
    }

    #[test]
    fn test_dims_display_marks_unknown_sizes() {
        let dims = TensorDims(vec![None, Some(2)]);
        assert_eq!(dims.to_string(), "[?, 2]");
    }
}
