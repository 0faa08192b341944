//! Input parameters for a mixing prediction

use serde::{Deserialize, Serialize};

/// The two process parameters consumed by the surrogate models.
///
/// Values are unconstrained in range; the model decides what is physical.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MixingInputs {
    /// Working volume of the vessel
    pub volume: f64,
    /// Impeller speed
    pub impeller_speed: f64,
}

impl MixingInputs {
    pub fn new(volume: f64, impeller_speed: f64) -> Self {
        Self {
            volume,
            impeller_speed,
        }
    }
}
