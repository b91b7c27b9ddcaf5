use super::traits::ConfigSection;
use crate::error::FactorcvError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    pub n_splits: usize,
    pub parallel: bool,
    pub output_path: Option<String>,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            n_splits: 12,
            parallel: true,
            output_path: None,
        }
    }
}

impl ConfigSection for PredictionConfig {
    fn section_name() -> &'static str {
        "prediction"
    }

    fn validate(&self) -> Result<(), FactorcvError> {
        if self.n_splits == 0 {
            return Err(FactorcvError::Configuration(
                "Prediction n_splits must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
