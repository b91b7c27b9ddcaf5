use super::traits::ConfigSection;
use crate::error::FactorcvError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub metrics_path: Option<String>,
    pub metric: String,
    pub top_n: usize,
    pub lookahead: Option<usize>,
    pub param_columns: Vec<String>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            metrics_path: None,
            metric: "daily_ic_mean".to_string(),
            top_n: 10,
            lookahead: None,
            param_columns: Vec::new(),
        }
    }
}

impl ConfigSection for SelectionConfig {
    fn section_name() -> &'static str {
        "selection"
    }

    fn validate(&self) -> Result<(), FactorcvError> {
        if self.metric.is_empty() {
            return Err(FactorcvError::Configuration(
                "Selection metric must be named".to_string(),
            ));
        }
        if self.top_n == 0 {
            return Err(FactorcvError::Configuration(
                "top_n must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
