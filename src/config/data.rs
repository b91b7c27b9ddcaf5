use super::traits::ConfigSection;
use crate::data::connectors::PanelSchema;
use crate::error::FactorcvError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: Option<String>,
    pub entity_column: String,
    pub time_column: String,
    pub label_column: String,
    pub feature_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: None,
            entity_column: "ticker".to_string(),
            time_column: "date".to_string(),
            label_column: "target".to_string(),
            feature_columns: Vec::new(),
            categorical_columns: Vec::new(),
        }
    }
}

impl DataConfig {
    pub fn schema(&self) -> PanelSchema {
        PanelSchema {
            entity_column: self.entity_column.clone(),
            time_column: self.time_column.clone(),
            label_column: self.label_column.clone(),
            feature_columns: self.feature_columns.clone(),
        }
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), FactorcvError> {
        if self.entity_column.is_empty() || self.time_column.is_empty() {
            return Err(FactorcvError::Configuration(
                "Entity and time columns must be named".to_string(),
            ));
        }
        if self.entity_column == self.time_column {
            return Err(FactorcvError::Configuration(format!(
                "Entity and time columns must differ (both '{}')",
                self.time_column
            )));
        }
        if self.feature_columns.contains(&self.label_column) {
            return Err(FactorcvError::Configuration(format!(
                "Label column '{}' cannot also be a feature",
                self.label_column
            )));
        }
        for categorical in &self.categorical_columns {
            if !self.feature_columns.contains(categorical) {
                return Err(FactorcvError::Configuration(format!(
                    "Categorical column '{}' is not listed as a feature",
                    categorical
                )));
            }
        }
        Ok(())
    }
}
