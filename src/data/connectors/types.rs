use serde::{Deserialize, Serialize};

/// Column roles of a panel dataset keyed by (entity, timestamp)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelSchema {
    pub entity_column: String,
    pub time_column: String,
    pub label_column: String,
    pub feature_columns: Vec<String>,
}

impl PanelSchema {
    pub fn new(entity_column: &str, time_column: &str, label_column: &str, features: &[&str]) -> Self {
        Self {
            entity_column: entity_column.to_string(),
            time_column: time_column.to_string(),
            label_column: label_column.to_string(),
            feature_columns: features.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Every column the panel must carry
    pub fn required_columns(&self) -> Vec<&str> {
        let mut columns = vec![
            self.entity_column.as_str(),
            self.time_column.as_str(),
            self.label_column.as_str(),
        ];
        columns.extend(self.feature_columns.iter().map(|c| c.as_str()));
        columns
    }
}

/// Summary of a loaded panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub num_rows: usize,
    pub num_entities: usize,
    pub num_periods: usize,
    pub first_period: Option<String>,
    pub last_period: Option<String>,
    pub feature_columns: Vec<String>,
}
