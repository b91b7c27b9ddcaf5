use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One hyperparameter configuration picked from a search results table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateParams {
    pub position: usize, // 0 = best by the ranking metric
    pub train_period_length: usize,
    pub test_period_length: usize,
    pub lookahead: usize,
    pub metric: String,
    pub metric_value: f64,
    pub model_params: BTreeMap<String, f64>,
}

/// Out-of-sample prediction keyed by (entity, timestamp). `fold` is the
/// candidate's walk-forward fold; ensemble records average several
/// candidates and carry `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub entity: String,
    pub timestamp: i64,
    pub fold: Option<usize>,
    pub actual: f64,
    pub predicted: f64,
}

/// Spearman IC of one cross-section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyIc {
    pub timestamp: i64,
    pub ic: f64,
    pub observations: usize,
}
