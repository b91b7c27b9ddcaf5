use crate::engines::metrics::IcSummary;
use crate::error::FactorcvError;
use crate::types::{CandidateParams, DailyIc, PredictionRecord};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// A model fitted on one training window
pub trait FittedModel: Send {
    /// One prediction per row of `features`
    fn predict(&self, features: &DataFrame) -> Result<Vec<f64>, FactorcvError>;
}

/// Model-fitting seam for external learners (gradient boosting et al.)
pub trait Regressor: Send + Sync {
    fn name(&self) -> &str;

    fn fit(
        &self,
        params: &CandidateParams,
        features: &DataFrame,
        labels: &[f64],
    ) -> Result<Box<dyn FittedModel>, FactorcvError>;
}

/// Out-of-sample result of one candidate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateResult {
    pub params: CandidateParams,
    pub folds: usize,
    pub predictions: Vec<PredictionRecord>,
    pub daily_ic: Vec<DailyIc>,
    pub ic: IcSummary,
}
