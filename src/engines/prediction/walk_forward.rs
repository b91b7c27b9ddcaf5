use super::base::{CandidateResult, Regressor};
use super::report::PredictionReport;
use crate::config::{PredictionConfig, SplitterConfig};
use crate::data::PanelDataset;
use crate::engines::metrics::InformationCoefficient;
use crate::engines::splitters::WalkForwardSplitter;
use crate::error::{FactorcvError, Result};
use crate::types::{CandidateParams, PredictionRecord};
use rayon::prelude::*;

/// Generates out-of-sample predictions for a list of candidate
/// configurations. Each candidate is an isolated (split, fit, predict) run
/// over the shared panel; the runs are reduced into one report.
pub struct WalkForwardPredictor {
    n_splits: usize,
    parallel: bool,
}

impl WalkForwardPredictor {
    pub fn new(config: &PredictionConfig) -> Self {
        Self {
            n_splits: config.n_splits,
            parallel: config.parallel,
        }
    }

    pub fn run(
        &self,
        panel: &PanelDataset,
        candidates: &[CandidateParams],
        regressor: &dyn Regressor,
    ) -> Result<PredictionReport> {
        log::info!(
            "Running {} candidates with {} ({})",
            candidates.len(),
            regressor.name(),
            if self.parallel { "parallel" } else { "sequential" }
        );

        let results = if self.parallel {
            candidates
                .par_iter()
                .map(|candidate| self.run_candidate(panel, candidate, regressor))
                .collect::<Result<Vec<_>>>()?
        } else {
            candidates
                .iter()
                .map(|candidate| self.run_candidate(panel, candidate, regressor))
                .collect::<Result<Vec<_>>>()?
        };

        Ok(PredictionReport::from_candidates(regressor.name(), results))
    }

    pub fn run_candidate(
        &self,
        panel: &PanelDataset,
        candidate: &CandidateParams,
        regressor: &dyn Regressor,
    ) -> Result<CandidateResult> {
        let splitter = WalkForwardSplitter::new(SplitterConfig::new(
            self.n_splits,
            candidate.train_period_length,
            candidate.test_period_length,
            candidate.lookahead,
        ))?
        .with_time_column(&panel.schema().time_column);

        let mut predictions: Vec<PredictionRecord> = Vec::new();
        let mut folds = 0;

        for split in splitter.split_panel(panel)? {
            let (train, test) = split.take(panel.frame())?;

            let model = regressor.fit(
                candidate,
                &panel.features_of(&train)?,
                &panel.labels_of(&train)?,
            )?;
            let predicted = model.predict(&panel.features_of(&test)?)?;
            if predicted.len() != test.height() {
                return Err(FactorcvError::Model(format!(
                    "{} returned {} predictions for {} test rows",
                    regressor.name(),
                    predicted.len(),
                    test.height()
                )));
            }

            let actual = panel.labels_of(&test)?;
            let entities = panel.entities_of(&test)?;
            let timestamps = panel.timestamps_of(&test)?;

            predictions.extend(
                entities
                    .into_iter()
                    .zip(timestamps)
                    .zip(actual.into_iter().zip(predicted))
                    .map(|((entity, timestamp), (actual, predicted))| PredictionRecord {
                        entity,
                        timestamp,
                        fold: Some(split.fold_num),
                        actual,
                        predicted,
                    }),
            );

            log::debug!(
                "Candidate {} fold {}: {} train rows, {} test rows",
                candidate.position,
                split.fold_num,
                train.height(),
                test.height()
            );
            folds += 1;
        }

        let daily_ic = InformationCoefficient::daily(&predictions);
        let ic_values: Vec<f64> = daily_ic.iter().map(|d| d.ic).collect();
        let ic = InformationCoefficient::summarize(&ic_values);

        log::info!(
            "Candidate {} (train {}, test {}, lookahead {}): {} folds, mean IC {:.4}",
            candidate.position,
            candidate.train_period_length,
            candidate.test_period_length,
            candidate.lookahead,
            folds,
            ic.mean
        );

        Ok(CandidateResult {
            params: candidate.clone(),
            folds,
            predictions,
            daily_ic,
            ic,
        })
    }
}
