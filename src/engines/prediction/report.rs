use super::base::CandidateResult;
use crate::engines::metrics::{IcSummary, InformationCoefficient};
use crate::error::Result;
use crate::types::{DailyIc, PredictionRecord};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const ENSEMBLE_LABEL: &str = "ensemble";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionReport {
    pub regressor: String,
    pub candidates: Vec<CandidateResult>,
    pub ensemble: Vec<PredictionRecord>,
    pub ensemble_daily_ic: Vec<DailyIc>,
    pub ensemble_ic: IcSummary,
}

impl PredictionReport {
    /// Reduce per-candidate results into one report. Candidates are kept in
    /// rank position order. The ensemble averages predictions per
    /// (entity, timestamp) over the candidates covering it.
    pub fn from_candidates(regressor: &str, mut candidates: Vec<CandidateResult>) -> Self {
        candidates.sort_by_key(|c| c.params.position);

        let mut pooled: BTreeMap<(i64, &str), (f64, usize, &PredictionRecord)> = BTreeMap::new();
        for candidate in &candidates {
            for record in &candidate.predictions {
                let entry = pooled
                    .entry((record.timestamp, record.entity.as_str()))
                    .or_insert((0.0, 0, record));
                entry.0 += record.predicted;
                entry.1 += 1;
            }
        }

        let ensemble: Vec<PredictionRecord> = pooled
            .into_values()
            .map(|(sum, count, first)| PredictionRecord {
                entity: first.entity.clone(),
                timestamp: first.timestamp,
                fold: None,
                actual: first.actual,
                predicted: sum / count as f64,
            })
            .collect();

        let ensemble_daily_ic = InformationCoefficient::daily(&ensemble);
        let ic_values: Vec<f64> = ensemble_daily_ic.iter().map(|d| d.ic).collect();
        let ensemble_ic = InformationCoefficient::summarize(&ic_values);

        Self {
            regressor: regressor.to_string(),
            candidates,
            ensemble,
            ensemble_daily_ic,
            ensemble_ic,
        }
    }

    /// Candidate with the highest mean daily IC; ties go to the lower
    /// rank position
    pub fn best(&self) -> Option<&CandidateResult> {
        self.candidates
            .iter()
            .filter(|c| c.ic.count > 0)
            .reduce(|best, c| if c.ic.mean > best.ic.mean { c } else { best })
    }

    /// Long format: one row per (candidate, entity, timestamp)
    pub fn to_frame(&self) -> Result<DataFrame> {
        let mut candidate = Vec::new();
        let mut entity = Vec::new();
        let mut timestamp = Vec::new();
        let mut fold = Vec::new();
        let mut actual = Vec::new();
        let mut predicted = Vec::new();

        let labelled = self
            .candidates
            .iter()
            .map(|c| (c.params.position.to_string(), &c.predictions))
            .chain(std::iter::once((ENSEMBLE_LABEL.to_string(), &self.ensemble)));

        for (label, records) in labelled {
            for record in records {
                candidate.push(label.clone());
                entity.push(record.entity.clone());
                timestamp.push(record.timestamp);
                fold.push(record.fold.map(|f| f as u64));
                actual.push(record.actual);
                predicted.push(record.predicted);
            }
        }

        Ok(DataFrame::new(vec![
            Column::new("candidate".into(), candidate),
            Column::new("entity".into(), entity),
            Column::new("timestamp".into(), timestamp),
            Column::new("fold".into(), fold),
            Column::new("actual".into(), actual),
            Column::new("predicted".into(), predicted),
        ])?)
    }

    pub fn summary_json(&self) -> Result<String> {
        let candidates: Vec<serde_json::Value> = self
            .candidates
            .iter()
            .map(|c| {
                serde_json::json!({
                    "position": c.params.position,
                    "train_period_length": c.params.train_period_length,
                    "test_period_length": c.params.test_period_length,
                    "lookahead": c.params.lookahead,
                    "folds": c.folds,
                    "predictions": c.predictions.len(),
                    "ic": c.ic,
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&serde_json::json!({
            "regressor": self.regressor,
            "candidates": candidates,
            "ensemble_ic": self.ensemble_ic,
        }))?)
    }
}
