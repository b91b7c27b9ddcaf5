use crate::config::SelectionConfig;
use crate::data::connectors::{is_numeric, CsvConnector};
use crate::error::{FactorcvError, Result};
use crate::types::CandidateParams;
use polars::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

pub const TRAIN_LENGTH_COLUMN: &str = "train_length";
pub const TEST_LENGTH_COLUMN: &str = "test_length";
pub const LOOKAHEAD_COLUMN: &str = "lookahead";

/// Results of a hyperparameter search: one row per evaluated configuration
/// with its window lengths, model parameters and IC metrics.
#[derive(Debug, Clone)]
pub struct HyperparameterTable {
    frame: DataFrame,
    param_columns: Vec<String>,
}

impl HyperparameterTable {
    pub fn new(frame: DataFrame, param_columns: Vec<String>) -> Result<Self> {
        let required = [TRAIN_LENGTH_COLUMN, TEST_LENGTH_COLUMN, LOOKAHEAD_COLUMN];
        for name in required.iter().copied().chain(param_columns.iter().map(|c| c.as_str())) {
            let column = frame.column(name).map_err(|_| {
                FactorcvError::Selection(format!("Metrics table is missing column '{}'", name))
            })?;
            if !is_numeric(column.dtype()) {
                return Err(FactorcvError::Selection(format!(
                    "Metrics column '{}' must be numeric, found {:?}",
                    name,
                    column.dtype()
                )));
            }
        }

        Ok(Self {
            frame,
            param_columns,
        })
    }

    pub fn from_csv<P: AsRef<Path>>(path: P, param_columns: Vec<String>) -> Result<Self> {
        Self::new(CsvConnector::load(path)?, param_columns)
    }

    pub fn from_config(config: &SelectionConfig) -> Result<Self> {
        let path = config.metrics_path.as_deref().ok_or_else(|| {
            FactorcvError::Configuration("No metrics table path configured".to_string())
        })?;
        Self::from_csv(path, config.param_columns.clone())
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Best `n` configurations by `metric` (descending, nulls last), limited
    /// to one lookahead when given
    pub fn top_n(
        &self,
        metric: &str,
        n: usize,
        lookahead: Option<usize>,
    ) -> Result<Vec<CandidateParams>> {
        let metric_column = self.frame.column(metric).map_err(|_| {
            FactorcvError::Selection(format!("Unknown ranking metric '{}'", metric))
        })?;
        if !is_numeric(metric_column.dtype()) {
            return Err(FactorcvError::Selection(format!(
                "Ranking metric '{}' must be numeric",
                metric
            )));
        }

        let mut lf = self.frame.clone().lazy();
        if let Some(lookahead) = lookahead {
            lf = lf.filter(col(LOOKAHEAD_COLUMN).eq(lit(lookahead as i64)));
        }
        let top = lf
            .sort(
                [metric],
                SortMultipleOptions::default()
                    .with_order_descending(true)
                    .with_nulls_last(true),
            )
            .limit(n as IdxSize)
            .collect()?;

        let train = lengths(&top, TRAIN_LENGTH_COLUMN)?;
        let test = lengths(&top, TEST_LENGTH_COLUMN)?;
        let lookaheads = lengths(&top, LOOKAHEAD_COLUMN)?;
        let metric_values = floats(&top, metric)?;
        let params = self
            .param_columns
            .iter()
            .map(|name| Ok((name.clone(), floats(&top, name)?)))
            .collect::<Result<Vec<_>>>()?;

        let candidates: Vec<CandidateParams> = (0..top.height())
            .map(|row| CandidateParams {
                position: row,
                train_period_length: train[row],
                test_period_length: test[row],
                lookahead: lookaheads[row],
                metric: metric.to_string(),
                metric_value: metric_values[row].unwrap_or(f64::NAN),
                model_params: params
                    .iter()
                    .filter_map(|(name, values)| values[row].map(|v| (name.clone(), v)))
                    .collect::<BTreeMap<_, _>>(),
            })
            .collect();

        log::info!(
            "Selected {} of {} configurations by '{}'",
            candidates.len(),
            self.frame.height(),
            metric
        );
        Ok(candidates)
    }
}

fn floats(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let values = df.column(name)?.cast(&DataType::Float64)?;
    Ok(values.f64()?.into_iter().collect())
}

fn lengths(df: &DataFrame, name: &str) -> Result<Vec<usize>> {
    floats(df, name)?
        .into_iter()
        .enumerate()
        .map(|(row, value)| match value {
            Some(v) if v >= 0.0 && v.fract() == 0.0 => Ok(v as usize),
            other => Err(FactorcvError::Selection(format!(
                "Invalid '{}' value {:?} in row {}",
                name, other, row
            ))),
        })
        .collect()
}
