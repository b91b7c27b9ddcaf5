// src/engines/metrics/ic.rs
use crate::types::{DailyIc, PredictionRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary statistics of an IC time series
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IcSummary {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub ir: f64,       // mean / std
    pub hit_rate: f64, // share of positive days
    pub t_stat: f64,
    pub count: usize,
}

pub struct InformationCoefficient;

impl InformationCoefficient {
    /// Pearson correlation; None for fewer than two points or zero variance
    pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
        if x.len() != y.len() || x.len() < 2 {
            return None;
        }

        let n = x.len() as f64;
        let mean_x = x.iter().sum::<f64>() / n;
        let mean_y = y.iter().sum::<f64>() / n;

        let mut cov = 0.0;
        let mut var_x = 0.0;
        let mut var_y = 0.0;
        for (xi, yi) in x.iter().zip(y) {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            cov += dx * dy;
            var_x += dx * dx;
            var_y += dy * dy;
        }

        if var_x == 0.0 || var_y == 0.0 {
            return None;
        }

        Some(cov / (var_x.sqrt() * var_y.sqrt()))
    }

    /// Spearman rank correlation (Pearson over average ranks)
    pub fn spearman(x: &[f64], y: &[f64]) -> Option<f64> {
        if x.len() != y.len() || x.len() < 2 {
            return None;
        }
        Self::pearson(&Self::rank(x), &Self::rank(y))
    }

    /// 1-based ranks, ties share their average rank
    pub fn rank(values: &[f64]) -> Vec<f64> {
        let n = values.len();
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

        let mut ranks = vec![0.0; n];
        let mut i = 0;
        while i < n {
            let mut j = i + 1;
            while j < n && values[order[j]] == values[order[i]] {
                j += 1;
            }

            let avg_rank = (i + j + 1) as f64 / 2.0;
            for &idx in &order[i..j] {
                ranks[idx] = avg_rank;
            }
            i = j;
        }

        ranks
    }

    /// Spearman IC of predicted vs. actual for every timestamp. Days with
    /// fewer than two observations or no cross-sectional variance are skipped.
    pub fn daily(records: &[PredictionRecord]) -> Vec<DailyIc> {
        let mut by_day: BTreeMap<i64, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
        for record in records {
            let (predicted, actual) = by_day.entry(record.timestamp).or_default();
            predicted.push(record.predicted);
            actual.push(record.actual);
        }

        let total_days = by_day.len();
        let series: Vec<DailyIc> = by_day
            .into_iter()
            .filter_map(|(timestamp, (predicted, actual))| {
                Self::spearman(&predicted, &actual).map(|ic| DailyIc {
                    timestamp,
                    ic,
                    observations: predicted.len(),
                })
            })
            .collect();

        if series.len() < total_days {
            log::debug!(
                "Skipped {} of {} days without a usable cross-section",
                total_days - series.len(),
                total_days
            );
        }
        if total_days > 0 && series.is_empty() {
            log::warn!("No day had a usable cross-section for IC");
        }

        series
    }

    /// Spearman IC over all records pooled together
    pub fn pooled(records: &[PredictionRecord]) -> Option<f64> {
        let predicted: Vec<f64> = records.iter().map(|r| r.predicted).collect();
        let actual: Vec<f64> = records.iter().map(|r| r.actual).collect();
        Self::spearman(&predicted, &actual)
    }

    pub fn summarize(series: &[f64]) -> IcSummary {
        if series.is_empty() {
            return IcSummary::default();
        }

        let n = series.len() as f64;
        let mean = series.iter().sum::<f64>() / n;
        let std = if series.len() > 1 {
            (series.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        } else {
            0.0
        };

        let mut sorted = series.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        let (ir, t_stat) = if std > 0.0 {
            (mean / std, mean / (std / n.sqrt()))
        } else {
            (0.0, 0.0)
        };

        IcSummary {
            mean,
            median,
            std,
            ir,
            hit_rate: series.iter().filter(|&&x| x > 0.0).count() as f64 / n,
            t_stat,
            count: series.len(),
        }
    }
}
