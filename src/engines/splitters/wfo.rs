use super::base::{DataSplitter, SplitIter};
use super::types::{DataSplit, SplitDirection, SplitWindow, WindowType};
use crate::config::{ConfigSection, SplitterConfig};
use crate::data::{PanelDataset, TimeIndex};
use crate::error::Result;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub const DEFAULT_TIME_COLUMN: &str = "date";

/// Walk-forward splitter over the shared time axis of a panel. Test windows
/// tile backward from the latest period; each train window ends `lookahead`
/// periods before its test window starts.
#[derive(Debug, Clone)]
pub struct WalkForwardSplitter {
    config: SplitterConfig,
    time_column: String,
}

impl WalkForwardSplitter {
    pub fn new(config: SplitterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            time_column: DEFAULT_TIME_COLUMN.to_string(),
        })
    }

    pub fn with_time_column(mut self, time_column: &str) -> Self {
        self.time_column = time_column.to_string();
        self
    }

    pub fn time_column(&self) -> &str {
        &self.time_column
    }

    /// Number of folds that fit into `num_periods` unique periods
    pub fn feasible_splits(&self, num_periods: usize) -> usize {
        let c = &self.config;
        let Some(required) = c.lookahead.checked_add(c.train_period_length) else {
            return 0;
        };
        match required.checked_add(c.test_period_length) {
            Some(minimum) if num_periods >= minimum => {
                ((num_periods - required) / c.test_period_length).min(c.n_splits)
            }
            _ => 0,
        }
    }

    /// Window boundaries for every feasible fold, most recent first
    pub fn plan(&self, num_periods: usize) -> Vec<SplitWindow> {
        let c = &self.config;
        let feasible = self.feasible_splits(num_periods);
        let mut windows = Vec::with_capacity(feasible);

        for fold in 0..feasible {
            let test_start = num_periods - (fold + 1) * c.test_period_length;
            let train_start = test_start - c.lookahead - c.train_period_length;
            let test_end = test_start + c.test_period_length - 1;
            let train_end = test_start - c.lookahead - 1;
            let train_start = match c.window_type {
                WindowType::Rolling => train_start,
                WindowType::Anchored => 0,
            };

            windows.push(SplitWindow {
                fold_num: fold,
                train_start,
                train_end,
                test_start,
                test_end,
            });
        }

        windows
    }

    /// Split an already-built time index
    pub fn split_index(&self, index: TimeIndex) -> WalkForwardSplits {
        let mut windows = self.plan(index.len());

        if windows.is_empty() {
            log::warn!(
                "No walk-forward split fits into {} periods (train {}, lookahead {}, test {})",
                index.len(),
                self.config.train_period_length,
                self.config.lookahead,
                self.config.test_period_length
            );
        } else if windows.len() < self.config.n_splits {
            log::info!(
                "History supports {} of {} requested splits",
                windows.len(),
                self.config.n_splits
            );
        }

        if self.config.direction == SplitDirection::Forward {
            windows.reverse();
        }
        if self.config.shuffle {
            let mut rng = match self.config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            windows.shuffle(&mut rng);
        }

        for window in &windows {
            log::debug!(
                "Fold {}: train {}..={} test {}..={}",
                window.fold_num,
                index.format_period(index.periods()[window.train_start]),
                index.format_period(index.periods()[window.train_end]),
                index.format_period(index.periods()[window.test_start]),
                index.format_period(index.periods()[window.test_end]),
            );
        }

        WalkForwardSplits {
            index,
            windows,
            cursor: 0,
        }
    }

    pub fn split_panel(&self, panel: &PanelDataset) -> Result<WalkForwardSplits> {
        Ok(self.split_index(panel.time_index()?))
    }
}

impl DataSplitter for WalkForwardSplitter {
    fn split(&self, data: &DataFrame) -> Result<SplitIter> {
        let index = TimeIndex::from_frame(data, &self.time_column)?;
        Ok(Box::new(self.split_index(index)))
    }

    fn get_n_splits(&self) -> usize {
        self.config.n_splits
    }

    fn config(&self) -> &SplitterConfig {
        &self.config
    }
}

/// Lazy fold sequence; row positions are gathered as each fold is yielded
#[derive(Debug)]
pub struct WalkForwardSplits {
    index: TimeIndex,
    windows: Vec<SplitWindow>,
    cursor: usize,
}

impl WalkForwardSplits {
    pub fn windows(&self) -> &[SplitWindow] {
        &self.windows
    }

    pub fn time_index(&self) -> &TimeIndex {
        &self.index
    }
}

impl Iterator for WalkForwardSplits {
    type Item = DataSplit;

    fn next(&mut self) -> Option<DataSplit> {
        let window = *self.windows.get(self.cursor)?;
        self.cursor += 1;

        let periods = self.index.periods();
        Some(DataSplit {
            fold_num: window.fold_num,
            train: self.index.rows_between(window.train_start, window.train_end),
            test: self.index.rows_between(window.test_start, window.test_end),
            train_start: periods[window.train_start],
            train_end: periods[window.train_end],
            test_start: periods[window.test_start],
            test_end: periods[window.test_end],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.windows.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WalkForwardSplits {}
