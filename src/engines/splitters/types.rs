use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowType {
    #[default]
    Rolling,  // Each fold trains on exactly `train_period_length` periods
    Anchored, // Train window starts at the first period and grows
}

/// Order in which folds are yielded. The set of windows is the same.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitDirection {
    #[default]
    Backward, // Most recent test window first
    Forward,  // Oldest test window first
}

/// Inclusive boundaries of one fold on the unique-period axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitWindow {
    pub fold_num: usize,
    pub train_start: usize,
    pub train_end: usize,
    pub test_start: usize,
    pub test_end: usize,
}

impl SplitWindow {
    pub fn train_periods(&self) -> usize {
        self.train_end - self.train_start + 1
    }

    pub fn test_periods(&self) -> usize {
        self.test_end - self.test_start + 1
    }

    /// Unique periods skipped between train end and test start
    pub fn gap(&self) -> usize {
        self.test_start - self.train_end - 1
    }
}

/// Single walk-forward fold: row positions into the split dataset plus the
/// period values bounding each side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSplit {
    pub fold_num: usize,
    pub train: Vec<usize>,
    pub test: Vec<usize>,
    pub train_start: i64,
    pub train_end: i64,
    pub test_start: i64,
    pub test_end: i64,
}

impl DataSplit {
    /// Materialise the (train, test) frames of `data`
    pub fn take(&self, data: &DataFrame) -> Result<(DataFrame, DataFrame)> {
        let train = data.take(&to_idx("train", &self.train))?;
        let test = data.take(&to_idx("test", &self.test))?;
        Ok((train, test))
    }
}

fn to_idx(name: &str, positions: &[usize]) -> IdxCa {
    let idx: Vec<IdxSize> = positions.iter().map(|&p| p as IdxSize).collect();
    IdxCa::from_vec(name.into(), idx)
}
