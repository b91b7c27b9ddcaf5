use super::traits::ConfigSection;
use crate::engines::splitters::types::{SplitDirection, WindowType};
use crate::error::FactorcvError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    pub n_splits: usize,
    pub train_period_length: usize, // unique periods per train window
    pub test_period_length: usize,  // unique periods per test window
    pub lookahead: usize,           // forecast horizon skipped between train and test
    pub shuffle: bool,
    pub seed: Option<u64>,
    pub window_type: WindowType,
    pub direction: SplitDirection,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            n_splits: 3,
            train_period_length: 126,
            test_period_length: 21,
            lookahead: 1,
            shuffle: false,
            seed: None,
            window_type: WindowType::Rolling,
            direction: SplitDirection::Backward,
        }
    }
}

impl SplitterConfig {
    pub fn new(
        n_splits: usize,
        train_period_length: usize,
        test_period_length: usize,
        lookahead: usize,
    ) -> Self {
        Self {
            n_splits,
            train_period_length,
            test_period_length,
            lookahead,
            ..Self::default()
        }
    }

    pub fn with_shuffle(mut self, seed: Option<u64>) -> Self {
        self.shuffle = true;
        self.seed = seed;
        self
    }

    pub fn with_window_type(mut self, window_type: WindowType) -> Self {
        self.window_type = window_type;
        self
    }

    pub fn with_direction(mut self, direction: SplitDirection) -> Self {
        self.direction = direction;
        self
    }
}

impl ConfigSection for SplitterConfig {
    fn section_name() -> &'static str {
        "splitter"
    }

    fn validate(&self) -> Result<(), FactorcvError> {
        if self.n_splits == 0 {
            return Err(FactorcvError::Configuration(
                "n_splits must be positive".to_string(),
            ));
        }
        if self.train_period_length == 0 {
            return Err(FactorcvError::Configuration(
                "train_period_length must be positive".to_string(),
            ));
        }
        if self.test_period_length == 0 {
            return Err(FactorcvError::Configuration(
                "test_period_length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
