use super::types::DataSplit;
use crate::config::SplitterConfig;
use crate::error::FactorcvError;
use polars::prelude::*;

pub type SplitIter = Box<dyn Iterator<Item = DataSplit> + Send>;

pub trait DataSplitter: Send + Sync {
    /// Lazily produce the folds of `data`. Errors here are data errors on the
    /// time axis; running out of history only shortens the sequence.
    fn split(&self, data: &DataFrame) -> Result<SplitIter, FactorcvError>;

    /// Upper bound on the number of folds
    fn get_n_splits(&self) -> usize;

    fn config(&self) -> &SplitterConfig;
}
