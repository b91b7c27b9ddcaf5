pub mod base;
pub mod types;
pub mod wfo;

pub use base::{DataSplitter, SplitIter};
pub use types::{DataSplit, SplitDirection, SplitWindow, WindowType};
pub use wfo::{WalkForwardSplits, WalkForwardSplitter};
