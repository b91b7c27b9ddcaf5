pub mod traits;
pub mod data;
pub mod splitter;
pub mod selection;
pub mod prediction;
pub mod manager;

pub use manager::{ConfigManager, ResearchConfig};
pub use data::DataConfig;
pub use splitter::SplitterConfig;
pub use prediction::PredictionConfig;
pub use selection::SelectionConfig;
pub use traits::ConfigSection;
