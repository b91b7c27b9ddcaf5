pub mod metrics;
pub mod prediction;
pub mod selection;
pub mod splitters;
