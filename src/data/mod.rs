pub mod connectors;
pub mod panel;
pub mod time_index;

pub use connectors::{CsvConnector, DatasetMetadata, PanelSchema, PanelValidator};
pub use panel::{factorize, PanelDataset};
pub use time_index::TimeIndex;
