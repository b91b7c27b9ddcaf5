mod csv;
mod types;
mod validator;

pub use csv::CsvConnector;
pub use types::{DatasetMetadata, PanelSchema};
pub use validator::PanelValidator;
pub(crate) use validator::is_numeric;
