pub mod base;
pub mod report;
pub mod sink;
pub mod walk_forward;

pub use base::{CandidateResult, FittedModel, Regressor};
pub use report::{PredictionReport, ENSEMBLE_LABEL};
pub use sink::{CsvSink, ResultsSink};
pub use walk_forward::WalkForwardPredictor;
