use super::report::PredictionReport;
use crate::data::CsvConnector;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Destination for out-of-sample predictions
pub trait ResultsSink {
    fn write(&self, report: &PredictionReport) -> Result<()>;
}

pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ResultsSink for CsvSink {
    fn write(&self, report: &PredictionReport) -> Result<()> {
        let mut frame = report.to_frame()?;
        CsvConnector::write(&self.path, &mut frame)?;
        log::info!("Wrote {} prediction rows to {}", frame.height(), self.path.display());
        Ok(())
    }
}
