use crate::config::DataConfig;
use crate::data::panel::{factorize, PanelDataset};
use crate::error::{FactorcvError, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

pub struct CsvConnector;

impl CsvConnector {
    /// Load CSV file into DataFrame, parsing date-like columns
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .map_parse_options(|options| options.with_try_parse_dates(true))
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| FactorcvError::Data(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Load, factorize and validate a panel described by `config`
    pub fn load_panel(config: &DataConfig) -> Result<PanelDataset> {
        let path = config.path.as_deref().ok_or_else(|| {
            FactorcvError::Configuration("No data path configured".to_string())
        })?;

        let df = Self::load(path)?;
        log::info!("Loaded {} rows x {} columns from {}", df.height(), df.width(), path);

        let df = factorize(&df, &config.categorical_columns)?;
        PanelDataset::new(df, config.schema())
    }

    pub fn write<P: AsRef<Path>>(path: P, df: &mut DataFrame) -> Result<()> {
        let mut file = File::create(path.as_ref())?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .map_err(|e| FactorcvError::Data(format!("Failed to write CSV: {}", e)))?;
        Ok(())
    }
}
