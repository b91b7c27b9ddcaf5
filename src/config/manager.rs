use super::{
    data::DataConfig,
    prediction::PredictionConfig,
    selection::SelectionConfig,
    splitter::SplitterConfig,
    traits::ConfigSection,
};
use crate::error::FactorcvError;
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_PREFIX: &str = "FACTORCV";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    pub data: DataConfig,
    pub splitter: SplitterConfig,
    pub selection: SelectionConfig,
    pub prediction: PredictionConfig,
}

impl ResearchConfig {
    pub fn validate(&self) -> Result<(), FactorcvError> {
        self.data.validate()?;
        self.splitter.validate()?;
        self.selection.validate()?;
        self.prediction.validate()?;
        Ok(())
    }
}

/// Loads and saves `ResearchConfig` files. Loaded configurations are
/// validated before they are handed out and never mutated afterwards.
pub struct ConfigManager;

impl ConfigManager {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ResearchConfig, FactorcvError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| FactorcvError::Configuration(format!("Failed to read config: {}", e)))?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<ResearchConfig, FactorcvError> {
        let config: ResearchConfig = toml::from_str(contents)
            .map_err(|e| FactorcvError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file and apply `FACTORCV_<SECTION>__<KEY>` environment
    /// overrides on top of it.
    pub fn load_layered<P: AsRef<Path>>(path: P) -> Result<ResearchConfig, FactorcvError> {
        let config: ResearchConfig = Config::builder()
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        log::debug!("Loaded layered configuration from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(
        config: &ResearchConfig,
        path: P,
    ) -> Result<(), FactorcvError> {
        let toml_str = toml::to_string_pretty(config)
            .map_err(|e| FactorcvError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| FactorcvError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }
}
