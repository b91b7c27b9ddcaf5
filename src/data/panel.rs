use crate::data::connectors::{DatasetMetadata, PanelSchema, PanelValidator};
use crate::data::time_index::{physical_times, TimeIndex};
use crate::error::{FactorcvError, Result};
use polars::prelude::*;
use std::collections::HashMap;

/// Panel of observations keyed by (entity, timestamp), sorted by time then
/// entity. Rows with a null label are dropped on construction.
#[derive(Debug, Clone)]
pub struct PanelDataset {
    frame: DataFrame,
    schema: PanelSchema,
}

impl PanelDataset {
    pub fn new(frame: DataFrame, schema: PanelSchema) -> Result<Self> {
        PanelValidator::validate_panel(&frame, &schema)?;

        let before = frame.height();
        let frame = frame
            .lazy()
            .filter(col(schema.label_column.as_str()).is_not_null())
            .sort(
                [schema.time_column.as_str(), schema.entity_column.as_str()],
                SortMultipleOptions::default().with_maintain_order(true),
            )
            .collect()?;

        let dropped = before - frame.height();
        if dropped > 0 {
            log::warn!(
                "Dropped {} rows with null '{}' labels",
                dropped,
                schema.label_column
            );
        }

        let null_report = PanelValidator::check_nulls(&frame)?;
        if !null_report.is_empty() {
            log::warn!("Null values detected: {:?}", null_report);
        }

        Ok(Self { frame, schema })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn schema(&self) -> &PanelSchema {
        &self.schema
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn time_index(&self) -> Result<TimeIndex> {
        TimeIndex::from_frame(&self.frame, &self.schema.time_column)
    }

    /// Feature matrix of `frame` in schema order
    pub fn features_of(&self, frame: &DataFrame) -> Result<DataFrame> {
        Ok(frame.select(self.schema.feature_columns.iter().map(|c| c.as_str()))?)
    }

    pub fn labels_of(&self, frame: &DataFrame) -> Result<Vec<f64>> {
        let labels = frame
            .column(&self.schema.label_column)?
            .cast(&DataType::Float64)?;
        let labels = labels.f64()?;

        labels
            .into_iter()
            .enumerate()
            .map(|(row, value)| {
                value.ok_or_else(|| {
                    FactorcvError::Data(format!(
                        "Null label '{}' at row {}",
                        self.schema.label_column, row
                    ))
                })
            })
            .collect()
    }

    pub fn entities_of(&self, frame: &DataFrame) -> Result<Vec<String>> {
        let entities = frame
            .column(&self.schema.entity_column)?
            .cast(&DataType::String)?;
        let entities = entities.str()?;

        Ok(entities
            .into_iter()
            .map(|value| value.unwrap_or_default().to_string())
            .collect())
    }

    pub fn timestamps_of(&self, frame: &DataFrame) -> Result<Vec<i64>> {
        let column = frame.column(&self.schema.time_column)?;
        physical_times(column, &self.schema.time_column)
    }

    pub fn metadata(&self) -> Result<DatasetMetadata> {
        let index = self.time_index()?;
        let num_entities = self.frame.column(&self.schema.entity_column)?.n_unique()?;

        Ok(DatasetMetadata {
            num_rows: self.frame.height(),
            num_entities,
            num_periods: index.len(),
            first_period: index.periods().first().map(|&p| index.format_period(p)),
            last_period: index.periods().last().map(|&p| index.format_period(p)),
            feature_columns: self.schema.feature_columns.clone(),
        })
    }
}

/// Replace categorical columns with integer codes assigned in order of first
/// appearance. Nulls stay null.
pub fn factorize(frame: &DataFrame, columns: &[String]) -> Result<DataFrame> {
    let mut out = frame.clone();

    for name in columns {
        let values = frame
            .column(name)
            .map_err(|_| FactorcvError::Data(format!("Cannot factorize missing column '{}'", name)))?
            .cast(&DataType::String)?;
        let values = values.str()?;

        let mut codes: HashMap<&str, u32> = HashMap::new();
        let encoded: Vec<Option<u32>> = values
            .into_iter()
            .map(|value| {
                value.map(|v| {
                    let next = codes.len() as u32;
                    *codes.entry(v).or_insert(next)
                })
            })
            .collect();

        log::debug!("Factorized '{}' into {} codes", name, codes.len());
        out.with_column(Series::new(name.as_str().into(), encoded))?;
    }

    Ok(out)
}
