use crate::data::connectors::PanelValidator;
use crate::error::{FactorcvError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use polars::prelude::*;

/// Days between 0001-01-01 and 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// The shared time axis of a panel: sorted unique periods plus the row
/// positions that carry each period.
#[derive(Debug, Clone)]
pub struct TimeIndex {
    periods: Vec<i64>,
    rows: Vec<Vec<usize>>,
    dtype: DataType,
    num_rows: usize,
}

impl TimeIndex {
    pub fn from_frame(df: &DataFrame, time_column: &str) -> Result<Self> {
        let column = df.column(time_column).map_err(|_| {
            FactorcvError::Data(format!("Missing time column '{}'", time_column))
        })?;
        let raw = physical_times(column, time_column)?;

        let mut periods = raw.clone();
        periods.sort_unstable();
        periods.dedup();

        let mut rows = vec![Vec::new(); periods.len()];
        for (row, value) in raw.iter().enumerate() {
            if let Ok(idx) = periods.binary_search(value) {
                rows[idx].push(row);
            }
        }

        Ok(Self {
            periods,
            rows,
            dtype: column.dtype().clone(),
            num_rows: raw.len(),
        })
    }

    /// Number of unique periods
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn periods(&self) -> &[i64] {
        &self.periods
    }

    pub fn period(&self, idx: usize) -> Option<i64> {
        self.periods.get(idx).copied()
    }

    /// Row positions of every period in `start..=end`, ascending
    pub fn rows_between(&self, start: usize, end: usize) -> Vec<usize> {
        if start > end || end >= self.periods.len() {
            return Vec::new();
        }
        let mut positions: Vec<usize> = self.rows[start..=end]
            .iter()
            .flatten()
            .copied()
            .collect();
        positions.sort_unstable();
        positions
    }

    /// Render a physical period value using the column's logical type
    pub fn format_period(&self, value: i64) -> String {
        let rendered = match &self.dtype {
            DataType::Date => i32::try_from(value + UNIX_EPOCH_DAYS_FROM_CE)
                .ok()
                .and_then(NaiveDate::from_num_days_from_ce_opt)
                .map(|d| d.format("%Y-%m-%d").to_string()),
            DataType::Datetime(unit, _) => {
                let datetime: Option<DateTime<Utc>> = match unit {
                    TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
                    TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
                    TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
                };
                datetime.map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            }
            _ => None,
        };
        rendered.unwrap_or_else(|| value.to_string())
    }
}

/// Physical i64 representation of an orderable, null-free time column
pub fn physical_times(column: &Column, name: &str) -> Result<Vec<i64>> {
    PanelValidator::validate_time_dtype(name, column.dtype())?;
    if column.null_count() > 0 {
        return Err(FactorcvError::Data(format!(
            "Time column '{}' contains {} null values",
            name,
            column.null_count()
        )));
    }

    let physical = column.to_physical_repr().cast(&DataType::Int64)?;
    if physical.null_count() > 0 {
        return Err(FactorcvError::Data(format!(
            "Time column '{}' has values outside the i64 range",
            name
        )));
    }

    Ok(physical.i64()?.into_iter().flatten().collect())
}
