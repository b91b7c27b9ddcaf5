use crate::error::{FactorcvError, Result};
use polars::prelude::*;
use super::types::PanelSchema;

pub struct PanelValidator;

impl PanelValidator {
    /// Validate that the DataFrame carries a usable panel layout
    pub fn validate_panel(df: &DataFrame, schema: &PanelSchema) -> Result<()> {
        for required in schema.required_columns() {
            if df.get_column_index(required).is_none() {
                return Err(FactorcvError::Data(format!(
                    "Missing required column: {}",
                    required
                )));
            }
        }

        let time = df.column(&schema.time_column)?;
        Self::validate_time_dtype(&schema.time_column, time.dtype())?;
        if time.null_count() > 0 {
            return Err(FactorcvError::Data(format!(
                "Time column '{}' contains {} null values",
                schema.time_column,
                time.null_count()
            )));
        }

        let entity = df.column(&schema.entity_column)?;
        if entity.null_count() > 0 {
            return Err(FactorcvError::Data(format!(
                "Entity column '{}' contains {} null values",
                schema.entity_column,
                entity.null_count()
            )));
        }

        let numeric = std::iter::once(&schema.label_column).chain(schema.feature_columns.iter());
        for name in numeric {
            let series = df.column(name)?;
            if !is_numeric(series.dtype()) {
                return Err(FactorcvError::Data(format!(
                    "Column '{}' must be numeric, found {:?}",
                    name,
                    series.dtype()
                )));
            }
        }

        Ok(())
    }

    /// The time axis must have a total order: dates, datetimes or integers
    pub fn validate_time_dtype(name: &str, dtype: &DataType) -> Result<()> {
        let orderable = matches!(dtype, DataType::Date | DataType::Datetime(_, _))
            || is_integer(dtype);

        if !orderable {
            return Err(FactorcvError::Data(format!(
                "Time column '{}' is not orderable: found {:?}, expected a date, datetime or integer",
                name, dtype
            )));
        }
        Ok(())
    }

    /// Check for null values in every column
    pub fn check_nulls(df: &DataFrame) -> Result<Vec<(String, usize)>> {
        let mut null_report = Vec::new();

        for col_name in df.get_column_names() {
            let series = df.column(col_name)?;
            let null_count = series.null_count();
            if null_count > 0 {
                null_report.push((col_name.to_string(), null_count));
            }
        }

        Ok(null_report)
    }
}

pub(crate) fn is_integer(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

pub(crate) fn is_numeric(dtype: &DataType) -> bool {
    is_integer(dtype) || matches!(dtype, DataType::Float32 | DataType::Float64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn schema() -> PanelSchema {
        PanelSchema::new("ticker", "date", "target", &["momentum"])
    }

    #[test]
    fn test_validate_good_panel() {
        let df = df! {
            "ticker" => &["AAA", "BBB", "AAA", "BBB"],
            "date" => &[1i64, 1, 2, 2],
            "momentum" => &[0.1, 0.2, 0.3, 0.4],
            "target" => &[0.01, -0.02, 0.03, 0.0],
        }
        .unwrap();

        assert!(PanelValidator::validate_panel(&df, &schema()).is_ok());
    }

    #[test]
    fn test_validate_missing_column() {
        let df = df! {
            "ticker" => &["AAA", "BBB"],
            "date" => &[1i64, 1],
            // Missing 'momentum'
            "target" => &[0.01, -0.02],
        }
        .unwrap();

        let result = PanelValidator::validate_panel(&df, &schema());
        assert!(matches!(result, Err(FactorcvError::Data(_))));
    }

    #[test]
    fn test_validate_float_time_axis() {
        let df = df! {
            "ticker" => &["AAA", "BBB"],
            "date" => &[1.0, 1.5],
            "momentum" => &[0.1, 0.2],
            "target" => &[0.01, -0.02],
        }
        .unwrap();

        assert!(PanelValidator::validate_panel(&df, &schema()).is_err());
    }

    #[test]
    fn test_validate_string_feature() {
        let df = df! {
            "ticker" => &["AAA", "BBB"],
            "date" => &[1i64, 1],
            "momentum" => &["high", "low"],
            "target" => &[0.01, -0.02],
        }
        .unwrap();

        assert!(PanelValidator::validate_panel(&df, &schema()).is_err());
    }

    #[test]
    fn test_check_nulls() {
        let df = df! {
            "date" => &[Some(1i64), None, Some(3)],
            "target" => &[Some(0.1), Some(0.2), None],
        }
        .unwrap();

        let report = PanelValidator::check_nulls(&df).unwrap();
        assert_eq!(report.len(), 2);
    }
}
