//! Typed population record and raw-row parsing.
//! Parsing is the validation boundary: required numeric fields are checked here, not by consumers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const COL_COUNTRY: &str = "Country";
pub const COL_YEAR: &str = "Year";
pub const COL_POPULATION: &str = "Population_000s";
pub const COL_DENSITY: &str = "Population_Density";
pub const COL_GROWTH_RATE: &str = "Population_Growth_Rate";
pub const COL_REGION: &str = "Region";

/// Columns the loader expects in the header row.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_COUNTRY,
    COL_YEAR,
    COL_POPULATION,
    COL_DENSITY,
    COL_GROWTH_RATE,
    COL_REGION,
];

/// One row of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub country: String,
    pub year: i32,
    pub population_thousands: i64,
    pub population_density: i64,
    /// `None` when the source cell was not a finite number.
    pub population_growth_rate: Option<f64>,
    pub region: String,
}

/// Why a raw row was not turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejection {
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("{column} is not numeric: {value:?}")]
    NotNumeric { column: &'static str, value: String },
}

/// A string-keyed row, as a CSV reader yields it.
pub type RawRow = HashMap<String, String>;

impl Record {
    /// Build a record from a string-keyed row. Country and Region are copied unchanged;
    /// a missing or non-numeric Year, Population_000s or Population_Density rejects the row.
    pub fn from_row(row: &RawRow) -> Result<Self, RowRejection> {
        let text = |column: &'static str| row.get(column).map(String::as_str);

        Ok(Record {
            country: text(COL_COUNTRY).unwrap_or_default().to_string(),
            year: required_int(text(COL_YEAR), COL_YEAR).and_then(|v| {
                i32::try_from(v).map_err(|_| RowRejection::NotNumeric {
                    column: COL_YEAR,
                    value: v.to_string(),
                })
            })?,
            population_thousands: required_int(text(COL_POPULATION), COL_POPULATION)?,
            population_density: required_int(text(COL_DENSITY), COL_DENSITY)?,
            population_growth_rate: text(COL_GROWTH_RATE).and_then(parse_float),
            region: text(COL_REGION).unwrap_or_default().to_string(),
        })
    }
}

fn required_int(value: Option<&str>, column: &'static str) -> Result<i64, RowRejection> {
    let value = value.ok_or(RowRejection::Missing(column))?;
    parse_int(value).ok_or_else(|| RowRejection::NotNumeric {
        column,
        value: value.to_string(),
    })
}

/// Lenient integer parse: plain integers, or finite decimals truncated toward zero.
///
/// The whole cell must be a number. This is not a prefix parse: `"12abc"` is rejected
/// rather than read as 12, and exponent notation such as `"4e3"` reads as 4000 rather
/// than 4.
pub fn parse_int(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Some(parsed);
    }
    let parsed = trimmed.parse::<f64>().ok().filter(|v| v.is_finite())?;
    let truncated = parsed.trunc();
    if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return None;
    }
    Some(truncated as i64)
}

/// Finite float or nothing; "NaN", "inf" and blanks all count as absent.
pub fn parse_float(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
