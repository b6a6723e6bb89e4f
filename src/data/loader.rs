//! Load the population CSV into a Dataset.
//! A failed load is logged and replaced with an empty Dataset; it never stops the dashboard.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info, warn};

use crate::data::dataset::Dataset;
use crate::data::record::{RawRow, Record, RowRejection, REQUIRED_COLUMNS};

pub const DEFAULT_DATA_PATH: &str = "assets/data/population.csv";

/// The data source as a whole could not be read.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("header is missing column {0}")]
    MissingColumn(&'static str),
    #[error("load task failed: {0}")]
    Task(String),
}

/// A row that was skipped during loading, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    pub line: u64,
    pub reason: RowRejection,
}

/// Records kept plus the rows that failed validation.
#[derive(Debug, Clone, Default)]
pub struct ParsedRows {
    pub records: Vec<Record>,
    pub dropped: Vec<DroppedRow>,
}

/// Parse CSV text from any reader. Header names are matched after trimming.
pub fn parse_rows<R: Read>(source: R) -> Result<ParsedRows, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(source);

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !header.iter().any(|h| h == *column))
    {
        return Err(LoadError::MissingColumn(missing));
    }

    let mut parsed = ParsedRows::default();
    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let raw: RawRow = header
            .iter()
            .zip(row.iter())
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect();
        match Record::from_row(&raw) {
            Ok(record) => parsed.records.push(record),
            Err(reason) => parsed.dropped.push(DroppedRow { line, reason }),
        }
    }
    Ok(parsed)
}

/// Parse a dataset from a reader, logging any dropped rows.
pub fn load_from_reader<R: Read>(source: R) -> Result<Dataset, LoadError> {
    let parsed = parse_rows(source)?;
    if let Some(first) = parsed.dropped.first() {
        warn!(
            dropped = parsed.dropped.len(),
            first_line = first.line,
            reason = %first.reason,
            "dropped rows with invalid required fields"
        );
    }
    Ok(Dataset::new(parsed.records))
}

pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(file)
}

/// Load, or log the failure and fall back to an empty Dataset.
pub fn load_or_empty(path: impl AsRef<Path>) -> Dataset {
    let path = path.as_ref();
    settle(path, load_dataset(path))
}

/// Async variant for the server: the read and parse run off the async workers,
/// the caller awaits until the load settles either way.
pub async fn load_dataset_async(path: PathBuf) -> Dataset {
    let task_path = path.clone();
    let result = tokio::task::spawn_blocking(move || load_dataset(&task_path))
        .await
        .unwrap_or_else(|err| Err(LoadError::Task(err.to_string())));
    settle(&path, result)
}

fn settle(path: &Path, result: Result<Dataset, LoadError>) -> Dataset {
    match result {
        Ok(dataset) => {
            info!(
                path = %path.display(),
                records = dataset.len(),
                years = dataset.years().len(),
                "dataset loaded"
            );
            dataset
        }
        Err(err) => {
            error!(
                path = %path.display(),
                error = %err,
                "dataset load failed, continuing with empty dataset"
            );
            Dataset::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Country,Year,Population_000s,Population_Density,Population_Growth_Rate,Region
A,2000,1000,50,1.5,X
B,2000,2000,150,2.5,Y
C,abc,10,10,0.1,Y
D,2005,300,12,,X
";

    #[test]
    fn parses_rows_and_drops_bad_required_fields() {
        let parsed = parse_rows(SAMPLE.as_bytes()).expect("parse");
        assert_eq!(parsed.records.len(), 3);
        assert_eq!(parsed.dropped.len(), 1);
        assert_eq!(parsed.dropped[0].line, 4);
        assert_eq!(parsed.records[2].country, "D");
        assert_eq!(parsed.records[2].population_growth_rate, None);
    }

    #[test]
    fn header_whitespace_is_ignored() {
        let csv = "Country , Year,Population_000s,Population_Density,Population_Growth_Rate,Region\nA,2000,1,2,3,X\n";
        let dataset = load_from_reader(csv.as_bytes()).expect("load");
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].country, "A");
    }

    #[test]
    fn missing_column_is_a_load_failure() {
        let csv = "Country,Year,Population_000s,Region\nA,2000,1,X\n";
        let err = load_from_reader(csv.as_bytes()).expect_err("should fail");
        assert!(matches!(err, LoadError::MissingColumn("Population_Density")));
    }

    #[test]
    fn short_rows_do_not_abort_the_load() {
        let csv = "Country,Year,Population_000s,Population_Density,Population_Growth_Rate,Region\nA,2000\nB,2001,5,6,0.5,Y\n";
        let parsed = parse_rows(csv.as_bytes()).expect("parse");
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.dropped.len(), 1);
    }

    #[test]
    fn unreadable_source_falls_back_to_empty() {
        let dataset = load_or_empty("/definitely/not/here/population.csv");
        assert!(dataset.is_empty());
    }

    #[tokio::test]
    async fn async_load_settles_to_empty_on_failure() {
        let dataset = load_dataset_async(PathBuf::from("/definitely/not/here.csv")).await;
        assert!(dataset.is_empty());
    }
}
