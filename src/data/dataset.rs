//! The loaded record set and the year index derived from it.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::data::record::Record;

/// Full record set, loaded once and read-only afterwards.
/// A fresh load replaces the whole value; nothing mutates it in place.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    years: YearIndex,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        let years = YearIndex::from_records(&records);
        Dataset {
            records,
            years,
            loaded_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn years(&self) -> &YearIndex {
        &self.years
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}

/// Distinct years in order of first appearance. Feeds the year selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct YearIndex(Vec<i32>);

impl YearIndex {
    pub fn from_records(records: &[Record]) -> Self {
        let mut seen = HashSet::new();
        YearIndex(
            records
                .iter()
                .map(|record| record.year)
                .filter(|year| seen.insert(*year))
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, year: i32) -> Record {
        Record {
            country: country.to_string(),
            year,
            population_thousands: 1,
            population_density: 1,
            population_growth_rate: None,
            region: "R".to_string(),
        }
    }

    #[test]
    fn year_index_keeps_first_appearance_order() {
        let dataset = Dataset::new(vec![
            record("A", 2010),
            record("B", 2000),
            record("C", 2010),
            record("D", 2005),
            record("E", 2000),
        ]);
        assert_eq!(dataset.years().as_slice(), &[2010, 2000, 2005]);
        assert_eq!(dataset.years().len(), 3);
    }

    #[test]
    fn empty_dataset_has_no_years() {
        let dataset = Dataset::empty();
        assert!(dataset.is_empty());
        assert!(dataset.years().is_empty());
    }
}
