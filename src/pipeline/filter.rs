//! Year selection and the filtered record set it produces.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::data::record::Record;

const ALL: &str = "All";

/// Current year filter: every record, or one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    #[default]
    All,
    Year(i32),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected \"All\" or a year, got {0:?}")]
pub struct SelectionParseError(pub String);

impl FromStr for Selection {
    type Err = SelectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ALL) {
            return Ok(Selection::All);
        }
        trimmed
            .parse::<i32>()
            .map(Selection::Year)
            .map_err(|_| SelectionParseError(s.to_string()))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Year(year) => write!(f, "{year}"),
        }
    }
}

// On the wire a selection is either the string "All" or a bare year number
// (a year given as a string is accepted too, since HTML select values are strings).
impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str(ALL),
            Self::Year(year) => serializer.serialize_i32(*year),
        }
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Year(i32),
            Text(String),
        }
        match Wire::deserialize(deserializer)? {
            Wire::Year(year) => Ok(Selection::Year(year)),
            Wire::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Records matching a selection, in dataset order. Borrows from the Dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredSet<'a> {
    records: Vec<&'a Record>,
}

impl<'a> FilteredSet<'a> {
    pub fn from_records(records: Vec<&'a Record>) -> Self {
        FilteredSet { records }
    }

    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Narrow the dataset to a selection. `All` passes every record through in order;
/// a year with no rows gives an empty set.
pub fn select(records: &[Record], selection: Selection) -> FilteredSet<'_> {
    let records = match selection {
        Selection::All => records.iter().collect(),
        Selection::Year(year) => records.iter().filter(|r| r.year == year).collect(),
    };
    FilteredSet { records }
}
