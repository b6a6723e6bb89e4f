pub mod dataset;
pub mod loader;
pub mod record;

pub use dataset::{Dataset, YearIndex};
pub use loader::{
    load_dataset, load_dataset_async, load_from_reader, load_or_empty, parse_rows, DroppedRow,
    LoadError, ParsedRows, DEFAULT_DATA_PATH,
};
pub use record::{RawRow, Record, RowRejection};
