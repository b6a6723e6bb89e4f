//! Filter and KPI stages. Each stage takes the previous stage's output and returns a new
//! value, so a view can always be rebuilt from the Dataset and the Selection alone.

pub mod filter;
pub mod kpi;

pub use filter::{select, FilteredSet, Selection, SelectionParseError};
pub use kpi::{aggregate, KpiDisplay, KpiSnapshot};

use crate::data::record::Record;

/// Output of a selection change: the filtered set and its KPIs, computed together.
#[derive(Debug, Clone)]
pub struct SelectionView<'a> {
    pub selection: Selection,
    pub filtered: FilteredSet<'a>,
    pub kpis: KpiSnapshot,
}

pub fn apply_selection(records: &[Record], selection: Selection) -> SelectionView<'_> {
    let filtered = select(records, selection);
    let kpis = aggregate(&filtered);
    SelectionView {
        selection,
        filtered,
        kpis,
    }
}
