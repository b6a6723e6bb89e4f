//! Summary statistics over the filtered set.

use serde::Serialize;

use crate::pipeline::filter::FilteredSet;

/// KPIs for the current selection. Averages are rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KpiSnapshot {
    pub total_population: i64,
    pub average_density: f64,
    pub average_growth_rate: f64,
    pub record_count: usize,
}

impl KpiSnapshot {
    pub const EMPTY: KpiSnapshot = KpiSnapshot {
        total_population: 0,
        average_density: 0.0,
        average_growth_rate: 0.0,
        record_count: 0,
    };

    pub fn display(&self) -> KpiDisplay {
        KpiDisplay {
            total_population: self.total_population.to_string(),
            average_density: format!("{:.2}", self.average_density),
            average_growth_rate: format!("{:.2}", self.average_growth_rate),
        }
    }
}

/// Strings for the three KPI cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiDisplay {
    pub total_population: String,
    pub average_density: String,
    pub average_growth_rate: String,
}

/// Compute the snapshot. An empty set yields [`KpiSnapshot::EMPTY`].
///
/// The growth-rate average sums only records that have a growth rate but divides by
/// the size of the whole set, so absent rates pull the average toward zero.
/// The population total saturates at `i64::MAX` / `i64::MIN` instead of overflowing.
pub fn aggregate(filtered: &FilteredSet<'_>) -> KpiSnapshot {
    if filtered.is_empty() {
        return KpiSnapshot::EMPTY;
    }
    let count = filtered.len() as f64;

    let total_population = filtered
        .iter()
        .fold(0_i64, |total, r| total.saturating_add(r.population_thousands));
    let density_sum: f64 = filtered.iter().map(|r| r.population_density as f64).sum();
    let growth_sum: f64 = filtered
        .iter()
        .filter_map(|r| r.population_growth_rate)
        .sum();

    KpiSnapshot {
        total_population,
        average_density: round2(density_sum / count),
        average_growth_rate: round2(growth_sum / count),
        record_count: filtered.len(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
