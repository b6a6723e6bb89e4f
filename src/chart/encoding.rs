//! Visual encoding of the filtered set: density on x, growth rate on y,
//! population as point radius, region as fill color.

use serde::Serialize;

use crate::chart::scale::{Domain, LinearScale};
use crate::data::record::Record;
use crate::pipeline::filter::FilteredSet;

/// Ten-color categorical palette, reused cyclically past ten regions.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Thousands of people per pixel of radius.
pub const POPULATION_PER_RADIUS_PX: f64 = 200.0;

/// Region → color, assigned in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColorMap {
    entries: Vec<(String, &'static str)>,
}

impl ColorMap {
    pub fn from_regions<'r>(regions: impl IntoIterator<Item = &'r str>) -> Self {
        let mut entries: Vec<(String, &'static str)> = Vec::new();
        for region in regions {
            if entries.iter().all(|(known, _)| known != region) {
                let color = CATEGORY10[entries.len() % CATEGORY10.len()];
                entries.push((region.to_string(), color));
            }
        }
        ColorMap { entries }
    }

    /// Color for a region. Regions outside the map get the first palette entry.
    pub fn color(&self, region: &str) -> &'static str {
        self.entries
            .iter()
            .find(|(known, _)| known == region)
            .map(|(_, color)| *color)
            .unwrap_or(CATEGORY10[0])
    }

    /// Regions with their colors, in assignment order (legend order).
    pub fn entries(&self) -> impl Iterator<Item = (&str, &'static str)> + '_ {
        self.entries.iter().map(|(region, color)| (region.as_str(), *color))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Direct linear radius: `population_thousands / 200`, not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeScale {
    pub divisor: f64,
}

impl Default for SizeScale {
    fn default() -> Self {
        SizeScale {
            divisor: POPULATION_PER_RADIUS_PX,
        }
    }
}

impl SizeScale {
    pub fn radius(&self, population_thousands: i64) -> f64 {
        population_thousands as f64 / self.divisor
    }
}

/// Scales and mappings for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartEncoding {
    pub x_domain: Domain,
    pub y_domain: Domain,
    pub colors: ColorMap,
    pub size: SizeScale,
}

impl ChartEncoding {
    /// Density onto `[0, width]`.
    pub fn x_scale(&self, width: f64) -> LinearScale {
        LinearScale::new(self.x_domain, (0.0, width))
    }

    /// Growth rate onto `[height, 0]`, so larger rates plot higher.
    pub fn y_scale(&self, height: f64) -> LinearScale {
        LinearScale::new(self.y_domain, (height, 0.0))
    }
}

/// Derive the encoding from the filtered set. Absent growth rates do not take part
/// in the y domain; degenerate domains use the fallbacks in [`Domain::from_values`].
pub fn resolve(filtered: &FilteredSet<'_>) -> ChartEncoding {
    ChartEncoding {
        x_domain: Domain::from_values(filtered.iter().map(|r| r.population_density as f64)),
        y_domain: Domain::from_values(filtered.iter().filter_map(|r| r.population_growth_rate)),
        colors: ColorMap::from_regions(filtered.iter().map(|r: &Record| r.region.as_str())),
        size: SizeScale::default(),
    }
}
