//! Hover tooltip: one instance per chart, Hidden → Visible on enter, repositioned on
//! move, Hidden again on leave.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::record::Record;

/// Horizontal offset from the pointer, in page pixels.
pub const TOOLTIP_OFFSET_X: f64 = 70.0;

/// Values shown for a hovered point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipContent {
    pub year: i32,
    pub region: String,
    pub country: String,
    pub population_thousands: i64,
    pub population_density: i64,
    pub population_growth_rate: Option<f64>,
}

impl TooltipContent {
    pub fn from_record(record: &Record) -> Self {
        TooltipContent {
            year: record.year,
            region: record.region.clone(),
            country: record.country.clone(),
            population_thousands: record.population_thousands,
            population_density: record.population_density,
            population_growth_rate: record.population_growth_rate,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let growth = self
            .population_growth_rate
            .map(|rate| rate.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        vec![
            format!("Year: {}", self.year),
            format!("Region: {}", self.region),
            format!("Country: {}", self.country),
            format!("Population: {}", self.population_thousands),
            format!("Population Density: {}", self.population_density),
            format!("Population Growth Rate: {growth}"),
        ]
    }
}

impl fmt::Display for TooltipContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// Pointer interaction over a chart point, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum PointerEvent {
    Enter { point: usize, x: f64, y: f64 },
    Move { point: usize, x: f64, y: f64 },
    Leave,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum TooltipState {
    Hidden,
    Visible {
        point: usize,
        left: f64,
        top: f64,
        content: TooltipContent,
    },
}

/// Owner of the single tooltip. Content lookup goes through a closure so the
/// machine does not depend on how the scene stores its points.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    state: TooltipState,
}

impl Default for Tooltip {
    fn default() -> Self {
        Tooltip {
            state: TooltipState::Hidden,
        }
    }
}

impl Tooltip {
    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, TooltipState::Visible { .. })
    }

    pub fn hide(&mut self) {
        self.state = TooltipState::Hidden;
    }

    /// Apply one pointer event. Events naming a point the lookup does not know are
    /// ignored; a move while hidden stays hidden.
    pub fn handle<F>(&mut self, event: PointerEvent, lookup: F) -> &TooltipState
    where
        F: Fn(usize) -> Option<TooltipContent>,
    {
        match event {
            PointerEvent::Enter { point, x, y } => {
                if let Some(content) = lookup(point) {
                    self.show(point, x, y, content);
                }
            }
            PointerEvent::Move { point, x, y } => {
                if self.is_visible() {
                    if let Some(content) = lookup(point) {
                        self.show(point, x, y, content);
                    }
                }
            }
            PointerEvent::Leave => self.hide(),
        }
        &self.state
    }

    fn show(&mut self, point: usize, x: f64, y: f64, content: TooltipContent) {
        self.state = TooltipState::Visible {
            point,
            left: x + TOOLTIP_OFFSET_X,
            top: y,
            content,
        };
    }
}
