//! Container box, fixed margins and the plot area left between them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// The right margin is wide because the legend lives there.
pub const CHART_MARGINS: Margins = Margins {
    top: 20.0,
    right: 200.0,
    bottom: 30.0,
    left: 30.0,
};

/// Pixel box of the chart container as the host last measured it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ContainerSize {
    fn default() -> Self {
        ContainerSize {
            width: 960.0,
            height: 500.0,
        }
    }
}

/// Drawable area inside the margins. Width or height may be zero or negative
/// for small containers; callers check [`PlotArea::is_drawable`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotArea {
    pub container: ContainerSize,
    pub margins: Margins,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(container: ContainerSize, margins: Margins) -> Self {
        PlotArea {
            container,
            margins,
            width: container.width - margins.left - margins.right,
            height: container.height - margins.top - margins.bottom,
        }
    }

    pub fn for_container(container: ContainerSize) -> Self {
        Self::new(container, CHART_MARGINS)
    }

    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}
