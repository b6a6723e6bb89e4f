//! Pure scene description of the scatter plot. No drawing happens here; see
//! [`crate::chart::svg`] for the adapter that turns a Scene into markup.

use serde::Serialize;

use crate::chart::encoding::ChartEncoding;
use crate::chart::layout::{ContainerSize, Margins, PlotArea};
use crate::chart::scale::LinearScale;
use crate::chart::tooltip::TooltipContent;
use crate::data::record::Record;
use crate::pipeline::filter::FilteredSet;

pub const POINT_FILL_OPACITY: f64 = 0.65;
pub const AXIS_TICK_COUNT: usize = 10;
pub const AXIS_TICK_SIZE: f64 = 6.0;

pub const LEGEND_MARKER_RADIUS: f64 = 5.0;
pub const LEGEND_MARKER_OFFSET_X: f64 = 40.0;
pub const LEGEND_LABEL_OFFSET_X: f64 = 50.0;
pub const LEGEND_FIRST_ROW_Y: f64 = 100.0;
pub const LEGEND_ROW_SPACING: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrientation {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    /// Offset along the axis, in plot pixels.
    pub offset: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub orientation: AxisOrientation,
    /// Translation of the axis group inside the plot area.
    pub translate: (f64, f64),
    pub length: f64,
    pub ticks: Vec<Tick>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenePoint {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: &'static str,
    pub fill_opacity: f64,
    pub tooltip: TooltipContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub region: String,
    pub color: &'static str,
    pub marker_cx: f64,
    pub marker_cy: f64,
    pub marker_r: f64,
    pub label_x: f64,
    pub label_y: f64,
}

/// Everything needed to draw one frame. Coordinates of axes, points and legend are
/// relative to the plot origin (container origin shifted by the left/top margins).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub container: ContainerSize,
    pub margins: Margins,
    pub plot_width: f64,
    pub plot_height: f64,
    pub x_axis: Option<Axis>,
    pub y_axis: Option<Axis>,
    pub points: Vec<ScenePoint>,
    pub legend: Vec<LegendEntry>,
    /// Records left out of the point layer because they have no growth rate.
    pub undrawn_records: usize,
}

impl Scene {
    /// Frame with nothing in it, for containers too small to hold a plot.
    pub fn empty_frame(plot: &PlotArea) -> Self {
        Scene {
            container: plot.container,
            margins: plot.margins,
            plot_width: plot.width.max(0.0),
            plot_height: plot.height.max(0.0),
            x_axis: None,
            y_axis: None,
            points: Vec::new(),
            legend: Vec::new(),
            undrawn_records: 0,
        }
    }

    pub fn is_empty_frame(&self) -> bool {
        self.x_axis.is_none() && self.points.is_empty() && self.legend.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<&ScenePoint> {
        self.points.get(index)
    }
}

/// Lay out axes, points and legend for the filtered set. Records are drawn in
/// ascending year order (stable, so ties keep dataset order); draw order has no
/// effect on the encoding.
///
/// Every record with a growth rate becomes one point. A record without one has no y
/// position, so it is left out of the point layer and counted in
/// [`Scene::undrawn_records`]; it still shapes the color mapping and the legend.
pub fn build_scene(
    filtered: &FilteredSet<'_>,
    encoding: &ChartEncoding,
    plot: &PlotArea,
) -> Scene {
    if !plot.is_drawable() {
        return Scene::empty_frame(plot);
    }

    let x = encoding.x_scale(plot.width);
    let y = encoding.y_scale(plot.height);

    let mut ordered: Vec<&Record> = filtered.records().to_vec();
    ordered.sort_by_key(|record| record.year);

    let mut undrawn_records = 0;
    let points = ordered
        .into_iter()
        .filter_map(|record| {
            let Some(rate) = record.population_growth_rate else {
                undrawn_records += 1;
                return None;
            };
            Some(ScenePoint {
                cx: x.map(record.population_density as f64),
                cy: y.map(rate),
                r: encoding.size.radius(record.population_thousands),
                fill: encoding.colors.color(&record.region),
                fill_opacity: POINT_FILL_OPACITY,
                tooltip: TooltipContent::from_record(record),
            })
        })
        .collect();

    let legend = encoding
        .colors
        .entries()
        .enumerate()
        .map(|(row, (region, color))| {
            let row_y = LEGEND_FIRST_ROW_Y + row as f64 * LEGEND_ROW_SPACING;
            LegendEntry {
                region: region.to_string(),
                color,
                marker_cx: plot.width + LEGEND_MARKER_OFFSET_X,
                marker_cy: row_y,
                marker_r: LEGEND_MARKER_RADIUS,
                label_x: plot.width + LEGEND_LABEL_OFFSET_X,
                label_y: row_y,
            }
        })
        .collect();

    Scene {
        container: plot.container,
        margins: plot.margins,
        plot_width: plot.width,
        plot_height: plot.height,
        x_axis: Some(axis(AxisOrientation::Bottom, &x, (0.0, plot.height), plot.width)),
        y_axis: Some(axis(AxisOrientation::Left, &y, (0.0, 0.0), plot.height)),
        points,
        legend,
        undrawn_records,
    }
}

fn axis(
    orientation: AxisOrientation,
    scale: &LinearScale,
    translate: (f64, f64),
    length: f64,
) -> Axis {
    let ticks = scale
        .ticks(AXIS_TICK_COUNT)
        .into_iter()
        .map(|value| Tick {
            offset: scale.map(value),
            label: scale.tick_label(value, AXIS_TICK_COUNT),
        })
        .collect();
    Axis {
        orientation,
        translate,
        length,
        ticks,
    }
}
