pub mod encoding;
pub mod layout;
pub mod scale;
pub mod scene;
pub mod svg;
pub mod tooltip;

pub use encoding::{resolve, ChartEncoding, ColorMap, SizeScale, CATEGORY10};
pub use layout::{ContainerSize, Margins, PlotArea, CHART_MARGINS};
pub use scale::{Domain, LinearScale};
pub use scene::{build_scene, Axis, AxisOrientation, LegendEntry, Scene, ScenePoint, Tick};
pub use svg::render_svg;
pub use tooltip::{PointerEvent, Tooltip, TooltipContent, TooltipState};

use crate::pipeline::filter::FilteredSet;

/// Resolve the encoding and lay out a scene for one container size.
pub fn compose(filtered: &FilteredSet<'_>, container: ContainerSize) -> (ChartEncoding, Scene) {
    let encoding = resolve(filtered);
    let plot = PlotArea::for_container(container);
    let scene = build_scene(filtered, &encoding, &plot);
    (encoding, scene)
}
