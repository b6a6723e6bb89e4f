//! Event-driven owner of one chart instance.
//!
//! The session holds the only cross-event state: the Dataset, the ActiveSelection, the
//! last measured container size and the tooltip. Every selection change or resize
//! re-runs the whole pipeline from those values; nothing derived is patched in place.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::chart::{
    compose, render_svg, ChartEncoding, ContainerSize, PointerEvent, Scene, Tooltip,
    TooltipState,
};
use crate::data::dataset::{Dataset, YearIndex};
use crate::pipeline::{apply_selection, KpiDisplay, KpiSnapshot, Selection};

/// Everything one render pass produces, owned so it can outlive the borrow of the Dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub selection: Selection,
    pub kpis: KpiSnapshot,
    pub kpi_display: KpiDisplay,
    pub encoding: ChartEncoding,
    pub scene: Scene,
}

impl DashboardView {
    pub fn svg(&self) -> String {
        render_svg(&self.scene)
    }
}

/// Run the full pipeline: filter, KPIs, encoding, scene.
pub fn render_view(
    dataset: &Dataset,
    selection: Selection,
    container: ContainerSize,
) -> DashboardView {
    let view = apply_selection(dataset.records(), selection);
    let (encoding, scene) = compose(&view.filtered, container);
    debug!(
        %selection,
        records = view.filtered.len(),
        points = scene.points.len(),
        plot_width = scene.plot_width,
        plot_height = scene.plot_height,
        "render pass"
    );
    DashboardView {
        selection,
        kpis: view.kpis,
        kpi_display: view.kpis.display(),
        encoding,
        scene,
    }
}

/// Values for the year selector: "All" first, then every year in the Dataset.
pub fn selector_options(years: &YearIndex) -> Vec<Selection> {
    std::iter::once(Selection::All)
        .chain(years.as_slice().iter().copied().map(Selection::Year))
        .collect()
}

#[derive(Debug)]
pub struct ChartSession {
    dataset: Arc<Dataset>,
    selection: Selection,
    container: ContainerSize,
    view: DashboardView,
    tooltip: Tooltip,
    render_passes: u64,
}

impl ChartSession {
    /// Start on "All" with one render pass already done.
    pub fn new(dataset: Arc<Dataset>, container: ContainerSize) -> Self {
        let view = render_view(&dataset, Selection::All, container);
        ChartSession {
            dataset,
            selection: Selection::All,
            container,
            view,
            tooltip: Tooltip::default(),
            render_passes: 1,
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn container(&self) -> ContainerSize {
        self.container
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn tooltip(&self) -> &TooltipState {
        self.tooltip.state()
    }

    pub fn render_passes(&self) -> u64 {
        self.render_passes
    }

    pub fn options(&self) -> Vec<Selection> {
        selector_options(self.dataset.years())
    }

    pub fn select(&mut self, selection: Selection) -> &DashboardView {
        self.selection = selection;
        self.redraw()
    }

    pub fn resize(&mut self, container: ContainerSize) -> &DashboardView {
        self.container = container;
        self.redraw()
    }

    /// Swap in a freshly loaded Dataset and go back to "All".
    pub fn replace_dataset(&mut self, dataset: Arc<Dataset>) -> &DashboardView {
        self.dataset = dataset;
        self.selection = Selection::All;
        self.redraw()
    }

    pub fn pointer(&mut self, event: PointerEvent) -> &TooltipState {
        let scene = &self.view.scene;
        self.tooltip
            .handle(event, |index| scene.point(index).map(|point| point.tooltip.clone()))
    }

    pub fn svg(&self) -> String {
        self.view.svg()
    }

    fn redraw(&mut self) -> &DashboardView {
        // Point indices belong to the old scene.
        self.tooltip.hide();
        self.view = render_view(&self.dataset, self.selection, self.container);
        self.render_passes += 1;
        &self.view
    }
}
