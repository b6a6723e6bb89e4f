//! Event handling on a single chart instance: selection, resize, pointer, reload.

use std::path::Path;
use std::sync::Arc;

use popdash::chart::{ContainerSize, PointerEvent, TooltipState};
use popdash::data::{load_dataset, Dataset};
use popdash::pipeline::Selection;
use popdash::session::{render_view, selector_options, ChartSession};

fn fixture_dataset() -> Arc<Dataset> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/population_small.csv");
    Arc::new(load_dataset(path).expect("fixture loads"))
}

fn session() -> ChartSession {
    ChartSession::new(fixture_dataset(), ContainerSize::default())
}

#[test]
fn starts_on_all_with_one_render_pass() {
    let session = session();
    assert_eq!(session.selection(), Selection::All);
    assert_eq!(session.render_passes(), 1);
    assert_eq!(session.view().kpis.total_population, 5400);
    assert_eq!(
        session.options(),
        vec![Selection::All, Selection::Year(2000), Selection::Year(2010)]
    );
    assert_eq!(session.tooltip(), &TooltipState::Hidden);
}

#[test]
fn selection_change_recomputes_kpis_and_scene() {
    let mut session = session();
    let view = session.select(Selection::Year(2010));
    assert_eq!(view.kpis.total_population, 2400);
    assert_eq!(view.kpi_display.average_growth_rate, "-0.17");
    // C has no growth rate; D and F are drawn.
    assert_eq!(view.scene.points.len(), 2);
    assert_eq!(view.scene.undrawn_records, 1);

    let d = &view.scene.points[0];
    assert_eq!(d.tooltip.country, "D");
    assert_eq!((d.cx, d.cy, d.r), (365.0, 0.0, 2.0));
    let f = &view.scene.points[1];
    assert_eq!((f.cx, f.cy, f.r), (365.0, 450.0, 4.0));

    assert_eq!(session.render_passes(), 2);
}

#[test]
fn view_is_reproducible_from_dataset_and_selection() {
    let dataset = fixture_dataset();
    let mut session = ChartSession::new(Arc::clone(&dataset), ContainerSize::default());
    session.select(Selection::Year(2000));
    let rebuilt = render_view(&dataset, Selection::Year(2000), ContainerSize::default());
    assert_eq!(session.view(), &rebuilt);
}

#[test]
fn pointer_events_drive_the_tooltip() {
    let mut session = session();
    session.select(Selection::Year(2000));

    let state = session
        .pointer(PointerEvent::Enter { point: 1, x: 100.0, y: 40.0 })
        .clone();
    match state {
        TooltipState::Visible { point, left, top, content } => {
            assert_eq!(point, 1);
            assert_eq!(left, 170.0);
            assert_eq!(top, 40.0);
            assert_eq!(content.country, "B");
            assert_eq!(content.population_thousands, 2000);
        }
        other => panic!("expected visible tooltip, got {other:?}"),
    }

    session.pointer(PointerEvent::Move { point: 0, x: 110.0, y: 45.0 });
    match session.tooltip() {
        TooltipState::Visible { content, left, .. } => {
            assert_eq!(content.country, "A");
            assert_eq!(*left, 180.0);
        }
        other => panic!("expected visible tooltip, got {other:?}"),
    }

    session.pointer(PointerEvent::Leave);
    assert_eq!(session.tooltip(), &TooltipState::Hidden);
}

#[test]
fn redraw_hides_tooltip_and_stale_points_are_ignored() {
    let mut session = session();
    session.pointer(PointerEvent::Enter { point: 0, x: 1.0, y: 1.0 });
    assert!(matches!(session.tooltip(), TooltipState::Visible { .. }));

    session.resize(ContainerSize {
        width: 1200.0,
        height: 600.0,
    });
    assert_eq!(session.tooltip(), &TooltipState::Hidden);
    assert_eq!(session.view().scene.plot_width, 970.0);

    session.pointer(PointerEvent::Enter { point: 99, x: 1.0, y: 1.0 });
    assert_eq!(session.tooltip(), &TooltipState::Hidden);
}

#[test]
fn tiny_container_renders_empty_frame_without_failing() {
    let mut session = session();
    let view = session.resize(ContainerSize {
        width: 100.0,
        height: 30.0,
    });
    assert!(view.scene.is_empty_frame());
    assert_eq!(view.kpis.total_population, 5400);
    assert!(session.svg().starts_with("<svg"));
}

#[test]
fn replacing_the_dataset_returns_to_all() {
    let mut session = session();
    session.select(Selection::Year(2010));
    let view = session.replace_dataset(Arc::new(Dataset::empty()));
    assert_eq!(view.selection, Selection::All);
    assert_eq!(view.kpis.total_population, 0);
    assert_eq!(session.options(), vec![Selection::All]);
    assert_eq!(selector_options(session.dataset().years()), vec![Selection::All]);
}
