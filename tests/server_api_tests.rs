use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use popdash::config::Config;
use popdash::data::load_dataset;
use popdash::server::{build_router, AppState};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn app() -> Router {
    let dataset = load_dataset(fixtures_dir().join("population_small.csv")).expect("fixture loads");
    let config = Config {
        assets_dir: fixtures_dir(),
        resize_debounce_ms: 10,
        ..Config::default()
    };
    build_router(AppState::new(dataset, config))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.expect("router should respond");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, Request::get(uri).body(Body::empty()).expect("request")).await
}

async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    send(app, request).await
}

fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).expect("response should be valid json")
}

#[tokio::test]
async fn health_endpoint_reports_loaded_records() {
    let app = app();
    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    let payload = json(&body);
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["records"], 5);
    assert!(payload["loaded_at"].as_str().is_some());
}

#[tokio::test]
async fn years_endpoint_lists_all_then_years() {
    let app = app();
    let (status, body) = get(&app, "/api/years").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["options"], serde_json::json!(["All", 2000, 2010]));
}

#[tokio::test]
async fn dashboard_starts_on_all() {
    let app = app();
    let (status, body) = get(&app, "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    let payload = json(&body);
    assert_eq!(payload["selection"], "All");
    assert_eq!(payload["kpi_display"]["total_population"], "5400");
    assert_eq!(payload["kpi_display"]["average_density"], "76.00");
    assert_eq!(payload["kpi_display"]["average_growth_rate"], "0.70");
    assert_eq!(payload["tooltip"]["state"], "hidden");
    assert!(payload["svg"].as_str().is_some_and(|svg| svg.starts_with("<svg")));
}

#[tokio::test]
async fn selection_change_is_kept_by_the_session() {
    let app = app();
    let (status, body) = post_json(&app, "/api/selection", r#"{"year":2010}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["kpis"]["total_population"], 2400);

    let (_, body) = get(&app, "/api/dashboard").await;
    let payload = json(&body);
    assert_eq!(payload["selection"], 2010);
    assert_eq!(payload["render_passes"], 2);

    let (status, body) = post_json(&app, "/api/selection", r#"{"year":"All"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["selection"], "All");
}

#[tokio::test]
async fn selection_rejects_invalid_payloads() {
    let app = app();
    let (status, body) = post_json(&app, "/api/selection", "{bad json}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let payload = json(&body);
    assert_eq!(payload["status"], "error");
    assert!(payload["message"]
        .as_str()
        .is_some_and(|m| m.contains("Invalid request body")));

    let (status, _) = post_json(&app, "/api/selection", r#"{"year":"twenty"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn pointer_events_show_and_hide_the_tooltip() {
    let app = app();
    let (status, body) =
        post_json(&app, "/api/pointer", r#"{"event":"enter","point":0,"x":10,"y":20}"#).await;
    assert_eq!(status, StatusCode::OK);
    let payload = json(&body);
    assert_eq!(payload["state"], "visible");
    assert_eq!(payload["left"], 80.0);
    assert_eq!(payload["content"]["country"], "A");

    let (_, body) = post_json(&app, "/api/pointer", r#"{"event":"leave"}"#).await;
    assert_eq!(json(&body)["state"], "hidden");
}

#[tokio::test]
async fn chart_svg_is_served_as_svg() {
    let app = app();
    let response = app
        .clone()
        .oneshot(Request::get("/api/chart.svg").body(Body::empty()).expect("request"))
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("image/svg+xml")
    );
}

#[tokio::test]
async fn view_endpoint_is_stateless() {
    let app = app();
    let (status, body) = get(&app, "/api/view?year=2000&width=960&height=500").await;
    assert_eq!(status, StatusCode::OK);
    let payload = json(&body);
    assert_eq!(payload["selection"], 2000);
    assert_eq!(payload["kpis"]["total_population"], 3000);
    assert_eq!(payload["scene"]["plot_width"], 730.0);

    let (_, body) = get(&app, "/api/dashboard").await;
    let dashboard = json(&body);
    assert_eq!(dashboard["selection"], "All");
    assert_eq!(dashboard["render_passes"], 1);

    let (status, _) = get(&app, "/api/view?year=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn resize_is_debounced_then_applied() {
    let app = app();
    for width in [700, 800, 1200] {
        let body = format!(r#"{{"width":{width},"height":600}}"#);
        let (status, response) = post_json(&app, "/api/resize", &body).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(json(&response)["status"], "scheduled");
    }

    tokio::time::sleep(Duration::from_millis(200)).await;

    let (_, body) = get(&app, "/api/dashboard").await;
    let payload = json(&body);
    assert_eq!(payload["scene"]["container"]["width"], 1200.0);
    assert_eq!(payload["scene"]["plot_width"], 970.0);
    // One initial pass plus one for the burst.
    assert_eq!(payload["render_passes"], 2);
}

#[tokio::test]
async fn assets_and_unknown_routes() {
    let app = app();
    let (status, body) = get(&app, "/assets/population_small.csv").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Country,Year"));

    let (status, body) = get(&app, "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json(&body)["message"], "Route not found");

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("id=\"Scatterplot\""));
}
