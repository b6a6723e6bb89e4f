use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::chart::{ContainerSize, PointerEvent, TooltipState};
use crate::pipeline::Selection;
use crate::server::api::{
    ApiError, DashboardResponse, HealthResponse, ScheduledResponse, SelectionRequest,
    ViewQuery, ViewResponse, YearOptionsResponse,
};
use crate::server::page::INDEX_HTML;
use crate::server::static_files::assets_router;
use crate::server::AppState;
use crate::session::render_view;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/years", get(years))
        .route("/api/dashboard", get(dashboard))
        .route("/api/selection", post(selection))
        .route("/api/resize", post(resize))
        .route("/api/pointer", post(pointer))
        .route("/api/chart.svg", get(chart_svg))
        .route("/api/view", get(view))
        .merge(assets_router(&state.config.assets_dir))
        .fallback(not_found)
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let session = state.session.lock().await;
    Json(HealthResponse::for_dataset(session.dataset()))
}

async fn years(State(state): State<AppState>) -> Json<YearOptionsResponse> {
    let session = state.session.lock().await;
    Json(YearOptionsResponse {
        options: session.options(),
    })
}

async fn dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let session = state.session.lock().await;
    Json(DashboardResponse::from_session(&session))
}

async fn selection(
    State(state): State<AppState>,
    payload: Result<Json<SelectionRequest>, JsonRejection>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let Json(request) = payload.map_err(invalid_body)?;
    let mut session = state.session.lock().await;
    session.select(request.year);
    Ok(Json(DashboardResponse::from_session(&session)))
}

async fn resize(
    State(state): State<AppState>,
    payload: Result<Json<ContainerSize>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(size) = payload.map_err(invalid_body)?;
    if !(size.width.is_finite() && size.height.is_finite()) {
        return Err(ApiError::BadRequest(
            "width and height must be finite numbers".to_string(),
        ));
    }
    let session = state.session.clone();
    state.resize.call(move || async move {
        session.lock().await.resize(size);
    });
    Ok((
        StatusCode::ACCEPTED,
        Json(ScheduledResponse {
            status: "scheduled",
        }),
    ))
}

async fn pointer(
    State(state): State<AppState>,
    payload: Result<Json<PointerEvent>, JsonRejection>,
) -> Result<Json<TooltipState>, ApiError> {
    let Json(event) = payload.map_err(invalid_body)?;
    let mut session = state.session.lock().await;
    Ok(Json(session.pointer(event).clone()))
}

async fn chart_svg(State(state): State<AppState>) -> impl IntoResponse {
    let svg = state.session.lock().await.svg();
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg)
}

/// Runs the pipeline for the query without touching the session.
async fn view(
    State(state): State<AppState>,
    query: Result<Query<ViewQuery>, QueryRejection>,
) -> Result<Json<ViewResponse>, ApiError> {
    let Query(query) = query.map_err(invalid_query)?;
    let selection = match query.year.as_deref() {
        Some(year) => year
            .parse::<Selection>()
            .map_err(|err| ApiError::BadRequest(err.to_string()))?,
        None => Selection::All,
    };
    let (dataset, default_size) = {
        let session = state.session.lock().await;
        (session.dataset().clone(), session.container())
    };
    let container = ContainerSize {
        width: query.width.unwrap_or(default_size.width),
        height: query.height.unwrap_or(default_size.height),
    };
    let view = render_view(&dataset, selection, container);
    let svg = view.svg();
    Ok(Json(ViewResponse { view, svg }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

fn invalid_body(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
}

fn invalid_query(rejection: QueryRejection) -> ApiError {
    ApiError::BadRequest(format!("Invalid query: {}", rejection.body_text()))
}
