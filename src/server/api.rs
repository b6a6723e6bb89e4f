//! Request and response payloads for the JSON API, and the error type handlers return.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chart::{Scene, TooltipState};
use crate::data::dataset::Dataset;
use crate::pipeline::{KpiDisplay, KpiSnapshot, Selection};
use crate::session::{ChartSession, DashboardView};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Route not found")]
    NotFound,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
        };
        let message = self.to_string();
        (
            status,
            Json(ErrorBody {
                status: "error",
                message: &message,
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub records: usize,
    pub loaded_at: String,
}

impl HealthResponse {
    pub fn for_dataset(dataset: &Dataset) -> Self {
        HealthResponse {
            status: "ok",
            service: "popdash",
            version: env!("CARGO_PKG_VERSION"),
            records: dataset.len(),
            loaded_at: dataset.loaded_at().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct YearOptionsResponse {
    pub options: Vec<Selection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectionRequest {
    pub year: Selection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewQuery {
    pub year: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Session state as the dashboard page consumes it.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub selection: Selection,
    pub options: Vec<Selection>,
    pub kpis: KpiSnapshot,
    pub kpi_display: KpiDisplay,
    pub scene: Scene,
    pub svg: String,
    pub tooltip: TooltipState,
    pub render_passes: u64,
}

impl DashboardResponse {
    pub fn from_session(session: &ChartSession) -> Self {
        let view = session.view();
        DashboardResponse {
            selection: view.selection,
            options: session.options(),
            kpis: view.kpis,
            kpi_display: view.kpi_display.clone(),
            scene: view.scene.clone(),
            svg: view.svg(),
            tooltip: session.tooltip().clone(),
            render_passes: session.render_passes(),
        }
    }
}

/// One stateless pipeline run.
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    #[serde(flatten)]
    pub view: DashboardView,
    pub svg: String,
}

#[derive(Debug, Serialize)]
pub struct ScheduledResponse {
    pub status: &'static str,
}
