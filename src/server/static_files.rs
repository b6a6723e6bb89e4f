//! Static assets (the dataset CSV among them) served from the configured assets directory.

use std::path::Path;

use axum::Router;
use tower_http::services::ServeDir;

pub const ASSETS_ROUTE: &str = "/assets";

/// Router serving files under `dir` at `/assets`. Paths escaping the directory are rejected
/// by `ServeDir`; missing files fall through to a plain 404.
pub fn assets_router<S>(dir: &Path) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().nest_service(ASSETS_ROUTE, ServeDir::new(dir))
}
