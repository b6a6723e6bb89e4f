use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::config::Config;
use crate::data::dataset::Dataset;
use crate::data::loader::load_dataset_async;
use crate::session::ChartSession;

pub mod api;
pub mod debounce;
pub mod page;
pub mod routes;
pub mod static_files;

pub use routes::build_router;

use debounce::Debouncer;

/// Shared handler state. The mutex serialises render passes for the one chart instance.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<ChartSession>>,
    pub resize: Arc<Debouncer>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(dataset: Dataset, config: Config) -> Self {
        let session = ChartSession::new(Arc::new(dataset), config.container);
        AppState {
            session: Arc::new(Mutex::new(session)),
            resize: Debouncer::new(config.resize_debounce()),
            config: Arc::new(config),
        }
    }
}

/// Load the dataset, then serve until the listener fails.
pub async fn run_server(config: Config) -> std::io::Result<()> {
    let dataset = load_dataset_async(config.data_path.clone()).await;
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, records = dataset.len(), "popdash listening");
    let app = build_router(AppState::new(dataset, config));
    axum::serve(listener, app).await
}
