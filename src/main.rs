mod api;
mod config;
mod db;
mod errors;
mod system;
mod youtube;

use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use std::error::Error;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::api::create_api_router;
use crate::api::v1::services::IngestionService;
use crate::config::Settings;
use crate::db::{init_db, SharedStore};
use crate::youtube::{YoutubeApi, YoutubeClient};

#[derive(Clone)]
pub struct InnerState {
    pub db: SharedStore,
    pub ingestion: Arc<IngestionService>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "longform_curator=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut settings = Settings::from_env()?;
    tracing::debug!("Loaded settings: {:?}", settings);

    let db = init_db(&settings).await?;

    let youtube: Option<Arc<dyn YoutubeApi>> = match settings.youtube_api_key.take() {
        Some(api_key) => Some(Arc::new(YoutubeClient::new(
            settings.youtube_api_base_url.clone(),
            api_key,
        ))),
        None => {
            tracing::warn!("YOUTUBE_API_KEY is not set; adding channels will fail");
            None
        }
    };

    let ingestion = Arc::new(IngestionService::new(db.clone(), youtube, settings.video_cap));
    let app_state = InnerState { db, ingestion };

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let app = create_api_router(app_state)
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(prometheus_layer);

    let listener = tokio::net::TcpListener::bind(settings.bind_address()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {:?}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
