//! V1 API route definitions

use axum::{
    routing::{delete, get},
    Router,
};

use crate::api::v1::channels::{add_channel, all_channels};
use crate::api::v1::videos::{all_videos, delete_video, videos_by_channel};
use crate::InnerState;

#[tracing::instrument(name = "create_v1_routes", skip(state))]
pub fn create_v1_routes(state: InnerState) -> Router {
    tracing::info!("Setting up V1 API routes");

    Router::new()
        .route("/api/channels", get(all_channels).post(add_channel))
        .route("/api/videos", get(all_videos))
        .route("/api/videos/channel/:channel", get(videos_by_channel))
        .route("/api/videos/:id", delete(delete_video))
        .with_state(state)
}
