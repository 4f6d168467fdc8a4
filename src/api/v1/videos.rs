use axum::extract::{Path, State};
use axum::Json;

use crate::api::common::MessageResponse;
use crate::api::v1::entities::Video;
use crate::errors::AppError;
use crate::InnerState;

#[tracing::instrument(name = "Get all videos", skip(inner))]
pub async fn all_videos(State(inner): State<InnerState>) -> Result<Json<Vec<Video>>, AppError> {
    let videos = inner.db.list_videos().await?;
    tracing::debug!("Returning {} videos", videos.len());
    Ok(Json(videos))
}

/// `channel` arrives percent-decoded and is matched against the stored channel name.
#[tracing::instrument(name = "Get videos by channel", skip(inner))]
pub async fn videos_by_channel(
    State(inner): State<InnerState>,
    Path(channel): Path<String>,
) -> Result<Json<Vec<Video>>, AppError> {
    let videos = inner.db.list_videos_by_channel(&channel).await?;
    Ok(Json(videos))
}

#[tracing::instrument(name = "Delete video", skip(inner))]
pub async fn delete_video(
    State(inner): State<InnerState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let not_found = || AppError::NotFound("Video not found".to_string());

    // Ids that are not numbers cannot exist
    let id = id.parse::<i64>().map_err(|_| not_found())?;
    if !inner.db.delete_video(id).await? {
        return Err(not_found());
    }

    tracing::info!("Deleted video {}", id);
    Ok(Json(MessageResponse::new("Video deleted successfully")))
}
