use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use std::collections::HashMap;

use crate::api::v1::entities::Channel;
use crate::errors::AppError;
use crate::InnerState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChannelRequest {
    pub channel_url: String,
}

#[tracing::instrument(name = "Get all channels", skip(inner))]
pub async fn all_channels(State(inner): State<InnerState>) -> Result<Json<Vec<Channel>>, AppError> {
    let channels = inner.db.list_channels().await?;
    tracing::debug!("Returning {} channels", channels.len());
    Ok(Json(channels))
}

/// Responds as soon as the channel is stored. Its videos show up later, once
/// background ingestion has run.
#[tracing::instrument(name = "Add channel from URL", skip(inner, payload))]
pub async fn add_channel(
    State(inner): State<InnerState>,
    payload: Result<Json<AddChannelRequest>, JsonRejection>,
) -> Result<Json<Channel>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::warn!("Rejected add-channel body: {}", rejection.body_text());
        AppError::ValidationErrors(HashMap::from([(
            "body".to_string(),
            vec![rejection.body_text()],
        )]))
    })?;

    let channel = inner.ingestion.add_channel(&payload.channel_url).await?;
    Ok(Json(channel))
}
