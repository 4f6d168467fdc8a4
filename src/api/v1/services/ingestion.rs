//! Channel-add orchestration.
//!
//! The synchronous part (validate, resolve, duplicate check, persist) decides the
//! response. Video ingestion is then spawned as a detached task whose only
//! observable output is its log lines and the videos it stores.

use std::sync::Arc;
use tracing::{error, info, Instrument};

use super::channel_resolver::{resolve_channel, validate_channel_url};
use super::video_discovery::discover_video_ids;
use super::video_enrichment::store_long_form_videos;
use crate::api::v1::entities::Channel;
use crate::db::{SharedStore, Store};
use crate::errors::AppError;
use crate::youtube::YoutubeApi;

pub struct IngestionService {
    store: SharedStore,
    youtube: Option<Arc<dyn YoutubeApi>>,
    video_cap: usize,
}

impl IngestionService {
    /// `youtube` is `None` when no API key is configured; channel adds then fail.
    pub fn new(store: SharedStore, youtube: Option<Arc<dyn YoutubeApi>>, video_cap: usize) -> Self {
        Self {
            store,
            youtube,
            video_cap,
        }
    }

    /// Adds the channel behind `channel_url` and starts ingesting its videos in
    /// the background. Returns once the channel record exists.
    ///
    /// The duplicate check and the insert are not atomic. Two concurrent adds of
    /// the same channel can both pass the check on the in-memory store.
    #[tracing::instrument(name = "Add channel", skip(self))]
    pub async fn add_channel(&self, channel_url: &str) -> Result<Channel, AppError> {
        let provisional_id = validate_channel_url(channel_url)?;

        let youtube = self.youtube.clone().ok_or_else(|| {
            error!("YouTube API key not configured");
            AppError::Configuration("YouTube API key not configured".to_string())
        })?;

        let info = resolve_channel(youtube.as_ref(), &provisional_id).await?;

        if self.store.get_channel_by_name(&info.name).await?.is_some() {
            info!("Channel {} already exists", info.name);
            return Err(AppError::Conflict(
                "Channel already exists in your collection".to_string(),
            ));
        }

        let channel_id = info.channel_id.clone();
        let channel = self.store.create_channel(info.into()).await?;
        info!("Created channel {} (id {})", channel.name, channel.id);

        self.spawn_video_ingestion(youtube, channel_id, channel.name.clone());
        Ok(channel)
    }

    fn spawn_video_ingestion(
        &self,
        youtube: Arc<dyn YoutubeApi>,
        channel_id: String,
        channel_name: String,
    ) {
        let store = self.store.clone();
        let video_cap = self.video_cap;
        let span = tracing::info_span!("channel_ingestion", channel = %channel_name);

        tokio::spawn(
            async move {
                ingest_channel_videos(
                    youtube.as_ref(),
                    store.as_ref(),
                    &channel_id,
                    &channel_name,
                    video_cap,
                )
                .await;
            }
            .instrument(span),
        );
    }
}

/// Discovers up to `video_cap` recent videos of a channel and stores the
/// long-form ones. Failures are logged, never returned.
pub async fn ingest_channel_videos(
    youtube: &dyn YoutubeApi,
    store: &dyn Store,
    channel_id: &str,
    channel_name: &str,
    video_cap: usize,
) -> usize {
    info!(
        "Starting to fetch videos for channel: {} (ID: {})",
        channel_name, channel_id
    );

    let video_ids = discover_video_ids(youtube, channel_id, video_cap).await;
    if video_ids.is_empty() {
        info!("No videos to process for channel: {}", channel_name);
        return 0;
    }

    let saved = store_long_form_videos(youtube, store, channel_name, &video_ids).await;
    info!("Finished processing videos for channel: {}", channel_name);
    saved
}
