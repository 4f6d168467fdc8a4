use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::Store;
use crate::api::v1::entities::{Channel, NewChannel, NewVideo, Video};
use crate::errors::AppError;

/// Process-lifetime store. Ids start at 1 and are never reused; listings come
/// back in creation order.
#[derive(Debug)]
pub struct MemStore {
    inner: RwLock<MemState>,
}

#[derive(Debug)]
struct MemState {
    channels: BTreeMap<i64, Channel>,
    videos: BTreeMap<i64, Video>,
    next_channel_id: i64,
    next_video_id: i64,
}

impl Default for MemStore {
    fn default() -> Self {
        Self {
            inner: RwLock::new(MemState {
                channels: BTreeMap::new(),
                videos: BTreeMap::new(),
                next_channel_id: 1,
                next_video_id: 1,
            }),
        }
    }
}

#[async_trait]
impl Store for MemStore {
    async fn list_channels(&self) -> Result<Vec<Channel>, AppError> {
        Ok(self.inner.read().await.channels.values().cloned().collect())
    }

    async fn get_channel_by_name(&self, name: &str) -> Result<Option<Channel>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .channels
            .values()
            .find(|channel| channel.name == name)
            .cloned())
    }

    async fn create_channel(&self, channel: NewChannel) -> Result<Channel, AppError> {
        let mut state = self.inner.write().await;
        let id = state.next_channel_id;
        state.next_channel_id += 1;
        let channel = channel.with_id(id);
        state.channels.insert(id, channel.clone());
        Ok(channel)
    }

    async fn delete_channel(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.inner.write().await.channels.remove(&id).is_some())
    }

    async fn list_videos(&self) -> Result<Vec<Video>, AppError> {
        Ok(self.inner.read().await.videos.values().cloned().collect())
    }

    async fn list_videos_by_channel(&self, channel_name: &str) -> Result<Vec<Video>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .videos
            .values()
            .filter(|video| video.channel_name == channel_name)
            .cloned()
            .collect())
    }

    async fn create_video(&self, video: NewVideo) -> Result<Video, AppError> {
        let mut state = self.inner.write().await;
        let id = state.next_video_id;
        state.next_video_id += 1;
        let video = video.with_id(id);
        state.videos.insert(id, video.clone());
        Ok(video)
    }

    async fn delete_video(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.inner.write().await.videos.remove(&id).is_some())
    }
}
