//! Persistence for channels and videos.
//!
//! Handlers and the ingestion pipeline only see the [`Store`] trait; [`init_db`]
//! picks the concrete backend from settings.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use std::sync::Arc;

use crate::api::v1::entities::{Channel, NewChannel, NewVideo, Video};
use crate::config::Settings;
use crate::errors::AppError;

pub use memory::MemStore;
pub use sqlite::SqliteStore;

pub type SharedStore = Arc<dyn Store>;

#[async_trait]
pub trait Store: Send + Sync {
    async fn list_channels(&self) -> Result<Vec<Channel>, AppError>;
    async fn get_channel_by_name(&self, name: &str) -> Result<Option<Channel>, AppError>;
    async fn create_channel(&self, channel: NewChannel) -> Result<Channel, AppError>;
    /// Returns `false` when no channel had that id. Videos are left untouched.
    async fn delete_channel(&self, id: i64) -> Result<bool, AppError>;

    async fn list_videos(&self) -> Result<Vec<Video>, AppError>;
    async fn list_videos_by_channel(&self, channel_name: &str) -> Result<Vec<Video>, AppError>;
    async fn create_video(&self, video: NewVideo) -> Result<Video, AppError>;
    /// Returns `false` when no video had that id.
    async fn delete_video(&self, id: i64) -> Result<bool, AppError>;
}

#[tracing::instrument(name = "init_db", skip(settings))]
pub async fn init_db(settings: &Settings) -> Result<SharedStore, AppError> {
    match settings.database_url.as_deref() {
        Some(url) => {
            tracing::info!("Using SQLite store");
            let store = SqliteStore::connect(url).await?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory store");
            Ok(Arc::new(MemStore::default()))
        }
    }
}
