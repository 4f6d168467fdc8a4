use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use super::Store;
use crate::api::v1::entities::{Channel, NewChannel, NewVideo, Video};
use crate::errors::AppError;

const CREATE_CHANNELS: &str = r#"CREATE TABLE IF NOT EXISTS channels (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    profile_image TEXT,
    channel_id TEXT,
    description TEXT
)"#;

const CREATE_VIDEOS: &str = r#"CREATE TABLE IF NOT EXISTS videos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    video_id TEXT NOT NULL,
    channel_name TEXT NOT NULL,
    url TEXT NOT NULL,
    thumbnail TEXT,
    duration TEXT,
    published_at TEXT
)"#;

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    #[tracing::instrument(name = "Connect SQLite store")]
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to `:memory:` opens its own database
        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), AppError> {
        sqlx::query(CREATE_CHANNELS).execute(&self.pool).await?;
        sqlx::query(CREATE_VIDEOS).execute(&self.pool).await?;
        tracing::debug!("SQLite schema ready");
        Ok(())
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn list_channels(&self) -> Result<Vec<Channel>, AppError> {
        let channels = sqlx::query_as::<_, Channel>("SELECT * FROM channels ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(channels)
    }

    async fn get_channel_by_name(&self, name: &str) -> Result<Option<Channel>, AppError> {
        let channel = sqlx::query_as::<_, Channel>("SELECT * FROM channels WHERE name = $1 LIMIT 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(channel)
    }

    async fn create_channel(&self, channel: NewChannel) -> Result<Channel, AppError> {
        let channel = sqlx::query_as::<_, Channel>(
            r#"INSERT INTO channels (name, profile_image, channel_id, description)
               VALUES ($1, $2, $3, $4)
               RETURNING *"#,
        )
        .bind(channel.name)
        .bind(channel.profile_image)
        .bind(channel.channel_id)
        .bind(channel.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(channel)
    }

    async fn delete_channel(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM channels WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_videos(&self) -> Result<Vec<Video>, AppError> {
        let videos = sqlx::query_as::<_, Video>("SELECT * FROM videos ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(videos)
    }

    async fn list_videos_by_channel(&self, channel_name: &str) -> Result<Vec<Video>, AppError> {
        let videos =
            sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE channel_name = $1 ORDER BY id")
                .bind(channel_name)
                .fetch_all(&self.pool)
                .await?;
        Ok(videos)
    }

    async fn create_video(&self, video: NewVideo) -> Result<Video, AppError> {
        let video = sqlx::query_as::<_, Video>(
            r#"INSERT INTO videos (title, video_id, channel_name, url, thumbnail, duration, published_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING *"#,
        )
        .bind(video.title)
        .bind(video.video_id)
        .bind(video.channel_name)
        .bind(video.url)
        .bind(video.thumbnail)
        .bind(video.duration)
        .bind(video.published_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(video)
    }

    async fn delete_video(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
