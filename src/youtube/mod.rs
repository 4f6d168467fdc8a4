//! YouTube Data API v3 access.
//!
//! [`YoutubeApi`] is the seam the ingestion services talk to; [`YoutubeClient`]
//! is the reqwest-backed implementation keyed by the configured API key.

pub mod models;
#[cfg(test)]
pub mod testing;

use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::errors::AppError;
pub use models::{ChannelListResponse, SearchListResponse, VideoListResponse};

const REDACTED_KEY: &str = "API_KEY_HIDDEN";

#[async_trait]
pub trait YoutubeApi: Send + Sync {
    /// Free-text search restricted to channel results, first hit only.
    async fn search_channels(&self, query: &str) -> Result<SearchListResponse, AppError>;

    /// Channel snippet lookup by canonical id.
    async fn channel_details(&self, channel_id: &str) -> Result<ChannelListResponse, AppError>;

    /// One page of a channel's videos, newest first.
    async fn search_channel_videos(
        &self,
        channel_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<SearchListResponse, AppError>;

    /// Bulk snippet + content details for the given video ids.
    async fn video_details(&self, video_ids: &[String]) -> Result<VideoListResponse, AppError>;
}

#[derive(Debug)]
pub struct YoutubeClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

impl YoutubeClient {
    pub fn new(base_url: String, api_key: Secret<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url,
            api_key,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, resource))?;
        url.query_pairs_mut()
            .extend_pairs(params.iter())
            .append_pair("key", self.api_key.expose_secret());

        debug!("YouTube API request: {}", redacted_url(&url));

        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("YouTube API error on {}: {} {}", resource, status, error_text);
            return Err(AppError::ExternalService(anyhow::anyhow!(
                "YouTube API error: {} {}",
                status.as_u16(),
                error_text
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl YoutubeApi for YoutubeClient {
    async fn search_channels(&self, query: &str) -> Result<SearchListResponse, AppError> {
        self.get_json(
            "search",
            &[
                ("part", "snippet"),
                ("type", "channel"),
                ("q", query),
                ("maxResults", "1"),
            ],
        )
        .await
    }

    async fn channel_details(&self, channel_id: &str) -> Result<ChannelListResponse, AppError> {
        self.get_json("channels", &[("part", "snippet"), ("id", channel_id)])
            .await
    }

    async fn search_channel_videos(
        &self,
        channel_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<SearchListResponse, AppError> {
        let page_size = page_size.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("channelId", channel_id),
            ("type", "video"),
            ("order", "date"),
            ("maxResults", page_size.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }
        self.get_json("search", &params).await
    }

    async fn video_details(&self, video_ids: &[String]) -> Result<VideoListResponse, AppError> {
        let ids = video_ids.join(",");
        self.get_json("videos", &[("part", "contentDetails,snippet"), ("id", ids.as_str())])
            .await
    }
}

/// Renders `url` with any `key` query parameter masked, for logs and errors.
pub fn redacted_url(url: &Url) -> String {
    if !url.query_pairs().any(|(name, _)| name == "key") {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == "key" {
                REDACTED_KEY.to_string()
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
