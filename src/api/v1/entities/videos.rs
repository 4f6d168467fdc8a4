//! Long-form video records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted long-form video.
///
/// `channel_name` refers to [`Channel::name`](super::Channel) by value. Removing or
/// renaming a channel leaves its videos in place.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: i64,
    pub title: String,
    pub video_id: String,
    pub channel_name: String,
    pub url: String,
    pub thumbnail: Option<String>,
    /// Upstream duration string as received, e.g. `PT12M3S`
    pub duration: Option<String>,
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVideo {
    pub title: String,
    pub video_id: String,
    pub channel_name: String,
    pub url: String,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub published_at: Option<String>,
}

impl NewVideo {
    pub fn with_id(self, id: i64) -> Video {
        Video {
            id,
            title: self.title,
            video_id: self.video_id,
            channel_name: self.channel_name,
            url: self.url,
            thumbnail: self.thumbnail,
            duration: self.duration,
            published_at: self.published_at,
        }
    }
}
