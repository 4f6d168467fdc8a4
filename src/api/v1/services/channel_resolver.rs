//! Turns a pasted channel URL into the channel's canonical id and metadata.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::api::v1::entities::NewChannel;
use crate::errors::AppError;
use crate::youtube::YoutubeApi;

const YOUTUBE_HOST: &str = "youtube.com";
const CANONICAL_ID_PREFIX: &str = "UC";

/// Channel URL shapes in match order: canonical id, custom name, legacy user, handle.
static CHANNEL_URL_PATTERNS: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        r"youtube\.com/channel/([^/?]+)",
        r"youtube\.com/c/([^/?]+)",
        r"youtube\.com/user/([^/?]+)",
        r"youtube\.com/@([^/?]+)",
    ]
    .map(|pattern| Regex::new(pattern).expect("channel URL pattern is valid"))
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub name: String,
    pub profile_image: Option<String>,
    pub channel_id: String,
    pub description: Option<String>,
}

impl From<ChannelInfo> for NewChannel {
    fn from(info: ChannelInfo) -> Self {
        NewChannel {
            name: info.name,
            profile_image: info.profile_image,
            channel_id: Some(info.channel_id),
            description: info.description,
        }
    }
}

/// Checks that `channel_url` is a URL on a YouTube host and returns the
/// provisional identifier it carries.
pub fn validate_channel_url(channel_url: &str) -> Result<String, AppError> {
    let parsed = Url::parse(channel_url.trim()).map_err(|e| {
        debug!("Rejecting channel URL {:?}: {}", channel_url, e);
        AppError::ValidationErrors(HashMap::from([(
            "channelUrl".to_string(),
            vec!["Invalid url".to_string()],
        )]))
    })?;

    let on_youtube = parsed
        .host_str()
        .is_some_and(|host| host.contains(YOUTUBE_HOST));
    if !on_youtube {
        return Err(AppError::Validation("Invalid YouTube channel URL".to_string()));
    }

    extract_channel_id(channel_url)
        .ok_or_else(|| AppError::Validation("Invalid YouTube channel URL".to_string()))
}

/// First matching channel URL shape wins. Handles come back without the `@`.
pub fn extract_channel_id(channel_url: &str) -> Option<String> {
    CHANNEL_URL_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(channel_url)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
    })
}

pub fn is_canonical_channel_id(identifier: &str) -> bool {
    identifier.starts_with(CANONICAL_ID_PREFIX)
}

/// Resolves a provisional identifier to full channel metadata.
///
/// Any upstream failure is reported as "Failed to fetch channel information";
/// an empty detail lookup is "Channel not found".
#[tracing::instrument(name = "Resolve YouTube channel", skip(youtube))]
pub async fn resolve_channel(
    youtube: &dyn YoutubeApi,
    provisional_id: &str,
) -> Result<ChannelInfo, AppError> {
    match fetch_channel_info(youtube, provisional_id).await {
        Ok(Some(info)) => {
            info!("Resolved channel {} ({})", info.name, info.channel_id);
            Ok(info)
        }
        Ok(None) => {
            warn!("No channel found for {}", provisional_id);
            Err(AppError::NotFound("Channel not found".to_string()))
        }
        Err(e) => {
            error!("Error fetching channel metadata for {}: {:?}", provisional_id, e);
            Err(AppError::ExternalService(
                anyhow::Error::new(e).context("Failed to fetch channel information"),
            ))
        }
    }
}

async fn fetch_channel_info(
    youtube: &dyn YoutubeApi,
    provisional_id: &str,
) -> Result<Option<ChannelInfo>, AppError> {
    let channel_id = if is_canonical_channel_id(provisional_id) {
        provisional_id.to_string()
    } else {
        lookup_canonical_id(youtube, provisional_id).await
    };

    let details = youtube.channel_details(&channel_id).await?;
    let Some(channel) = details.items.into_iter().next() else {
        return Ok(None);
    };

    Ok(Some(ChannelInfo {
        name: channel.snippet.title,
        profile_image: channel.snippet.thumbnails.default.map(|t| t.url),
        channel_id,
        description: channel.snippet.description.filter(|d| !d.is_empty()),
    }))
}

/// Searches for a custom name or handle. Falls back to the input when the
/// search fails or finds nothing.
async fn lookup_canonical_id(youtube: &dyn YoutubeApi, query: &str) -> String {
    match youtube.search_channels(query).await {
        Ok(results) => match results.items.iter().find_map(|hit| hit.channel_id()) {
            Some(channel_id) => {
                debug!("Search resolved {} to {}", query, channel_id);
                channel_id.to_string()
            }
            None => {
                warn!("Channel search for {} returned no results, using it as-is", query);
                query.to_string()
            }
        },
        Err(e) => {
            warn!("Channel search for {} failed, using it as-is: {:?}", query, e);
            query.to_string()
        }
    }
}
