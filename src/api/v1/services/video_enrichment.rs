use tracing::{debug, error, info};

use super::duration::{parse_duration, SHORT_FORM_THRESHOLD_SECS};
use crate::api::v1::entities::NewVideo;
use crate::db::Store;
use crate::youtube::models::VideoItem;
use crate::youtube::YoutubeApi;

/// Upstream limit on ids per `videos` request.
pub const MAX_IDS_PER_DETAIL_REQUEST: usize = 50;

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Maps a detail record to a persistable video, or `None` for short-form items.
pub fn to_long_form_video(item: VideoItem, channel_name: &str) -> Option<NewVideo> {
    let duration = item
        .content_details
        .map(|details| details.duration)
        .unwrap_or_default();
    let seconds = parse_duration(&duration);

    debug!(
        "Processing: {} - Duration: {} ({}s)",
        item.snippet.title, duration, seconds
    );

    if seconds < SHORT_FORM_THRESHOLD_SECS {
        debug!("Skipping short video: {}", item.snippet.title);
        return None;
    }

    Some(NewVideo {
        url: watch_url(&item.id),
        title: item.snippet.title,
        video_id: item.id,
        channel_name: channel_name.to_string(),
        thumbnail: item.snippet.thumbnails.medium.map(|t| t.url),
        duration: Some(duration),
        published_at: item.snippet.published_at,
    })
}

/// Fetches details for `video_ids`, drops Shorts and stores the rest under
/// `channel_name`. Returns how many videos were saved.
///
/// A failed detail request abandons its chunk of ids; a failed insert only
/// loses that one video.
#[tracing::instrument(name = "Store long-form videos", skip(youtube, store, video_ids), fields(candidates = video_ids.len()))]
pub async fn store_long_form_videos(
    youtube: &dyn YoutubeApi,
    store: &dyn Store,
    channel_name: &str,
    video_ids: &[String],
) -> usize {
    let mut saved_count = 0;

    for chunk in video_ids.chunks(MAX_IDS_PER_DETAIL_REQUEST) {
        let details = match youtube.video_details(chunk).await {
            Ok(details) => details,
            Err(e) => {
                error!("Failed to fetch video details for {}: {:?}", channel_name, e);
                continue;
            }
        };
        debug!("Got details for {} videos", details.items.len());

        for item in details.items {
            let Some(video) = to_long_form_video(item, channel_name) else {
                continue;
            };
            let title = video.title.clone();

            match store.create_video(video).await {
                Ok(saved) => {
                    debug!("Saved video: {} (ID: {})", saved.title, saved.id);
                    saved_count += 1;
                }
                Err(e) => error!("Failed to store video {}: {:?}", title, e),
            }
        }
    }

    info!("Saved {} longform videos for channel: {}", saved_count, channel_name);
    saved_count
}
