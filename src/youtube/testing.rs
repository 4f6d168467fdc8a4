//! Scripted [`YoutubeApi`] used by the service and router tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::models::{
    ChannelItem, ChannelSnippet, ContentDetails, SearchResult, SearchResultId, SearchSnippet,
    Thumbnail, Thumbnails, VideoItem, VideoSnippet,
};
use super::{ChannelListResponse, SearchListResponse, VideoListResponse, YoutubeApi};
use crate::errors::AppError;

/// How the paged video search behaves.
#[derive(Debug, Clone)]
pub enum PagePlan {
    /// Scripted pages; `None` is a failing request. The last page carries no
    /// continuation token.
    Pages(Vec<Option<Vec<String>>>),
    /// Every page is full and always offers another one.
    Endless,
    /// Every page is full of non-video hits and always offers another one.
    EndlessWithoutVideos,
    /// A single empty page that still offers a continuation token.
    EmptyWithToken,
}

#[derive(Debug)]
pub struct StubYoutube {
    handles: HashMap<String, String>,
    channels: HashMap<String, ChannelItem>,
    videos: Vec<VideoItem>,
    page_plan: PagePlan,
    pub fail_search: bool,
    pub fail_channel_details: bool,
    pub fail_video_details: bool,
    pub search_calls: AtomicUsize,
    pub channel_calls: AtomicUsize,
    pub page_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl Default for StubYoutube {
    fn default() -> Self {
        Self {
            handles: HashMap::new(),
            channels: HashMap::new(),
            videos: Vec::new(),
            page_plan: PagePlan::Pages(Vec::new()),
            fail_search: false,
            fail_channel_details: false,
            fail_video_details: false,
            search_calls: AtomicUsize::new(0),
            channel_calls: AtomicUsize::new(0),
            page_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }
}

impl StubYoutube {
    pub fn with_channel(mut self, channel_id: &str, title: &str) -> Self {
        self.channels.insert(
            channel_id.to_string(),
            ChannelItem {
                id: channel_id.to_string(),
                snippet: ChannelSnippet {
                    title: title.to_string(),
                    description: Some(format!("About {}", title)),
                    thumbnails: Thumbnails {
                        default: Some(thumbnail(&format!("https://yt3.example/{}.jpg", channel_id))),
                        ..Thumbnails::default()
                    },
                },
            },
        );
        self
    }

    /// Makes a channel search for `query` resolve to `channel_id`.
    pub fn with_handle(mut self, query: &str, channel_id: &str) -> Self {
        self.handles.insert(query.to_string(), channel_id.to_string());
        self
    }

    pub fn with_pages(mut self, plan: PagePlan) -> Self {
        self.page_plan = plan;
        self
    }

    pub fn with_video(mut self, video_id: &str, title: &str, duration: &str) -> Self {
        self.videos.push(VideoItem {
            id: video_id.to_string(),
            snippet: VideoSnippet {
                title: title.to_string(),
                published_at: Some("2024-05-01T12:00:00Z".to_string()),
                thumbnails: Thumbnails {
                    medium: Some(thumbnail(&format!("https://i.ytimg.example/{}/mq.jpg", video_id))),
                    ..Thumbnails::default()
                },
            },
            content_details: Some(ContentDetails {
                duration: duration.to_string(),
            }),
        });
        self
    }
}

fn thumbnail(url: &str) -> Thumbnail {
    Thumbnail {
        url: url.to_string(),
    }
}

fn upstream_failure(what: &str) -> AppError {
    AppError::ExternalService(anyhow::anyhow!("YouTube API error: 403 {} quota exceeded", what))
}

#[async_trait]
impl YoutubeApi for StubYoutube {
    async fn search_channels(&self, query: &str) -> Result<SearchListResponse, AppError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_search {
            return Err(upstream_failure("search"));
        }
        let items = self
            .handles
            .get(query)
            .map(|channel_id| SearchResult {
                id: SearchResultId {
                    video_id: None,
                    channel_id: Some(channel_id.clone()),
                },
                snippet: Some(SearchSnippet {
                    channel_id: Some(channel_id.clone()),
                }),
            })
            .into_iter()
            .collect();
        Ok(SearchListResponse {
            next_page_token: None,
            items,
        })
    }

    async fn channel_details(&self, channel_id: &str) -> Result<ChannelListResponse, AppError> {
        self.channel_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_channel_details {
            return Err(upstream_failure("channels"));
        }
        Ok(ChannelListResponse {
            items: self.channels.get(channel_id).cloned().into_iter().collect(),
        })
    }

    async fn search_channel_videos(
        &self,
        _channel_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<SearchListResponse, AppError> {
        let call = self.page_calls.fetch_add(1, Ordering::SeqCst);
        let index = page_token.map_or(0, |token| token.parse::<usize>().unwrap_or(0));

        let (ids, has_more): (Vec<Option<String>>, bool) = match &self.page_plan {
            PagePlan::Endless => {
                let ids = (0..page_size).map(|n| Some(format!("v{}_{}", call, n))).collect();
                (ids, true)
            }
            PagePlan::EndlessWithoutVideos => ((0..page_size).map(|_| None).collect(), true),
            PagePlan::EmptyWithToken => (Vec::new(), true),
            PagePlan::Pages(pages) => match pages.get(index) {
                Some(Some(ids)) => (
                    ids.iter().cloned().map(Some).collect(),
                    index + 1 < pages.len(),
                ),
                Some(None) => return Err(upstream_failure("search page")),
                None => (Vec::new(), false),
            },
        };

        Ok(SearchListResponse {
            next_page_token: has_more.then(|| (index + 1).to_string()),
            items: ids
                .into_iter()
                .map(|video_id| SearchResult {
                    id: SearchResultId {
                        video_id,
                        channel_id: None,
                    },
                    snippet: None,
                })
                .collect(),
        })
    }

    async fn video_details(&self, video_ids: &[String]) -> Result<VideoListResponse, AppError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_video_details {
            return Err(upstream_failure("videos"));
        }
        Ok(VideoListResponse {
            items: self
                .videos
                .iter()
                .filter(|video| video_ids.contains(&video.id))
                .cloned()
                .collect(),
        })
    }
}
