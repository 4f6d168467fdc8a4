use tracing::{debug, error, info};

use crate::youtube::YoutubeApi;

/// Results requested per search page.
pub const PAGE_SIZE: u32 = 25;

/// Walks a channel's date-ordered video search until `cap` search hits have
/// been seen, the listing ends, or a page fails.
///
/// Every hit counts toward `cap`, including ones without a video id, and the
/// check happens after each full page, so the walk may overshoot by up to one
/// page. An empty page ends the listing even if it carries a token, and the
/// walk never issues more than `max_pages(cap)` requests. A failing page ends
/// the walk with whatever was collected. Ids repeated across pages are kept.
#[tracing::instrument(name = "Discover channel videos", skip(youtube))]
pub async fn discover_video_ids(youtube: &dyn YoutubeApi, channel_id: &str, cap: usize) -> Vec<String> {
    let mut video_ids = Vec::new();
    let mut next_page_token: Option<String> = None;
    let mut hits_seen = 0;
    let mut page_count = 0;
    let page_limit = max_pages(cap);

    while page_count < page_limit {
        page_count += 1;
        debug!("Fetching page {} of videos for channel {}", page_count, channel_id);

        let page = match youtube
            .search_channel_videos(channel_id, next_page_token.as_deref(), PAGE_SIZE)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                error!(
                    "Failed to fetch videos page {} for channel {}: {:?}",
                    page_count, channel_id, e
                );
                break;
            }
        };

        debug!("Found {} videos in this batch", page.items.len());
        if page.items.is_empty() {
            debug!("Empty page, treating as end of listing");
            break;
        }

        hits_seen += page.items.len();
        video_ids.extend(page.items.into_iter().filter_map(|item| item.id.video_id));

        if hits_seen >= cap {
            debug!("Reached video cap of {}", cap);
            break;
        }

        match page.next_page_token {
            Some(token) if !token.is_empty() => next_page_token = Some(token),
            _ => break,
        }
    }

    info!(
        "Total videos found for channel {}: {} across {} pages",
        channel_id,
        video_ids.len(),
        page_count
    );
    video_ids
}

/// Upper bound on search requests for one walk: enough full pages to reach
/// `cap`, plus one.
pub fn max_pages(cap: usize) -> usize {
    cap.div_ceil(PAGE_SIZE as usize) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::testing::{PagePlan, StubYoutube};
    use std::sync::atomic::Ordering;

    fn ids(prefix: &str, count: usize) -> Vec<String> {
        (0..count).map(|n| format!("{}{}", prefix, n)).collect()
    }

    #[tokio::test]
    async fn stops_at_the_first_page_boundary_past_the_cap() {
        let stub = StubYoutube::default().with_pages(PagePlan::Endless);
        let found = discover_video_ids(&stub, "UCabc", 50).await;
        assert_eq!(found.len(), 50);
        assert_eq!(stub.page_calls.load(Ordering::SeqCst), 2);

        let stub = StubYoutube::default().with_pages(PagePlan::Endless);
        let found = discover_video_ids(&stub, "UCabc", 60).await;
        assert_eq!(found.len(), 75);
        assert_eq!(stub.page_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn stops_when_the_listing_ends() {
        let stub = StubYoutube::default()
            .with_pages(PagePlan::Pages(vec![Some(ids("a", 25)), Some(ids("b", 3))]));

        let found = discover_video_ids(&stub, "UCabc", 50).await;

        assert_eq!(found.len(), 28);
        assert_eq!(found.last().map(String::as_str), Some("b2"));
        assert_eq!(stub.page_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_page_keeps_earlier_results() {
        let stub = StubYoutube::default().with_pages(PagePlan::Pages(vec![
            Some(ids("a", 25)),
            None,
            Some(ids("c", 25)),
        ]));

        let found = discover_video_ids(&stub, "UCabc", 100).await;

        assert_eq!(found, ids("a", 25));
        assert_eq!(stub.page_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failing_first_page_yields_nothing() {
        let stub = StubYoutube::default().with_pages(PagePlan::Pages(vec![None]));
        assert!(discover_video_ids(&stub, "UCabc", 50).await.is_empty());
    }

    #[tokio::test]
    async fn duplicates_across_pages_are_kept() {
        let stub = StubYoutube::default().with_pages(PagePlan::Pages(vec![
            Some(vec!["x".to_string(), "y".to_string()]),
            Some(vec!["y".to_string(), "z".to_string()]),
        ]));

        let found = discover_video_ids(&stub, "UCabc", 50).await;
        assert_eq!(found, vec!["x", "y", "y", "z"]);
    }

    #[tokio::test]
    async fn hits_without_video_ids_still_count_toward_the_cap() {
        let stub = StubYoutube::default().with_pages(PagePlan::EndlessWithoutVideos);

        let found = tokio::time::timeout(
            std::time::Duration::from_secs(2),
            discover_video_ids(&stub, "UCabc", 50),
        )
        .await
        .expect("discovery should finish");

        assert!(found.is_empty());
        assert_eq!(stub.page_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_page_with_a_token_ends_the_listing() {
        let stub = StubYoutube::default().with_pages(PagePlan::EmptyWithToken);

        let found = tokio::time::timeout(
            std::time::Duration::from_secs(2),
            discover_video_ids(&stub, "UCabc", 50),
        )
        .await
        .expect("discovery should finish");

        assert!(found.is_empty());
        assert_eq!(stub.page_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn page_limit_covers_the_cap_plus_one_page() {
        assert_eq!(max_pages(50), 3);
        assert_eq!(max_pages(60), 4);
        assert_eq!(max_pages(1), 2);
    }
}
