use crate::error::{Error, Result};
use crate::shape::{clean_description, extract_title, parse_duration};
use crate::video::{VideoRecord, UNKNOWN_CATEGORY};
use crate::youtube::VideoApi;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// The comments endpoint is never asked for more than this many threads.
pub const MAX_COMMENTS: u32 = 5;

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub page_size: u32,
    pub max_comments: u32,
    pub cache_categories: bool,
}

impl Default for FetchOptions {
    fn default() -> FetchOptions {
        FetchOptions {
            page_size: 50,
            max_comments: MAX_COMMENTS,
            cache_categories: false,
        }
    }
}

/// Walks a channel's search pages and joins every video with its details,
/// category name and top comments.
pub struct ChannelFetcher<'a, A> {
    api: &'a A,
    options: FetchOptions,
    categories: HashMap<String, String>,
}

impl<'a, A: VideoApi> ChannelFetcher<'a, A> {
    pub fn new(api: &'a A, options: FetchOptions) -> ChannelFetcher<'a, A> {
        ChannelFetcher {
            api,
            options,
            categories: HashMap::new(),
        }
    }

    /// Records in search order, newest first, across every page.
    #[instrument(skip(self))]
    pub fn fetch_channel(&mut self, channel_id: &str) -> Result<Vec<VideoRecord>> {
        let mut records = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0;

        loop {
            let page = self
                .api
                .search_page(channel_id, self.options.page_size, page_token.as_deref())?;
            pages += 1;
            debug!(page = pages, items = page.items.len(), "search page received");

            for item in page.items {
                match item.id.video_id {
                    Some(video_id) if !video_id.is_empty() => {
                        records.push(self.build_record(video_id)?);
                    }
                    _ => debug!("search item without a video id skipped"),
                }
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        info!(pages, videos = records.len(), "channel fetched");
        Ok(records)
    }

    fn build_record(&mut self, video_id: String) -> Result<VideoRecord> {
        let video = self.api.video(&video_id)?;
        let snippet = video.snippet;
        let stats = video.statistics;

        let missing = |field| Error::MissingField {
            video_id: video_id.clone(),
            field,
        };
        let title = snippet.title.ok_or_else(|| missing("snippet.title"))?;
        let description = snippet
            .description
            .ok_or_else(|| missing("snippet.description"))?;
        let duration = video
            .content_details
            .duration
            .ok_or_else(|| missing("contentDetails.duration"))?;

        let views = display_count(&video_id, "viewCount", stats.view_count);
        let likes = display_count(&video_id, "likeCount", stats.like_count);
        let favorites = display_count(&video_id, "favoriteCount", stats.favorite_count);
        let comments_count = parse_count(&video_id, "commentCount", stats.comment_count)?;

        let category = self.resolve_category(snippet.category_id.as_deref());

        let comments = if comments_count.unwrap_or(0) > 0 {
            let limit = self.options.max_comments.min(MAX_COMMENTS);
            let mut comments = self.api.top_comments(&video_id, limit)?;
            comments.truncate(limit as usize);
            comments
        } else {
            Vec::new()
        };

        debug!(%video_id, comments = comments.len(), "video assembled");
        Ok(VideoRecord {
            extracted_title: extract_title(&title).to_string(),
            description: clean_description(&description).to_string(),
            title,
            category,
            published_at: snippet.published_at,
            views,
            likes,
            favorites,
            comments_count,
            comments,
            thumbnail_url: snippet.thumbnails.default.url,
            duration: parse_duration(&duration),
            video_id,
        })
    }

    /// Never fails: any lookup problem becomes the sentinel category.
    fn resolve_category(&mut self, category_id: Option<&str>) -> String {
        let Some(category_id) = category_id else {
            warn!("video has no category id");
            return UNKNOWN_CATEGORY.to_string();
        };
        if let Some(name) = self.categories.get(category_id) {
            return name.clone();
        }

        match self.api.category_title(category_id) {
            Ok(name) => {
                if self.options.cache_categories {
                    self.categories
                        .insert(category_id.to_string(), name.clone());
                }
                name
            }
            Err(err) => {
                warn!(category_id, error = %err, "error fetching category");
                UNKNOWN_CATEGORY.to_string()
            }
        }
    }
}

/// Statistics are decimal strings; hidden or empty ones stay absent.
fn parse_count(video_id: &str, field: &'static str, value: Option<String>) -> Result<Option<u64>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(count) => count.parse().map(Some).map_err(|_| Error::InvalidCount {
            video_id: video_id.to_string(),
            field,
            value: count.to_string(),
        }),
    }
}

/// Counts that are only copied to the output; an unreadable one is logged and left null.
fn display_count(video_id: &str, field: &'static str, value: Option<String>) -> Option<u64> {
    parse_count(video_id, field, value).unwrap_or_else(|err| {
        warn!(video_id, error = %err, "ignoring unreadable count");
        None
    })
}
