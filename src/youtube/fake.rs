//! In-memory `VideoApi` that serves canned resources and records every call.

use super::types::{ContentDetails, ResourceId, Thumbnail, Thumbnails};
use super::{SearchListResponse, SearchResult, Statistics, VideoApi, VideoResource, VideoSnippet};
use crate::error::{Error, Result};
use reqwest::StatusCode;
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search(Option<String>),
    Video(String),
    Category(String),
    Comments(String, u32),
}

#[derive(Default)]
pub struct FakeApi {
    /// Pages keyed by the token that requests them; `None` is the first page.
    pages: HashMap<Option<String>, (Vec<Option<String>>, Option<String>)>,
    videos: HashMap<String, FakeVideo>,
    categories: HashMap<String, String>,
    comments: HashMap<String, Vec<String>>,
    pub calls: RefCell<Vec<Call>>,
}

pub struct FakeVideo {
    pub title: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub category_id: Option<&'static str>,
    pub statistics: Statistics,
}

impl FakeVideo {
    pub fn new(title: &'static str) -> FakeVideo {
        FakeVideo {
            title,
            description: "About this video.",
            duration: "PT1M",
            category_id: Some("24"),
            statistics: Statistics::default(),
        }
    }

    pub fn comment_count(mut self, count: &str) -> FakeVideo {
        self.statistics.comment_count = Some(count.to_string());
        self
    }
}

impl FakeApi {
    pub fn page(
        mut self,
        token: Option<&str>,
        ids: &[Option<&str>],
        next: Option<&str>,
    ) -> FakeApi {
        let ids = ids.iter().map(|id| id.map(str::to_string)).collect();
        self.pages
            .insert(token.map(str::to_string), (ids, next.map(str::to_string)));
        self
    }

    pub fn video(mut self, id: &str, video: FakeVideo) -> FakeApi {
        self.videos.insert(id.to_string(), video);
        self
    }

    pub fn category(mut self, id: &str, title: &str) -> FakeApi {
        self.categories.insert(id.to_string(), title.to_string());
        self
    }

    pub fn comments(mut self, video_id: &str, texts: &[&str]) -> FakeApi {
        self.comments.insert(
            video_id.to_string(),
            texts.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

fn not_found(endpoint: &'static str) -> Error {
    Error::Api {
        endpoint,
        status: StatusCode::NOT_FOUND,
        body: String::new(),
    }
}

impl VideoApi for FakeApi {
    fn search_page(
        &self,
        _channel_id: &str,
        _page_size: u32,
        page_token: Option<&str>,
    ) -> Result<SearchListResponse> {
        let token = page_token.map(str::to_string);
        self.record(Call::Search(token.clone()));
        let (ids, next) = self.pages.get(&token).ok_or_else(|| not_found("search"))?;
        Ok(SearchListResponse {
            items: ids
                .iter()
                .map(|id| SearchResult {
                    id: ResourceId {
                        video_id: id.clone(),
                    },
                })
                .collect(),
            next_page_token: next.clone(),
        })
    }

    fn video(&self, video_id: &str) -> Result<VideoResource> {
        self.record(Call::Video(video_id.to_string()));
        let video = self
            .videos
            .get(video_id)
            .ok_or_else(|| Error::VideoNotFound(video_id.to_string()))?;
        Ok(VideoResource {
            statistics: Statistics {
                view_count: video.statistics.view_count.clone(),
                like_count: video.statistics.like_count.clone(),
                favorite_count: video.statistics.favorite_count.clone(),
                comment_count: video.statistics.comment_count.clone(),
            },
            snippet: VideoSnippet {
                title: Some(video.title.to_string()),
                description: Some(video.description.to_string()),
                published_at: Some("2024-10-01T12:00:00Z".to_string()),
                category_id: video.category_id.map(str::to_string),
                thumbnails: Thumbnails {
                    default: Thumbnail {
                        url: format!("https://i.ytimg.com/vi/{video_id}/default.jpg"),
                    },
                },
            },
            content_details: ContentDetails {
                duration: Some(video.duration.to_string()),
            },
        })
    }

    fn category_title(&self, category_id: &str) -> Result<String> {
        self.record(Call::Category(category_id.to_string()));
        self.categories
            .get(category_id)
            .cloned()
            .ok_or_else(|| not_found("videoCategories"))
    }

    fn top_comments(&self, video_id: &str, max_results: u32) -> Result<Vec<String>> {
        self.record(Call::Comments(video_id.to_string(), max_results));
        Ok(self.comments.get(video_id).cloned().unwrap_or_default())
    }
}
