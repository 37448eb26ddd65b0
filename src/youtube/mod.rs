mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use types::{
    SearchListResponse, SearchResult, Statistics, VideoResource, VideoSnippet,
};

use crate::error::{Error, Result};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use types::{CategoryListResponse, CommentThreadListResponse, VideoListResponse};

pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// The four YouTube Data API reads the extractor is built on.
pub trait VideoApi {
    /// One page of a channel's uploads, newest first.
    fn search_page(
        &self,
        channel_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<SearchListResponse>;

    /// Statistics, snippet and content details of a single video.
    fn video(&self, video_id: &str) -> Result<VideoResource>;

    fn category_title(&self, category_id: &str) -> Result<String>;

    /// Display text of the top-level comments, in response order.
    fn top_comments(&self, video_id: &str, max_results: u32) -> Result<Vec<String>>;
}

/// Blocking client authenticated with a static API key.
pub struct YouTubeClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> YouTubeClient {
        YouTubeClient {
            client: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn request(&self, endpoint: &str, query: &[(&str, &str)]) -> RequestBuilder {
        self.client
            .get(&format!("{}/{}", self.api_url, endpoint))
            .query(query)
            .query(&[("key", self.api_key.as_str())])
    }

    fn search_request(
        &self,
        channel_id: &str,
        page_size: &str,
        page_token: Option<&str>,
    ) -> RequestBuilder {
        let request = self.request(
            "search",
            &[
                ("part", "snippet"),
                ("channelId", channel_id),
                ("maxResults", page_size),
                ("order", "date"),
            ],
        );
        match page_token {
            Some(token) => request.query(&[("pageToken", token)]),
            None => request,
        }
    }

    fn video_request(&self, video_id: &str) -> RequestBuilder {
        self.request(
            "videos",
            &[("part", "statistics,snippet,contentDetails"), ("id", video_id)],
        )
    }

    fn category_request(&self, category_id: &str) -> RequestBuilder {
        self.request("videoCategories", &[("part", "snippet"), ("id", category_id)])
    }

    fn comments_request(&self, video_id: &str, max_results: &str) -> RequestBuilder {
        self.request(
            "commentThreads",
            &[
                ("part", "snippet"),
                ("videoId", video_id),
                ("maxResults", max_results),
            ],
        )
    }

    fn fetch<T: DeserializeOwned>(&self, endpoint: &'static str, request: RequestBuilder) -> Result<T> {
        let res = request.send()?;
        let status = res.status();
        if !status.is_success() {
            return Err(Error::Api {
                endpoint,
                status,
                body: res.text().unwrap_or_default(),
            });
        }
        Ok(res.json()?)
    }
}

impl VideoApi for YouTubeClient {
    fn search_page(
        &self,
        channel_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<SearchListResponse> {
        debug!(channel_id, ?page_token, "requesting search page");
        let page_size = page_size.to_string();
        self.fetch("search", self.search_request(channel_id, &page_size, page_token))
    }

    fn video(&self, video_id: &str) -> Result<VideoResource> {
        let list: VideoListResponse = self.fetch("videos", self.video_request(video_id))?;
        list.items
            .into_iter()
            .next()
            .ok_or_else(|| Error::VideoNotFound(video_id.to_string()))
    }

    fn category_title(&self, category_id: &str) -> Result<String> {
        let list: CategoryListResponse =
            self.fetch("videoCategories", self.category_request(category_id))?;
        list.items
            .into_iter()
            .next()
            .map(|category| category.snippet.title)
            .ok_or_else(|| Error::CategoryNotFound(category_id.to_string()))
    }

    fn top_comments(&self, video_id: &str, max_results: u32) -> Result<Vec<String>> {
        let max_results = max_results.to_string();
        let threads: CommentThreadListResponse =
            self.fetch("commentThreads", self.comments_request(video_id, &max_results))?;
        Ok(threads
            .items
            .into_iter()
            .map(|thread| thread.snippet.top_level_comment.snippet.text_display)
            .collect())
    }
}
