use crate::shape::VideoDuration;
use serde::Serialize;

pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// One output line. Field order is the column order of the written file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub extracted_title: String,
    /// The description with channel boilerplate removed.
    pub description: String,
    pub category: String,
    pub published_at: Option<String>,
    pub views: Option<u64>,
    pub likes: Option<u64>,
    pub favorites: Option<u64>,
    pub comments_count: Option<u64>,
    pub comments: Vec<String>,
    pub thumbnail_url: String,
    #[serde(flatten)]
    pub duration: VideoDuration,
}
