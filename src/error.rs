use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned {status}: {body}")]
    Api {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("no video resource returned for {0}")]
    VideoNotFound(String),

    #[error("category {0} not found")]
    CategoryNotFound(String),

    #[error("video {video_id} is missing {field}")]
    MissingField {
        video_id: String,
        field: &'static str,
    },

    #[error("video {video_id} has a non-numeric {field}: {value:?}")]
    InvalidCount {
        video_id: String,
        field: &'static str,
        value: String,
    },

    #[error("upload of {bucket}/{blob} failed with {status}: {body}")]
    Upload {
        bucket: String,
        blob: String,
        status: StatusCode,
        body: String,
    },

    #[error("could not obtain a storage access token: {0}")]
    Auth(String),

    #[error("could not encode query: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
