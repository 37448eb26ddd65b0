use crate::fetch::{FetchOptions, MAX_COMMENTS};
use crate::storage::{TokenSource, DEFAULT_UPLOAD_URL};
use crate::youtube::DEFAULT_API_URL;
use crate::JobSettings;
use clap::Parser;
use std::path::PathBuf;

/// Deploy-time settings, read once at startup from flags or the environment.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// YouTube Data API key
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Channel whose uploads are extracted
    #[arg(long, env = "YOUTUBE_CHANNEL_ID")]
    pub channel_id: String,

    /// Bucket receiving the job file
    #[arg(long, env = "GCS_BUCKET")]
    pub bucket: String,

    /// Search results requested per page
    #[arg(long, env = "PAGE_SIZE", default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub page_size: u32,

    /// Top-level comments kept per video
    #[arg(long, env = "MAX_COMMENTS", default_value_t = MAX_COMMENTS, value_parser = clap::value_parser!(u32).range(1..=5))]
    pub max_comments: u32,

    /// Look each category id up once instead of once per video
    #[arg(long, env = "CACHE_CATEGORIES")]
    pub cache_categories: bool,

    #[arg(long, env = "YOUTUBE_API_URL", default_value = DEFAULT_API_URL)]
    pub youtube_api_url: String,

    #[arg(long, env = "GCS_UPLOAD_URL", default_value = DEFAULT_UPLOAD_URL)]
    pub gcs_upload_url: String,

    /// Bearer token for Cloud Storage
    #[arg(long, env = "GCS_ACCESS_TOKEN", hide_env_values = true)]
    pub gcs_access_token: Option<String>,

    /// authorized_user credentials file used to mint a Cloud Storage token
    #[arg(long, env = "GCS_CREDENTIALS_FILE")]
    pub gcs_credentials_file: Option<PathBuf>,

    /// Write the job file under this directory instead of uploading it
    #[arg(long, env = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Use JSON formatting for tracing
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

impl Config {
    pub fn job_settings(&self) -> JobSettings {
        JobSettings {
            channel_id: self.channel_id.clone(),
            bucket: self.bucket.clone(),
            fetch: FetchOptions {
                page_size: self.page_size,
                max_comments: self.max_comments,
                cache_categories: self.cache_categories,
            },
        }
    }

    /// A static token wins over a credentials file; without either we ask the
    /// metadata server.
    pub fn token_source(&self) -> TokenSource {
        match (&self.gcs_access_token, &self.gcs_credentials_file) {
            (Some(token), _) => TokenSource::Static(token.clone()),
            (None, Some(path)) => TokenSource::AuthorizedUser(path.clone()),
            (None, None) => TokenSource::MetadataServer,
        }
    }
}
