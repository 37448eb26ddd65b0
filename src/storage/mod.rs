mod auth;

pub use auth::{TokenSource, STORAGE_SCOPE};

use crate::error::{Error, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_UPLOAD_URL: &str = "https://storage.googleapis.com/upload/storage/v1";

/// Somewhere a finished job file can be put.
pub trait ObjectStore {
    fn upload(&self, bucket: &str, blob: &str, content_type: &str, data: Vec<u8>) -> Result<()>;

    /// How the stored blob is addressed in the job manifest.
    fn uri(&self, bucket: &str, blob: &str) -> String;
}

/// Google Cloud Storage through the JSON API's single-request media upload.
pub struct GcsStore {
    client: Client,
    upload_url: String,
    auth_token: String,
}

impl GcsStore {
    pub fn new(upload_url: impl Into<String>, token_source: &TokenSource) -> Result<GcsStore> {
        let client = Client::new();
        let auth_token = token_source.access_token(&client)?;

        Ok(GcsStore {
            client,
            upload_url: upload_url.into().trim_end_matches('/').to_string(),
            auth_token,
        })
    }

    fn upload_request(
        &self,
        bucket: &str,
        blob: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<RequestBuilder> {
        let url = format!(
            "{}/b/{}/o?{}",
            self.upload_url,
            bucket,
            serde_urlencoded::to_string(&[("uploadType", "media"), ("name", blob)])?
        );

        Ok(self
            .client
            .post(&url)
            .bearer_auth(&self.auth_token)
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, data.len())
            .body(data))
    }
}

impl ObjectStore for GcsStore {
    fn upload(&self, bucket: &str, blob: &str, content_type: &str, data: Vec<u8>) -> Result<()> {
        let size = data.len();
        let res = self.upload_request(bucket, blob, content_type, data)?.send()?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::Upload {
                bucket: bucket.to_string(),
                blob: blob.to_string(),
                status,
                body: res.text().unwrap_or_default(),
            });
        }

        info!(bucket, blob, size, "upload successful");
        Ok(())
    }

    fn uri(&self, bucket: &str, blob: &str) -> String {
        format!("gs://{}/{}", bucket, blob)
    }
}

/// Writes `<root>/<bucket>/<blob>` on the local filesystem.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> LocalStore {
        LocalStore { root: root.into() }
    }

    fn path(&self, bucket: &str, blob: &str) -> PathBuf {
        self.root.join(bucket).join(blob)
    }
}

impl ObjectStore for LocalStore {
    fn upload(&self, bucket: &str, blob: &str, _content_type: &str, data: Vec<u8>) -> Result<()> {
        let path = self.path(bucket, blob);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &data)?;

        info!(path = %path.display(), size = data.len(), "job file written");
        Ok(())
    }

    fn uri(&self, bucket: &str, blob: &str) -> String {
        self.path(bucket, blob).display().to_string()
    }
}
