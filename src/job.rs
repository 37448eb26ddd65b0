use crate::error::Result;
use crate::storage::ObjectStore;
use crate::video::VideoRecord;
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, instrument};
use uuid::Uuid;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Namespaces one run's output: `<YYYYMMDDHHmm>-<uuid v4>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobId(String);

impl JobId {
    pub fn generate() -> JobId {
        JobId::started_at(&Local::now())
    }

    pub fn started_at<Tz: TimeZone>(time: &DateTime<Tz>) -> JobId
    where
        Tz::Offset: fmt::Display,
    {
        JobId(format!("{}-{}", time.format("%Y%m%d%H%M"), Uuid::new_v4()))
    }

    pub fn blob_name(&self) -> String {
        format!("jobs/youtube_api/{}/youtube_api.json", self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returned to the caller once the job file is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputManifest {
    pub filepath: String,
    pub jobid: String,
    pub bucket_id: String,
    pub blob_name: String,
}

/// One JSON object per line, each line newline-terminated.
pub fn to_ndjson(records: &[VideoRecord]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    for record in records {
        serde_json::to_writer(&mut buffer, record)?;
        buffer.push(b'\n');
    }
    Ok(buffer)
}

#[instrument(skip(store, records), fields(count = records.len()))]
pub fn write_job(
    store: &dyn ObjectStore,
    bucket: &str,
    job: &JobId,
    records: &[VideoRecord],
) -> Result<OutputManifest> {
    let blob_name = job.blob_name();
    let buffer = to_ndjson(records)?;
    info!(bytes = buffer.len(), "uploading");
    store.upload(bucket, &blob_name, JSON_CONTENT_TYPE, buffer)?;

    Ok(OutputManifest {
        filepath: store.uri(bucket, &blob_name),
        jobid: job.to_string(),
        bucket_id: bucket.to_string(),
        blob_name,
    })
}
