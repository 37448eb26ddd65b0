//! Extracts a YouTube channel's uploads, with statistics, category names and
//! top comments, into a newline-delimited JSON file in object storage.

pub mod config;
pub mod error;
pub mod fetch;
pub mod job;
pub mod shape;
pub mod storage;
pub mod video;
pub mod youtube;

pub use config::Config;
pub use error::{Error, Result};
pub use fetch::{ChannelFetcher, FetchOptions};
pub use job::{JobId, OutputManifest};
pub use storage::{GcsStore, LocalStore, ObjectStore, TokenSource};
pub use video::VideoRecord;
pub use youtube::{VideoApi, YouTubeClient};

use tracing::{info, instrument};

/// Everything a single extraction needs besides its two collaborators.
#[derive(Debug, Clone)]
pub struct JobSettings {
    pub channel_id: String,
    pub bucket: String,
    pub fetch: FetchOptions,
}

/// Fetches the whole channel, then uploads it as one job file.
///
/// Nothing is written unless every page and every video was fetched.
#[instrument(skip_all, fields(channel_id = %settings.channel_id))]
pub fn run(
    api: &impl VideoApi,
    store: &dyn ObjectStore,
    settings: &JobSettings,
) -> Result<OutputManifest> {
    info!("fetching");
    let records = ChannelFetcher::new(api, settings.fetch.clone()).fetch_channel(&settings.channel_id)?;

    let job = JobId::generate();
    info!(%job, videos = records.len(), "shaping");
    let manifest = job::write_job(store, &settings.bucket, &job, &records)?;

    info!(filepath = %manifest.filepath, "done");
    Ok(manifest)
}
