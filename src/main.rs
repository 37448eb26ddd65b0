use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use youtube_channel_extract::{Config, GcsStore, LocalStore, ObjectStore, YouTubeClient};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() {
    dotenv::dotenv().ok();
    let config = Config::parse();
    init_tracing(config.log_json);

    if let Err(err) = extract(&config) {
        error!("extraction failed: {:#}", err);
        std::process::exit(1);
    }
}

fn extract(config: &Config) -> Result<()> {
    let api = YouTubeClient::new(&config.youtube_api_url, &config.api_key);
    let store: Box<dyn ObjectStore> = match &config.output_dir {
        Some(dir) => Box::new(LocalStore::new(dir)),
        None => Box::new(
            GcsStore::new(&config.gcs_upload_url, &config.token_source())
                .context("connecting to Cloud Storage")?,
        ),
    };

    let manifest = youtube_channel_extract::run(&api, store.as_ref(), &config.job_settings())
        .with_context(|| format!("extracting channel {}", config.channel_id))?;

    info!(jobid = %manifest.jobid, "job written");
    println!("{}", serde_json::to_string_pretty(&manifest)?);
    Ok(())
}
