use crate::error::{Error, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const STORAGE_SCOPE: &str = "https://www.googleapis.com/auth/devstorage.read_write";

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Where the bearer token for Cloud Storage comes from.
#[derive(Debug, Clone)]
pub enum TokenSource {
    /// A token minted elsewhere, e.g. `gcloud auth print-access-token`.
    Static(String),
    /// An `authorized_user` credentials file holding a refresh token.
    AuthorizedUser(PathBuf),
    /// The metadata server of the Google Cloud runtime we are deployed on.
    MetadataServer,
}

impl TokenSource {
    pub fn access_token(&self, client: &Client) -> Result<String> {
        match self {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::AuthorizedUser(path) => {
                let user = read_authorized_user(path)?;
                get_auth_token_from_refresh(client, &user)
            }
            TokenSource::MetadataServer => get_auth_token_from_metadata(client),
        }
    }
}

/// What `gcloud auth application-default login` leaves on disk.
#[derive(Deserialize, Debug)]
struct AuthorizedUser {
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

#[derive(Deserialize, Debug)]
struct AuthInfo {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

fn read_authorized_user(path: &Path) -> Result<AuthorizedUser> {
    let file = fs::File::open(path)
        .map_err(|err| Error::Auth(format!("cannot open {}: {}", path.display(), err)))?;
    serde_json::from_reader(file).map_err(|err| {
        Error::Auth(format!(
            "{} is not an authorized_user credentials file: {}",
            path.display(),
            err
        ))
    })
}

fn get_auth_token_from_refresh(client: &Client, user: &AuthorizedUser) -> Result<String> {
    let res = client
        .post(TOKEN_URL)
        .form(&[
            ("client_id", user.client_id.as_str()),
            ("client_secret", user.client_secret.as_str()),
            ("refresh_token", user.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
            ("scope", STORAGE_SCOPE),
        ])
        .send()?;
    read_token(res, "refresh token exchange")
}

fn get_auth_token_from_metadata(client: &Client) -> Result<String> {
    let res = client
        .get(METADATA_TOKEN_URL)
        .header("Metadata-Flavor", "Google")
        .send()
        .map_err(|err| Error::Auth(format!("metadata server unreachable: {}", err)))?;
    read_token(res, "metadata server")
}

fn read_token(res: reqwest::blocking::Response, source: &str) -> Result<String> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().unwrap_or_default();
        return Err(Error::Auth(format!("{} returned {}: {}", source, status, body)));
    }

    let auth: AuthInfo = res.json()?;
    debug!(source, expires_in = auth.expires_in, "storage access token acquired");
    Ok(auth.access_token)
}
