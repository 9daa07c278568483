//! Avatar upload pipeline: validate → read → encode → POST.

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Errors from the avatar upload flow.
#[derive(Debug)]
pub enum AvatarError {
    /// The file does not declare an `image/*` media type. Raised before any I/O.
    Validation { media_type: String },

    /// Reading, sending or decoding failed after validation passed.
    Upload(UploadError),
}

impl fmt::Display for AvatarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvatarError::Validation { media_type } => {
                write!(f, "Expected an image file, got {media_type}")
            }
            AvatarError::Upload(err) => write!(f, "Avatar upload failed: {err}"),
        }
    }
}

impl StdError for AvatarError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            AvatarError::Validation { .. } => None,
            AvatarError::Upload(err) => Some(err),
        }
    }
}

impl From<UploadError> for AvatarError {
    fn from(err: UploadError) -> Self {
        AvatarError::Upload(err)
    }
}

#[derive(Debug)]
pub enum UploadError {
    /// The selected file could not be read.
    Read { path: PathBuf, source: io::Error },

    /// The request never produced a response.
    Transport(reqwest::Error),

    /// The endpoint answered with a non-success status. The body is not inspected.
    Status(StatusCode),

    /// The success body was not `{ "url": string }`.
    Decode(reqwest::Error),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Read { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            UploadError::Transport(err) => write!(f, "Request failed: {err}"),
            UploadError::Status(status) => write!(f, "Upload endpoint returned {status}"),
            UploadError::Decode(err) => write!(f, "Unexpected upload response: {err}"),
        }
    }
}

impl StdError for UploadError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            UploadError::Read { source, .. } => Some(source),
            UploadError::Transport(err) | UploadError::Decode(err) => Some(err),
            UploadError::Status(_) => None,
        }
    }
}

/// A file that passed media type validation and may be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarSource {
    pub path: PathBuf,
    pub media_type: String,
}

/// Media type the file declares through its name.
pub fn declared_media_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path {
        "~" => "",
        _ => match path.strip_prefix("~/") {
            Some(rest) => rest,
            None => return PathBuf::from(path),
        },
    };
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(rest))
        .unwrap_or_else(|| PathBuf::from(path))
}

impl AvatarSource {
    pub fn validate(path: impl Into<PathBuf>) -> Result<Self, AvatarError> {
        let path = path.into();
        let media_type = declared_media_type(&path);
        if !media_type.starts_with("image/") {
            return Err(AvatarError::Validation { media_type });
        }
        Ok(Self { path, media_type })
    }
}

pub fn encode_data_url(media_type: &str, bytes: &[u8]) -> String {
    let encoded = base64::prelude::BASE64_STANDARD.encode(bytes);
    format!("data:{media_type};base64,{encoded}")
}

#[derive(Serialize)]
struct UploadRequest<'a> {
    image: &'a str,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

#[derive(Debug, Clone)]
pub struct UploadClient {
    client: reqwest::Client,
    endpoint: String,
}

impl UploadClient {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post a data URL and return the hosted image URL.
    pub async fn send(&self, data_url: &str) -> Result<String, UploadError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&UploadRequest { image: data_url })
            .send()
            .await
            .map_err(UploadError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Status(status));
        }

        let body: UploadResponse = response.json().await.map_err(UploadError::Decode)?;
        Ok(body.url)
    }

    /// Run the whole pipeline for an already validated file.
    pub async fn upload(&self, source: &AvatarSource) -> Result<String, UploadError> {
        let bytes = tokio::fs::read(&source.path)
            .await
            .map_err(|err| UploadError::Read {
                path: source.path.clone(),
                source: err,
            })?;
        debug!(
            path = %source.path.display(),
            media_type = %source.media_type,
            size = bytes.len(),
            "Encoding avatar"
        );

        let data_url = encode_data_url(&source.media_type, &bytes);
        let url = self.send(&data_url).await?;
        info!(endpoint = %self.endpoint, "Avatar uploaded");
        Ok(url)
    }
}
