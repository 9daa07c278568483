use std::error::Error;
use std::path::PathBuf;

use crate::core::config::Config;
use crate::core::upload::{AvatarError, AvatarSource, UploadClient};

/// Run the avatar pipeline once outside the UI and return the hosted URL.
pub async fn upload_avatar(config: &Config, file: PathBuf) -> Result<String, Box<dyn Error>> {
    let source = AvatarSource::validate(file)?;
    let client = UploadClient::new(reqwest::Client::new(), config.upload_endpoint());
    let url = client.upload(&source).await.map_err(AvatarError::from)?;
    Ok(url)
}
