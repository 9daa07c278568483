use std::error::Error;

use tracing::info;

use super::AppHandle;
use crate::core::{app::App, config::Config};

/// Build the session state for the chat loop from the startup config.
pub fn bootstrap_app(config: &Config) -> Result<AppHandle, Box<dyn Error>> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("monky-chat/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let app = App::new(config, client);
    info!(
        user = %app.settings.profile.name,
        endpoint = %app.options.upload_endpoint,
        reply_delay_ms = app.options.reply_delay.as_millis() as u64,
        voice_delay_ms = app.options.voice_delay.as_millis() as u64,
        voice_cancel_on_toggle = app.options.voice_cancel_on_toggle,
        "Session started"
    );
    Ok(AppHandle::new(app))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bootstrap_applies_config_values() {
        let config = Config {
            user_name: Some("Ada".to_string()),
            reply_delay_ms: Some(250),
            ..Default::default()
        };
        let app = bootstrap_app(&config).expect("bootstrap");
        let (name, delay) = app
            .read(|app| (app.settings.profile.name.clone(), app.options.reply_delay))
            .await;
        assert_eq!(name, "Ada");
        assert_eq!(delay.as_millis(), 250);
    }
}
