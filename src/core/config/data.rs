use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::core::constants::{
    DEFAULT_REPLY_DELAY, DEFAULT_UPLOAD_ENDPOINT, DEFAULT_USER_NAME, DEFAULT_VOICE_DELAY,
};

/// Startup configuration. Nothing a user changes during a session is
/// written back here.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Display name the profile starts with
    pub user_name: Option<String>,
    /// Endpoint that accepts `{"image": <data url>}` and answers `{"url": ...}`
    pub upload_endpoint: Option<String>,
    /// Delay before the mocked assistant reply, in milliseconds
    pub reply_delay_ms: Option<u64>,
    /// Length of a simulated voice capture, in milliseconds
    pub voice_delay_ms: Option<u64>,
    /// Abort the pending voice capture when recording is toggled off by hand.
    /// When false, the capture still completes and overwrites the input.
    pub voice_cancel_on_toggle: Option<bool>,
}

/// Keys accepted by `monky-chat set` / `monky-chat unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    UserName,
    UploadEndpoint,
    ReplyDelayMs,
    VoiceDelayMs,
    VoiceCancelOnToggle,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::UserName,
        ConfigKey::UploadEndpoint,
        ConfigKey::ReplyDelayMs,
        ConfigKey::VoiceDelayMs,
        ConfigKey::VoiceCancelOnToggle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::UserName => "user-name",
            ConfigKey::UploadEndpoint => "upload-endpoint",
            ConfigKey::ReplyDelayMs => "reply-delay-ms",
            ConfigKey::VoiceDelayMs => "voice-delay-ms",
            ConfigKey::VoiceCancelOnToggle => "voice-cancel-on-toggle",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let known: Vec<&str> = ConfigKey::ALL.iter().map(|k| k.as_str()).collect();
                format!("Unknown config key: {s} (expected one of: {})", known.join(", "))
            })
    }
}

pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

impl Config {
    pub fn user_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or(DEFAULT_USER_NAME)
    }

    pub fn upload_endpoint(&self) -> &str {
        self.upload_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_UPLOAD_ENDPOINT)
    }

    pub fn reply_delay(&self) -> Duration {
        self.reply_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REPLY_DELAY)
    }

    pub fn voice_delay(&self) -> Duration {
        self.voice_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_VOICE_DELAY)
    }

    pub fn voice_cancel_on_toggle(&self) -> bool {
        self.voice_cancel_on_toggle.unwrap_or(true)
    }

    pub fn set_value(&mut self, key: ConfigKey, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("A value is required for {key}"));
        }

        match key {
            ConfigKey::UserName => self.user_name = Some(value.to_string()),
            ConfigKey::UploadEndpoint => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(format!("{key} must be an http(s) URL"));
                }
                self.upload_endpoint = Some(value.to_string());
            }
            ConfigKey::ReplyDelayMs => self.reply_delay_ms = Some(parse_millis(key, value)?),
            ConfigKey::VoiceDelayMs => self.voice_delay_ms = Some(parse_millis(key, value)?),
            ConfigKey::VoiceCancelOnToggle => {
                let parsed = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    _ => return Err(format!("{key} expects true or false")),
                };
                self.voice_cancel_on_toggle = Some(parsed);
            }
        }
        Ok(())
    }

    pub fn unset_value(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::UserName => self.user_name = None,
            ConfigKey::UploadEndpoint => self.upload_endpoint = None,
            ConfigKey::ReplyDelayMs => self.reply_delay_ms = None,
            ConfigKey::VoiceDelayMs => self.voice_delay_ms = None,
            ConfigKey::VoiceCancelOnToggle => self.voice_cancel_on_toggle = None,
        }
    }
}

fn parse_millis(key: ConfigKey, value: &str) -> Result<u64, String> {
    value
        .parse::<u64>()
        .map_err(|_| format!("{key} expects a number of milliseconds"))
}
