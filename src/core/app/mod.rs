use std::time::Duration;

use crate::core::config::Config;
use crate::core::timer::TimerRegistry;
use crate::core::upload::UploadClient;

pub mod actions;
pub mod conversation;
pub mod settings;
pub mod ui_state;

pub use actions::{apply_action, apply_actions, AppAction, AppActionDispatcher, AppCommand};
pub use conversation::{ConversationController, ConversationState, VoiceCapture};
pub use settings::{
    avatar_initial, Background, Profile, SettingsController, SettingsDialog, SettingsState,
    SettingsTab,
};
pub use ui_state::{UiMode, UiState};

/// Timing and policy knobs resolved from [`Config`] at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOptions {
    pub reply_delay: Duration,
    pub voice_delay: Duration,
    pub voice_cancel_on_toggle: bool,
    pub upload_endpoint: String,
}

impl AppOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            reply_delay: config.reply_delay(),
            voice_delay: config.voice_delay(),
            voice_cancel_on_toggle: config.voice_cancel_on_toggle(),
            upload_endpoint: config.upload_endpoint().to_string(),
        }
    }
}

impl Default for AppOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Everything the session owns. Only [`apply_action`] mutates it at runtime.
pub struct App {
    pub conversation: ConversationState,
    pub settings: SettingsState,
    pub ui: UiState,
    pub timers: TimerRegistry,
    pub options: AppOptions,
    pub upload_client: UploadClient,
}

impl App {
    pub fn new(config: &Config, client: reqwest::Client) -> Self {
        let options = AppOptions::from_config(config);
        let upload_client = UploadClient::new(client, options.upload_endpoint.clone());
        Self {
            conversation: ConversationState::new(),
            settings: SettingsState::new(config.user_name()),
            ui: UiState::new(),
            timers: TimerRegistry::new(),
            options,
            upload_client,
        }
    }

    pub fn conversation(&mut self) -> ConversationController<'_> {
        ConversationController::new(
            &mut self.conversation,
            &mut self.ui,
            &mut self.timers,
            &self.options,
        )
    }

    pub fn settings(&mut self) -> SettingsController<'_> {
        SettingsController::new(&mut self.settings, &mut self.ui, &self.upload_client)
    }

    pub fn is_settings_open(&self) -> bool {
        self.settings.dialog.is_some()
    }
}

#[cfg(test)]
mod tests;
