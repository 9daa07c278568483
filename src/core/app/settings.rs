use std::path::PathBuf;

use tracing::{debug, info, warn};

use super::actions::AppCommand;
use super::{UiMode, UiState};
use crate::core::catalog::{find_background, BACKGROUNDS};
use crate::core::notification::Notification;
use crate::core::upload::{expand_home, AvatarSource, UploadClient, UploadError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    /// Empty means "show the initial-letter fallback".
    pub avatar_url: String,
    pub name: String,
}

impl Profile {
    pub fn has_avatar(&self) -> bool {
        !self.avatar_url.is_empty()
    }

    pub fn avatar_fallback(&self) -> String {
        avatar_initial(&self.name)
    }
}

/// Upper-cased first character of `name`, or nothing for an empty name.
pub fn avatar_initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Background {
    /// Catalog URL or gradient literal; empty means the default background.
    pub active_url: String,
}

impl Background {
    pub fn is_default(&self) -> bool {
        self.active_url.is_empty()
    }

    pub fn display_name(&self) -> String {
        if self.is_default() {
            return "Default".to_string();
        }
        find_background(&self.active_url)
            .map(|option| option.name.to_string())
            .unwrap_or_else(|| self.active_url.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsTab {
    #[default]
    Profile,
    Appearance,
}

impl SettingsTab {
    pub fn toggle(self) -> Self {
        match self {
            SettingsTab::Profile => SettingsTab::Appearance,
            SettingsTab::Appearance => SettingsTab::Profile,
        }
    }
}

/// State that only exists while the settings overlay is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDialog {
    pub tab: SettingsTab,
    /// Draft of the name; only `commit_name` pushes it to the profile.
    pub temp_name: String,
    pub background_cursor: usize,
    /// Path being typed for an avatar upload, when the prompt is open.
    pub upload_path: Option<String>,
}

#[derive(Debug, Default)]
pub struct SettingsState {
    pub profile: Profile,
    pub background: Background,
    pub dialog: Option<SettingsDialog>,
    /// Single-flight guard for avatar uploads. Outlives the dialog.
    pub is_uploading: bool,
}

impl SettingsState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            profile: Profile {
                avatar_url: String::new(),
                name: name.into(),
            },
            ..Default::default()
        }
    }
}

pub struct SettingsController<'a> {
    state: &'a mut SettingsState,
    ui: &'a mut UiState,
    upload_client: &'a UploadClient,
}

impl<'a> SettingsController<'a> {
    pub fn new(
        state: &'a mut SettingsState,
        ui: &'a mut UiState,
        upload_client: &'a UploadClient,
    ) -> Self {
        Self {
            state,
            ui,
            upload_client,
        }
    }

    pub fn open(&mut self) {
        let background_cursor = BACKGROUNDS
            .iter()
            .position(|option| option.url == self.state.background.active_url)
            .unwrap_or(0);
        self.state.dialog = Some(SettingsDialog {
            tab: SettingsTab::Profile,
            temp_name: self.state.profile.name.clone(),
            background_cursor,
            upload_path: None,
        });
        self.ui.mode = UiMode::Settings;
    }

    /// Close the overlay, discarding an uncommitted draft.
    pub fn close(&mut self, templates_open: bool) {
        self.state.dialog = None;
        self.ui.mode = if templates_open {
            UiMode::Templates
        } else {
            UiMode::Chat
        };
    }

    pub fn switch_tab(&mut self) {
        if let Some(dialog) = self.state.dialog.as_mut() {
            dialog.tab = dialog.tab.toggle();
            dialog.upload_path = None;
        }
    }

    pub fn edit_draft_name(&mut self, edit: impl FnOnce(&mut String)) {
        if let Some(dialog) = self.state.dialog.as_mut() {
            edit(&mut dialog.temp_name);
        }
    }

    pub fn commit_name(&mut self) {
        let Some(dialog) = self.state.dialog.as_ref() else {
            return;
        };
        self.state.profile.name = dialog.temp_name.clone();
        info!(name = %self.state.profile.name, "Profile name saved");
        self.ui.notifications.push(Notification::name_saved());
    }

    pub fn open_upload_prompt(&mut self) {
        if let Some(dialog) = self.state.dialog.as_mut() {
            dialog.upload_path = Some(String::new());
        }
    }

    pub fn cancel_upload_prompt(&mut self) {
        if let Some(dialog) = self.state.dialog.as_mut() {
            dialog.upload_path = None;
        }
    }

    pub fn edit_upload_path(&mut self, edit: impl FnOnce(&mut String)) {
        if let Some(path) = self
            .state
            .dialog
            .as_mut()
            .and_then(|dialog| dialog.upload_path.as_mut())
        {
            edit(path);
        }
    }

    /// Submit the path typed into the upload prompt.
    pub fn submit_upload_prompt(&mut self) -> Option<AppCommand> {
        let path = self
            .state
            .dialog
            .as_mut()
            .and_then(|dialog| dialog.upload_path.take())?;
        let path = path.trim();
        if path.is_empty() {
            return None;
        }
        self.begin_upload(expand_home(path))
    }

    /// Validate the file and, if nothing else is in flight, start the upload.
    ///
    /// A rejected media type never sets the guard. An attempt made while an
    /// upload is running is dropped, not queued.
    pub fn begin_upload(&mut self, path: PathBuf) -> Option<AppCommand> {
        if self.state.is_uploading {
            debug!(path = %path.display(), "Upload already in flight; ignoring");
            return None;
        }

        match AvatarSource::validate(path) {
            Ok(source) => {
                self.state.is_uploading = true;
                info!(
                    path = %source.path.display(),
                    media_type = %source.media_type,
                    "Uploading avatar"
                );
                Some(AppCommand::UploadAvatar {
                    client: self.upload_client.clone(),
                    source,
                })
            }
            Err(err) => {
                warn!(error = %err, "Rejected avatar file");
                self.ui.notifications.push(Notification::invalid_image());
                None
            }
        }
    }

    /// Completion of the upload pipeline. Clears the guard on every path.
    pub fn finish_upload(&mut self, result: Result<String, UploadError>) {
        self.state.is_uploading = false;
        match result {
            Ok(url) => {
                self.state.profile.avatar_url = url;
                self.ui.notifications.push(Notification::avatar_updated());
            }
            Err(err) => {
                warn!(error = %err, "Avatar upload failed");
                self.ui
                    .notifications
                    .push(Notification::avatar_upload_failed());
            }
        }
    }

    pub fn remove_avatar(&mut self) {
        self.state.profile.avatar_url.clear();
        debug!("Avatar removed");
    }

    pub fn select_background(&mut self, url: &str) {
        self.state.background.active_url = url.to_string();
        let name = self.state.background.display_name();
        info!(background = %name, "Background changed");
        self.ui
            .notifications
            .push(Notification::background_changed(name));
    }

    pub fn select_background_at(&mut self, index: usize) {
        if let Some(option) = BACKGROUNDS.get(index) {
            self.select_background(option.url);
        }
    }

    pub fn select_background_under_cursor(&mut self) {
        if let Some(index) = self.state.dialog.as_ref().map(|d| d.background_cursor) {
            self.select_background_at(index);
        }
    }

    pub fn move_background_cursor(&mut self, delta: isize) {
        if let Some(dialog) = self.state.dialog.as_mut() {
            let len = BACKGROUNDS.len() as isize;
            dialog.background_cursor =
                (dialog.background_cursor as isize + delta).rem_euclid(len) as usize;
        }
    }

    pub fn reset_background(&mut self) {
        self.state.background.active_url.clear();
        info!("Background reset");
        self.ui.notifications.push(Notification::background_reset());
    }
}
