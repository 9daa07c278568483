//! Mode-aware mapping from key events to [`AppAction`]s.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::app::{App, AppAction, SettingsTab, UiMode};
use crate::utils::text::sanitize_single_line;

const PAGE_LINES: u16 = 10;

/// Result of resolving a key event.
#[derive(Debug)]
pub enum KeyResult {
    /// Dispatch these actions and keep running.
    Actions(Vec<AppAction>),
    /// Leave the loop.
    Exit,
    /// Key was not handled in the current mode.
    NotHandled,
}

impl From<AppAction> for KeyResult {
    fn from(action: AppAction) -> Self {
        KeyResult::Actions(vec![action])
    }
}

/// Pattern for matching key events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPattern {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyPattern {
    pub const fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code && self.modifiers == key.modifiers
    }
}

const QUIT: KeyPattern = KeyPattern::ctrl(KeyCode::Char('c'));
const TEMPLATES: KeyPattern = KeyPattern::ctrl(KeyCode::Char('t'));
const VOICE: KeyPattern = KeyPattern::ctrl(KeyCode::Char('r'));
const NEW_CHAT: KeyPattern = KeyPattern::ctrl(KeyCode::Char('n'));
const SETTINGS: KeyPattern = KeyPattern::ctrl(KeyCode::Char('s'));
const UPLOAD: KeyPattern = KeyPattern::ctrl(KeyCode::Char('u'));
const REMOVE: KeyPattern = KeyPattern::ctrl(KeyCode::Char('d'));

/// Plain character input, with or without Shift.
fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
        {
            Some(c)
        }
        _ => None,
    }
}

pub fn resolve_key(app: &App, key: &KeyEvent) -> KeyResult {
    if QUIT.matches(key) {
        return KeyResult::Exit;
    }

    match app.ui.mode {
        UiMode::Settings => resolve_settings_key(app, key),
        UiMode::Templates => match resolve_template_key(app, key) {
            KeyResult::NotHandled => resolve_chat_key(key),
            handled => handled,
        },
        UiMode::Chat => resolve_chat_key(key),
    }
}

fn resolve_chat_key(key: &KeyEvent) -> KeyResult {
    if TEMPLATES.matches(key) {
        return AppAction::ToggleTemplates.into();
    }
    if VOICE.matches(key) {
        return AppAction::ToggleVoiceCapture.into();
    }
    if NEW_CHAT.matches(key) {
        return AppAction::ResetConversation.into();
    }
    if SETTINGS.matches(key) {
        return AppAction::OpenSettings.into();
    }

    if let Some(c) = typed_char(key) {
        return AppAction::InsertIntoInput {
            text: c.to_string(),
        }
        .into();
    }

    match key.code {
        KeyCode::Enter => AppAction::SubmitInput.into(),
        KeyCode::Backspace => AppAction::InputBackspace.into(),
        KeyCode::Up => AppAction::ScrollUp { lines: 1 }.into(),
        KeyCode::Down => AppAction::ScrollDown { lines: 1 }.into(),
        KeyCode::PageUp => AppAction::ScrollUp { lines: PAGE_LINES }.into(),
        KeyCode::PageDown => AppAction::ScrollDown { lines: PAGE_LINES }.into(),
        KeyCode::End => AppAction::FollowLatest.into(),
        KeyCode::Esc => AppAction::DismissNotifications.into(),
        _ => KeyResult::NotHandled,
    }
}

fn resolve_template_key(app: &App, key: &KeyEvent) -> KeyResult {
    if TEMPLATES.matches(key) {
        return AppAction::ToggleTemplates.into();
    }

    match key.code {
        KeyCode::Esc => AppAction::CloseTemplates.into(),
        KeyCode::Up => AppAction::MoveTemplateCursor { delta: -1 }.into(),
        KeyCode::Down => AppAction::MoveTemplateCursor { delta: 1 }.into(),
        // Enter picks a template only into an empty composer; typed text is sent
        KeyCode::Enter if app.conversation.input.trim().is_empty() => {
            AppAction::ApplyTemplate {
                index: app.ui.template_cursor,
            }
            .into()
        }
        _ => KeyResult::NotHandled,
    }
}

fn resolve_settings_key(app: &App, key: &KeyEvent) -> KeyResult {
    let Some(dialog) = app.settings.dialog.as_ref() else {
        return KeyResult::NotHandled;
    };

    if dialog.upload_path.is_some() {
        return resolve_upload_prompt_key(key);
    }

    if key.code == KeyCode::Esc {
        return AppAction::CloseSettings.into();
    }
    if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
        return AppAction::SwitchSettingsTab.into();
    }

    match dialog.tab {
        SettingsTab::Profile => {
            if UPLOAD.matches(key) {
                return AppAction::OpenUploadPrompt.into();
            }
            if REMOVE.matches(key) {
                return AppAction::RemoveAvatar.into();
            }
            if let Some(c) = typed_char(key) {
                return AppAction::InsertIntoDraftName {
                    text: c.to_string(),
                }
                .into();
            }
            match key.code {
                KeyCode::Backspace => AppAction::DraftNameBackspace.into(),
                KeyCode::Enter => AppAction::CommitName.into(),
                _ => KeyResult::NotHandled,
            }
        }
        SettingsTab::Appearance => {
            if REMOVE.matches(key) {
                return AppAction::ResetBackground.into();
            }
            match key.code {
                KeyCode::Up => AppAction::MoveBackgroundCursor { delta: -1 }.into(),
                KeyCode::Down => AppAction::MoveBackgroundCursor { delta: 1 }.into(),
                KeyCode::Enter => AppAction::SelectBackgroundUnderCursor.into(),
                _ => KeyResult::NotHandled,
            }
        }
    }
}

fn resolve_upload_prompt_key(key: &KeyEvent) -> KeyResult {
    if let Some(c) = typed_char(key) {
        return AppAction::InsertIntoUploadPath {
            text: c.to_string(),
        }
        .into();
    }
    match key.code {
        KeyCode::Esc => AppAction::CancelUploadPrompt.into(),
        KeyCode::Backspace => AppAction::UploadPathBackspace.into(),
        KeyCode::Enter => AppAction::SubmitUploadPrompt.into(),
        _ => KeyResult::NotHandled,
    }
}

/// Route bracketed-paste text to whichever field has focus.
pub fn resolve_paste(app: &App, text: &str) -> Option<AppAction> {
    let text = sanitize_single_line(text);
    if text.is_empty() {
        return None;
    }

    match app.ui.mode {
        UiMode::Chat | UiMode::Templates => Some(AppAction::InsertIntoInput { text }),
        UiMode::Settings => {
            let dialog = app.settings.dialog.as_ref()?;
            if dialog.upload_path.is_some() {
                Some(AppAction::InsertIntoUploadPath { text })
            } else if dialog.tab == SettingsTab::Profile {
                Some(AppAction::InsertIntoDraftName { text })
            } else {
                None
            }
        }
    }
}
