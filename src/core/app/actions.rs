use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::mpsc;

use super::App;
use crate::core::timer::{TimerHandle, TimerId};
use crate::core::upload::{AvatarSource, UploadClient, UploadError};

#[derive(Debug)]
pub enum AppAction {
    InsertIntoInput {
        text: String,
    },
    InputBackspace,
    ClearInput,
    SubmitInput,
    ResetConversation,
    ToggleTemplates,
    CloseTemplates,
    MoveTemplateCursor {
        delta: isize,
    },
    ApplyTemplate {
        index: usize,
    },
    ToggleVoiceCapture,
    MockReplyElapsed {
        timer: TimerId,
    },
    VoiceCaptureElapsed {
        timer: TimerId,
    },
    OpenSettings,
    CloseSettings,
    SwitchSettingsTab,
    InsertIntoDraftName {
        text: String,
    },
    DraftNameBackspace,
    CommitName,
    OpenUploadPrompt,
    InsertIntoUploadPath {
        text: String,
    },
    UploadPathBackspace,
    CancelUploadPrompt,
    SubmitUploadPrompt,
    UploadAvatar {
        path: PathBuf,
    },
    AvatarUploadFinished {
        result: Result<String, UploadError>,
    },
    RemoveAvatar,
    MoveBackgroundCursor {
        delta: isize,
    },
    SelectBackground {
        url: String,
    },
    SelectBackgroundUnderCursor,
    ResetBackground,
    ScrollUp {
        lines: u16,
    },
    ScrollDown {
        lines: u16,
    },
    FollowLatest,
    DismissNotifications,
    Quit,
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppAction>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppAction>) -> Self {
        Self { tx }
    }

    pub fn dispatch(&self, action: AppAction) {
        let _ = self.tx.send(action);
    }

    pub fn dispatch_many<I>(&self, actions: I)
    where
        I: IntoIterator<Item = AppAction>,
    {
        for action in actions.into_iter() {
            self.dispatch(action);
        }
    }
}

/// Side effects requested by the core and carried out by the event loop.
#[derive(Debug)]
pub enum AppCommand {
    ScheduleReply {
        timer: TimerHandle,
        delay: Duration,
    },
    ScheduleVoiceCapture {
        timer: TimerHandle,
        delay: Duration,
    },
    UploadAvatar {
        client: UploadClient,
        source: AvatarSource,
    },
}

pub fn apply_actions(
    app: &mut App,
    actions: impl IntoIterator<Item = AppAction>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for action in actions {
        if let Some(cmd) = apply_action(app, action) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::InsertIntoInput { text } => {
            app.conversation().insert_text(&text);
            None
        }
        AppAction::InputBackspace => {
            app.conversation().backspace();
            None
        }
        AppAction::ClearInput => {
            app.conversation().clear_input();
            None
        }
        AppAction::SubmitInput => app.conversation().submit(),
        AppAction::ResetConversation => {
            app.conversation().reset_conversation();
            None
        }
        AppAction::ToggleTemplates => {
            app.conversation().toggle_templates();
            None
        }
        AppAction::CloseTemplates => {
            app.conversation().close_templates();
            None
        }
        AppAction::MoveTemplateCursor { delta } => {
            app.ui.move_template_cursor(delta);
            None
        }
        AppAction::ApplyTemplate { index } => {
            app.conversation().apply_template_at(index);
            None
        }
        AppAction::ToggleVoiceCapture => app.conversation().toggle_voice_capture(),
        AppAction::MockReplyElapsed { timer } => {
            app.conversation().complete_reply(timer);
            None
        }
        AppAction::VoiceCaptureElapsed { timer } => {
            app.conversation().complete_voice_capture(timer);
            None
        }
        AppAction::OpenSettings => {
            app.settings().open();
            None
        }
        AppAction::CloseSettings => {
            let templates_open = app.conversation.templates_open;
            app.settings().close(templates_open);
            None
        }
        AppAction::SwitchSettingsTab => {
            app.settings().switch_tab();
            None
        }
        AppAction::InsertIntoDraftName { text } => {
            app.settings().edit_draft_name(|name| name.push_str(&text));
            None
        }
        AppAction::DraftNameBackspace => {
            app.settings().edit_draft_name(|name| {
                name.pop();
            });
            None
        }
        AppAction::CommitName => {
            app.settings().commit_name();
            None
        }
        AppAction::OpenUploadPrompt => {
            if !app.settings.is_uploading {
                app.settings().open_upload_prompt();
            }
            None
        }
        AppAction::InsertIntoUploadPath { text } => {
            app.settings().edit_upload_path(|path| path.push_str(&text));
            None
        }
        AppAction::UploadPathBackspace => {
            app.settings().edit_upload_path(|path| {
                path.pop();
            });
            None
        }
        AppAction::CancelUploadPrompt => {
            app.settings().cancel_upload_prompt();
            None
        }
        AppAction::SubmitUploadPrompt => app.settings().submit_upload_prompt(),
        AppAction::UploadAvatar { path } => app.settings().begin_upload(path),
        AppAction::AvatarUploadFinished { result } => {
            app.settings().finish_upload(result);
            None
        }
        AppAction::RemoveAvatar => {
            app.settings().remove_avatar();
            None
        }
        AppAction::MoveBackgroundCursor { delta } => {
            app.settings().move_background_cursor(delta);
            None
        }
        AppAction::SelectBackground { url } => {
            app.settings().select_background(&url);
            None
        }
        AppAction::SelectBackgroundUnderCursor => {
            app.settings().select_background_under_cursor();
            None
        }
        AppAction::ResetBackground => {
            app.settings().reset_background();
            None
        }
        AppAction::ScrollUp { lines } => {
            app.ui.scroll_up(lines);
            None
        }
        AppAction::ScrollDown { lines } => {
            app.ui.scroll_down(lines);
            None
        }
        AppAction::FollowLatest => {
            app.ui.follow_latest();
            None
        }
        AppAction::DismissNotifications => {
            app.ui.notifications.dismiss();
            None
        }
        AppAction::Quit => {
            app.ui.exit_requested = true;
            None
        }
    }
}
