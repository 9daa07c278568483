use super::*;
use crate::core::catalog::{BACKGROUNDS, TEMPLATES};
use crate::core::constants::{
    PLACEHOLDER_REPLY, RECOGNIZED_SPEECH, RESET_GREETING, WELCOME_GREETING,
};
use crate::core::message::Sender;
use crate::core::notification::Notification;
use crate::core::upload::UploadError;
use crate::utils::test_utils::{
    create_test_app, create_test_app_with, non_cancelling_voice_config,
};
use reqwest::StatusCode;
use std::path::PathBuf;
use std::time::Duration;

fn type_into_composer(app: &mut App, text: &str) {
    apply_action(
        app,
        AppAction::InsertIntoInput {
            text: text.to_string(),
        },
    );
}

fn reply_timer(command: Option<AppCommand>) -> (crate::core::timer::TimerId, Duration) {
    match command {
        Some(AppCommand::ScheduleReply { timer, delay }) => (timer.id(), delay),
        other => panic!("expected a scheduled reply, got {other:?}"),
    }
}

fn voice_timer(command: Option<AppCommand>) -> crate::core::timer::TimerHandle {
    match command {
        Some(AppCommand::ScheduleVoiceCapture { timer, delay }) => {
            assert_eq!(delay, Duration::from_millis(2000));
            timer
        }
        other => panic!("expected a scheduled voice capture, got {other:?}"),
    }
}

#[test]
fn session_starts_with_a_single_greeting() {
    let app = create_test_app();
    assert_eq!(app.conversation.messages.len(), 1);
    assert_eq!(app.conversation.messages[0].sender, Sender::Ai);
    assert_eq!(app.conversation.messages[0].content, WELCOME_GREETING);
    assert_eq!(app.conversation.chats.len(), 3);
}

#[test]
fn submit_appends_user_message_and_clears_input_synchronously() {
    let mut app = create_test_app();
    type_into_composer(&mut app, "  Tell me a joke ");

    let command = apply_action(&mut app, AppAction::SubmitInput);

    let messages = &app.conversation.messages;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].sender, Sender::User);
    assert_eq!(messages[1].content, "  Tell me a joke ");
    assert!(app.conversation.input.is_empty());
    assert_eq!(app.conversation.pending_replies, 1);

    let (_, delay) = reply_timer(command);
    assert_eq!(delay, Duration::from_millis(1000));
}

#[test]
fn blank_submissions_are_no_ops() {
    let mut app = create_test_app();

    for blank in ["", "   ", "\t\n"] {
        apply_action(&mut app, AppAction::ClearInput);
        type_into_composer(&mut app, blank);
        let command = apply_action(&mut app, AppAction::SubmitInput);

        assert!(command.is_none());
        assert_eq!(app.conversation.messages.len(), 1);
        assert_eq!(app.conversation.input, blank);
        assert!(!app.conversation.can_send());
    }
}

#[test]
fn each_elapsed_reply_appends_one_placeholder() {
    let mut app = create_test_app();
    type_into_composer(&mut app, "first");
    let (first, _) = reply_timer(apply_action(&mut app, AppAction::SubmitInput));
    type_into_composer(&mut app, "second");
    let (second, _) = reply_timer(apply_action(&mut app, AppAction::SubmitInput));

    apply_action(&mut app, AppAction::MockReplyElapsed { timer: first });
    apply_action(&mut app, AppAction::MockReplyElapsed { timer: second });

    let senders: Vec<Sender> = app.conversation.messages.iter().map(|m| m.sender).collect();
    assert_eq!(
        senders,
        vec![Sender::Ai, Sender::User, Sender::User, Sender::Ai, Sender::Ai]
    );
    assert!(app.conversation.messages[3..]
        .iter()
        .all(|m| m.content == PLACEHOLDER_REPLY));
    assert_eq!(app.conversation.pending_replies, 0);

    let ids: Vec<_> = app.conversation.messages.iter().map(|m| m.id.clone()).collect();
    assert!(ids.windows(2).all(|w| w[0] != w[1]));
}

#[test]
fn reset_always_leaves_one_ai_greeting() {
    let mut app = create_test_app();
    type_into_composer(&mut app, "hello");
    apply_action(&mut app, AppAction::SubmitInput);
    let old_greeting_id = app.conversation.messages[0].id.clone();

    apply_action(&mut app, AppAction::ResetConversation);

    assert_eq!(app.conversation.messages.len(), 1);
    let greeting = &app.conversation.messages[0];
    assert_eq!(greeting.sender, Sender::Ai);
    assert_eq!(greeting.content, RESET_GREETING);
    assert_ne!(greeting.id, old_greeting_id);

    apply_action(&mut app, AppAction::ResetConversation);
    assert_eq!(app.conversation.messages.len(), 1);
}

#[test]
fn applying_a_template_fills_the_composer_without_sending() {
    let mut app = create_test_app();
    apply_action(&mut app, AppAction::ToggleTemplates);
    assert!(app.conversation.templates_open);
    assert_eq!(app.ui.mode, UiMode::Templates);

    type_into_composer(&mut app, "draft that gets replaced");
    apply_action(&mut app, AppAction::ApplyTemplate { index: 2 });

    assert_eq!(app.conversation.input, TEMPLATES[2].prompt);
    assert_eq!(app.conversation.messages.len(), 1);
    assert!(!app.conversation.templates_open);
    assert_eq!(app.ui.mode, UiMode::Chat);
}

#[test]
fn voice_capture_fills_the_composer_after_the_delay() {
    let mut app = create_test_app();
    let timer = voice_timer(apply_action(&mut app, AppAction::ToggleVoiceCapture));
    assert!(app.conversation.is_recording());

    apply_action(&mut app, AppAction::VoiceCaptureElapsed { timer: timer.id() });

    assert!(!app.conversation.is_recording());
    assert_eq!(app.conversation.input, RECOGNIZED_SPEECH);
}

#[test]
fn manual_stop_aborts_the_pending_capture() {
    let mut app = create_test_app();
    let timer = voice_timer(apply_action(&mut app, AppAction::ToggleVoiceCapture));
    type_into_composer(&mut app, "typed by hand");

    assert!(apply_action(&mut app, AppAction::ToggleVoiceCapture).is_none());
    assert!(!app.conversation.is_recording());
    assert!(timer.is_cancelled());

    // A completion that raced the cancel is ignored.
    apply_action(&mut app, AppAction::VoiceCaptureElapsed { timer: timer.id() });
    assert_eq!(app.conversation.input, "typed by hand");
    assert!(!app.conversation.is_recording());
}

/// Known defect kept behind `voice_cancel_on_toggle = false`: stopping by hand
/// does not abort the capture, which later overwrites the composer.
#[test]
fn non_cancelling_voice_capture_still_overwrites_after_manual_stop() {
    let mut app = create_test_app_with(&non_cancelling_voice_config());
    let timer = voice_timer(apply_action(&mut app, AppAction::ToggleVoiceCapture));
    assert!(app.conversation.is_recording());

    apply_action(&mut app, AppAction::ToggleVoiceCapture);
    assert!(!app.conversation.is_recording());
    assert!(!timer.is_cancelled());
    type_into_composer(&mut app, "typed by hand");

    apply_action(&mut app, AppAction::VoiceCaptureElapsed { timer: timer.id() });
    assert!(!app.conversation.is_recording());
    assert_eq!(app.conversation.input, RECOGNIZED_SPEECH);
}

#[test]
fn name_edits_stay_in_the_draft_until_committed() {
    let mut app = create_test_app();
    apply_action(&mut app, AppAction::OpenSettings);
    assert_eq!(app.ui.mode, UiMode::Settings);
    let dialog = app.settings.dialog.as_ref().expect("dialog open");
    assert_eq!(dialog.temp_name, app.settings.profile.name);

    apply_action(&mut app, AppAction::DraftNameBackspace);
    apply_action(
        &mut app,
        AppAction::InsertIntoDraftName {
            text: "rrr".to_string(),
        },
    );
    assert_eq!(app.settings.profile.name, "User");
    assert!(app.ui.notifications.history().is_empty());

    apply_action(&mut app, AppAction::CommitName);
    assert_eq!(app.settings.profile.name, "Userrr");
    assert_eq!(app.ui.notifications.last(), Some(&Notification::name_saved()));

    apply_action(&mut app, AppAction::InsertIntoDraftName { text: "!".into() });
    apply_action(&mut app, AppAction::CloseSettings);
    assert!(app.settings.dialog.is_none());
    assert_eq!(app.settings.profile.name, "Userrr");
    assert_eq!(app.ui.mode, UiMode::Chat);
}

#[test]
fn non_image_upload_is_rejected_without_io() {
    let mut app = create_test_app();
    let command = apply_action(
        &mut app,
        AppAction::UploadAvatar {
            path: PathBuf::from("/tmp/resume.pdf"),
        },
    );

    assert!(command.is_none());
    assert!(!app.settings.is_uploading);
    assert!(app.settings.profile.avatar_url.is_empty());
    let notification = app.ui.notifications.last().expect("notification emitted");
    assert_eq!(notification, &Notification::invalid_image());
    assert!(notification.is_destructive());
}

#[test]
fn upload_guard_blocks_reentry_and_clears_on_failure() {
    let mut app = create_test_app();
    app.settings.profile.avatar_url = "https://cdn.example.test/old.png".to_string();

    let command = apply_action(
        &mut app,
        AppAction::UploadAvatar {
            path: PathBuf::from("/tmp/avatar.png"),
        },
    );
    match command {
        Some(AppCommand::UploadAvatar { source, client }) => {
            assert_eq!(source.media_type, "image/png");
            assert_eq!(client.endpoint(), app.options.upload_endpoint);
        }
        other => panic!("expected upload command, got {other:?}"),
    }
    assert!(app.settings.is_uploading);

    let second = apply_action(
        &mut app,
        AppAction::UploadAvatar {
            path: PathBuf::from("/tmp/other.jpg"),
        },
    );
    assert!(second.is_none());
    assert!(app.ui.notifications.history().is_empty());

    apply_action(
        &mut app,
        AppAction::AvatarUploadFinished {
            result: Err(UploadError::Status(StatusCode::BAD_GATEWAY)),
        },
    );

    assert!(!app.settings.is_uploading);
    assert_eq!(
        app.settings.profile.avatar_url,
        "https://cdn.example.test/old.png"
    );
    assert_eq!(
        app.ui.notifications.last(),
        Some(&Notification::avatar_upload_failed())
    );
}

#[test]
fn successful_upload_commits_the_returned_url() {
    let mut app = create_test_app();
    apply_action(
        &mut app,
        AppAction::UploadAvatar {
            path: PathBuf::from("/tmp/avatar.webp"),
        },
    );

    apply_action(
        &mut app,
        AppAction::AvatarUploadFinished {
            result: Ok("https://cdn.example.test/new.png".to_string()),
        },
    );

    assert!(!app.settings.is_uploading);
    assert_eq!(
        app.settings.profile.avatar_url,
        "https://cdn.example.test/new.png"
    );
    assert_eq!(
        app.ui.notifications.last(),
        Some(&Notification::avatar_updated())
    );
}

#[test]
fn upload_prompt_submits_the_typed_path() {
    let mut app = create_test_app();
    apply_action(&mut app, AppAction::OpenSettings);
    apply_action(&mut app, AppAction::OpenUploadPrompt);
    apply_action(
        &mut app,
        AppAction::InsertIntoUploadPath {
            text: " ~/me.gif ".to_string(),
        },
    );

    let command = apply_action(&mut app, AppAction::SubmitUploadPrompt);
    match command {
        Some(AppCommand::UploadAvatar { source, .. }) => {
            assert_eq!(source.path.file_name().and_then(|n| n.to_str()), Some("me.gif"));
            if let Some(dirs) = directories::UserDirs::new() {
                assert_eq!(source.path, dirs.home_dir().join("me.gif"));
            }
        }
        _ => panic!("expected an upload command"),
    }
    let dialog = app.settings.dialog.as_ref().expect("dialog open");
    assert!(dialog.upload_path.is_none());

    // The prompt cannot be reopened while the upload runs.
    apply_action(&mut app, AppAction::OpenUploadPrompt);
    let dialog = app.settings.dialog.as_ref().expect("dialog open");
    assert!(dialog.upload_path.is_none());
}

#[test]
fn removing_the_avatar_falls_back_to_the_initial() {
    let mut app = create_test_app();
    app.settings.profile.avatar_url = "https://cdn.example.test/a.png".to_string();
    app.settings.profile.name = "ada".to_string();

    apply_action(&mut app, AppAction::RemoveAvatar);

    assert!(!app.settings.profile.has_avatar());
    assert_eq!(app.settings.profile.avatar_fallback(), "A");
    assert!(app.ui.notifications.history().is_empty());
    assert_eq!(avatar_initial(""), "");
}

#[test]
fn background_selection_names_the_catalog_entry() {
    let mut app = create_test_app();
    let forest = BACKGROUNDS[3];

    apply_action(
        &mut app,
        AppAction::SelectBackground {
            url: forest.url.to_string(),
        },
    );
    assert_eq!(app.settings.background.active_url, forest.url);
    assert_eq!(
        app.ui.notifications.last(),
        Some(&Notification::background_changed("Forest"))
    );

    apply_action(&mut app, AppAction::ResetBackground);
    assert!(app.settings.background.is_default());
    assert_eq!(
        app.ui.notifications.last(),
        Some(&Notification::background_reset())
    );
}

#[test]
fn background_cursor_wraps_and_selects() {
    let mut app = create_test_app();
    apply_action(&mut app, AppAction::OpenSettings);
    apply_action(&mut app, AppAction::SwitchSettingsTab);
    apply_action(&mut app, AppAction::MoveBackgroundCursor { delta: -1 });
    apply_action(&mut app, AppAction::SelectBackgroundUnderCursor);

    let gradient = BACKGROUNDS[5];
    assert_eq!(app.settings.background.active_url, gradient.url);
    assert_eq!(
        app.ui.notifications.last(),
        Some(&Notification::background_changed("Gradient"))
    );

    // Reopening puts the cursor on the active entry.
    apply_action(&mut app, AppAction::CloseSettings);
    apply_action(&mut app, AppAction::OpenSettings);
    let dialog = app.settings.dialog.as_ref().expect("dialog open");
    assert_eq!(dialog.background_cursor, 5);
    assert_eq!(dialog.tab, SettingsTab::Profile);
}
