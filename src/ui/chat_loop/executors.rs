//! Background tasks started for [`AppCommand`]s.
//!
//! Each task reports back only by dispatching a completion action, so all
//! state changes still flow through `apply_action`.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::core::app::{AppAction, AppActionDispatcher, AppCommand};
use crate::core::timer::TimerHandle;
use crate::core::upload::{AvatarSource, UploadClient};

pub fn execute_command(dispatcher: AppActionDispatcher, command: AppCommand) -> JoinHandle<()> {
    match command {
        AppCommand::ScheduleReply { timer, delay } => spawn_reply_timer(dispatcher, timer, delay),
        AppCommand::ScheduleVoiceCapture { timer, delay } => {
            spawn_voice_timer(dispatcher, timer, delay)
        }
        AppCommand::UploadAvatar { client, source } => {
            spawn_avatar_upload(dispatcher, client, source)
        }
    }
}

pub fn spawn_reply_timer(
    dispatcher: AppActionDispatcher,
    timer: TimerHandle,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if timer.sleep(delay).await {
            dispatcher.dispatch(AppAction::MockReplyElapsed { timer: timer.id() });
        }
    })
}

pub fn spawn_voice_timer(
    dispatcher: AppActionDispatcher,
    timer: TimerHandle,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if timer.sleep(delay).await {
            dispatcher.dispatch(AppAction::VoiceCaptureElapsed { timer: timer.id() });
        } else {
            debug!(timer = %timer.id(), "Voice capture timer cancelled");
        }
    })
}

pub fn spawn_avatar_upload(
    dispatcher: AppActionDispatcher,
    client: UploadClient,
    source: AvatarSource,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = client.upload(&source).await;
        dispatcher.dispatch(AppAction::AvatarUploadFinished { result });
    })
}
