use chrono::Local;
use tracing::debug;

use super::actions::AppCommand;
use super::{AppOptions, UiMode, UiState};
use crate::core::catalog::{seed_chats, Chat, TEMPLATES};
use crate::core::constants::{
    PLACEHOLDER_REPLY, RECOGNIZED_SPEECH, RESET_GREETING, WELCOME_GREETING,
};
use crate::core::message::{Message, MessageFactory};
use crate::core::timer::{TimerHandle, TimerId, TimerRegistry};

/// Simulated speech capture.
#[derive(Debug, Clone, Default)]
pub enum VoiceCapture {
    #[default]
    Idle,
    Recording {
        timer: TimerHandle,
    },
}

impl VoiceCapture {
    pub fn is_recording(&self) -> bool {
        matches!(self, VoiceCapture::Recording { .. })
    }
}

/// The chat list, the live thread and the composer.
#[derive(Debug)]
pub struct ConversationState {
    pub chats: Vec<Chat>,
    pub messages: Vec<Message>,
    pub input: String,
    pub templates_open: bool,
    pub voice: VoiceCapture,
    pub pending_replies: usize,
    factory: MessageFactory,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationState {
    pub fn new() -> Self {
        let mut factory = MessageFactory::new();
        let greeting = factory.ai(WELCOME_GREETING);
        Self {
            chats: seed_chats(Local::now()),
            messages: vec![greeting],
            input: String::new(),
            templates_open: false,
            voice: VoiceCapture::Idle,
            pending_replies: 0,
            factory,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.voice.is_recording()
    }

    /// Whether the send control is enabled.
    pub fn can_send(&self) -> bool {
        !self.input.trim().is_empty()
    }
}

pub struct ConversationController<'a> {
    state: &'a mut ConversationState,
    ui: &'a mut UiState,
    timers: &'a mut TimerRegistry,
    options: &'a AppOptions,
}

impl<'a> ConversationController<'a> {
    pub fn new(
        state: &'a mut ConversationState,
        ui: &'a mut UiState,
        timers: &'a mut TimerRegistry,
        options: &'a AppOptions,
    ) -> Self {
        Self {
            state,
            ui,
            timers,
            options,
        }
    }

    /// Append the user's message right away and schedule the mocked reply.
    ///
    /// Blank input is ignored and leaves the buffer as it was.
    pub fn submit(&mut self) -> Option<AppCommand> {
        if !self.state.can_send() {
            return None;
        }

        let content = std::mem::take(&mut self.state.input);
        let message = self.state.factory.user(content);
        debug!(id = %message.id, "User message appended");
        self.state.messages.push(message);
        self.state.pending_replies += 1;
        self.ui.follow_latest();

        Some(AppCommand::ScheduleReply {
            timer: self.timers.arm(),
            delay: self.options.reply_delay,
        })
    }

    /// Reply timers are independent; each one appends its own placeholder.
    pub fn complete_reply(&mut self, timer: TimerId) {
        let message = self.state.factory.ai(PLACEHOLDER_REPLY);
        debug!(%timer, id = %message.id, "Mock reply appended");
        self.state.messages.push(message);
        self.state.pending_replies = self.state.pending_replies.saturating_sub(1);
    }

    /// Start a fresh thread holding only a greeting.
    pub fn reset_conversation(&mut self) {
        let greeting = self.state.factory.ai(RESET_GREETING);
        self.state.messages = vec![greeting];
        self.ui.follow_latest();
        debug!("Conversation reset");
    }

    pub fn toggle_templates(&mut self) {
        self.state.templates_open = !self.state.templates_open;
        self.ui.mode = if self.state.templates_open {
            UiMode::Templates
        } else {
            UiMode::Chat
        };
    }

    pub fn close_templates(&mut self) {
        self.state.templates_open = false;
        if self.ui.mode == UiMode::Templates {
            self.ui.mode = UiMode::Chat;
        }
    }

    /// Copy a template prompt into the composer without sending it.
    pub fn apply_template(&mut self, prompt: &str) {
        self.state.input = prompt.to_string();
        self.close_templates();
    }

    pub fn apply_template_at(&mut self, index: usize) {
        if let Some(template) = TEMPLATES.get(index) {
            self.apply_template(template.prompt);
        }
    }

    /// `Idle → Recording` arms the capture timer; `Recording → Idle` stops it.
    ///
    /// With `voice_cancel_on_toggle` disabled a manual stop only flips the
    /// flag, and the armed timer still completes the capture later.
    pub fn toggle_voice_capture(&mut self) -> Option<AppCommand> {
        match std::mem::take(&mut self.state.voice) {
            VoiceCapture::Idle => {
                let timer = self.timers.arm();
                self.state.voice = VoiceCapture::Recording {
                    timer: timer.clone(),
                };
                debug!(timer = %timer.id(), "Voice capture started");
                Some(AppCommand::ScheduleVoiceCapture {
                    timer,
                    delay: self.options.voice_delay,
                })
            }
            VoiceCapture::Recording { timer } => {
                if self.options.voice_cancel_on_toggle {
                    timer.cancel();
                }
                debug!(
                    timer = %timer.id(),
                    cancelled = timer.is_cancelled(),
                    "Voice capture stopped"
                );
                None
            }
        }
    }

    pub fn complete_voice_capture(&mut self, timer: TimerId) {
        if self.options.voice_cancel_on_toggle {
            let current = match &self.state.voice {
                VoiceCapture::Recording { timer: active } => Some(active.id()),
                VoiceCapture::Idle => None,
            };
            if current != Some(timer) {
                debug!(%timer, "Ignoring stale voice capture");
                return;
            }
        }

        self.state.voice = VoiceCapture::Idle;
        self.state.input = RECOGNIZED_SPEECH.to_string();
        debug!(%timer, "Voice capture finished");
    }

    pub fn insert_text(&mut self, text: &str) {
        self.state.input.push_str(text);
    }

    pub fn backspace(&mut self) {
        self.state.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.state.input.clear();
    }
}
