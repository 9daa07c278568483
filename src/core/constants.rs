//! Shared constants used across the application

use std::time::Duration;

pub const APP_TITLE: &str = "MonkyAI Chat";
pub const APP_TAGLINE: &str = "Your creative assistant";
pub const DISCLAIMER: &str = "MonkyAI can make mistakes. Check important information.";

/// Greeting that opens the very first thread of a session.
pub const WELCOME_GREETING: &str =
    "Hi! I'm MonkyAI, your personal AI assistant. How can I help?";

/// Greeting placed in a thread started with "New chat".
pub const RESET_GREETING: &str = "Hi! I'm MonkyAI. How can I help?";

/// Body of every mocked assistant reply.
pub const PLACEHOLDER_REPLY: &str =
    "This is a demo reply from MonkyAI. The full version will answer with a real AI model!";

/// Text written into the input after a voice capture finishes.
pub const RECOGNIZED_SPEECH: &str = "This is text recognized from your voice...";

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_VOICE_DELAY: Duration = Duration::from_millis(2000);

pub const DEFAULT_UPLOAD_ENDPOINT: &str =
    "https://functions.poehali.dev/2442ac3b-c090-421d-802e-a6ad24a7551b";

pub const DEFAULT_USER_NAME: &str = "User";

/// How long a notification stays in the toast line.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Number of past notifications kept for the session.
pub const NOTIFICATION_HISTORY_LIMIT: usize = 50;
