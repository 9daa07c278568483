//! Static catalogs: quick-reply templates, chat backgrounds and the seeded
//! sidebar chats.

use chrono::{DateTime, Duration, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub id: &'static str,
    pub title: &'static str,
    pub prompt: &'static str,
}

pub const TEMPLATES: [Template; 4] = [
    Template {
        id: "1",
        title: "Creative idea",
        prompt: "Help me come up with a creative idea for...",
    },
    Template {
        id: "2",
        title: "Text analysis",
        prompt: "Analyze the following text and give recommendations...",
    },
    Template {
        id: "3",
        title: "Code generation",
        prompt: "Write Python code for...",
    },
    Template {
        id: "4",
        title: "Translation",
        prompt: "Translate the following text into English...",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundOption {
    pub id: &'static str,
    pub name: &'static str,
    pub url: &'static str,
}

impl BackgroundOption {
    /// Gradient entries are CSS literals rather than image URLs.
    pub fn is_gradient(&self) -> bool {
        is_gradient_literal(self.url)
    }
}

pub fn is_gradient_literal(url: &str) -> bool {
    url.starts_with("linear")
}

pub const BACKGROUNDS: [BackgroundOption; 6] = [
    BackgroundOption {
        id: "1",
        name: "Space",
        url: "https://images.unsplash.com/photo-1419242902214-272b3f66ee7a?w=1200&q=80",
    },
    BackgroundOption {
        id: "2",
        name: "Mountains",
        url: "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=1200&q=80",
    },
    BackgroundOption {
        id: "3",
        name: "Ocean",
        url: "https://images.unsplash.com/photo-1505142468610-359e7d316be0?w=1200&q=80",
    },
    BackgroundOption {
        id: "4",
        name: "Forest",
        url: "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=1200&q=80",
    },
    BackgroundOption {
        id: "5",
        name: "City",
        url: "https://images.unsplash.com/photo-1477959858617-67f85cf4f1df?w=1200&q=80",
    },
    BackgroundOption {
        id: "6",
        name: "Gradient",
        url: "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
    },
];

pub fn find_background(url: &str) -> Option<&'static BackgroundOption> {
    BACKGROUNDS.iter().find(|option| option.url == url)
}

/// Sidebar entry. Seeded once per session and not kept in sync with the
/// live thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Chat {
    pub id: String,
    pub title: String,
    pub last_message: String,
    pub timestamp: DateTime<Local>,
}

pub fn seed_chats(now: DateTime<Local>) -> Vec<Chat> {
    let chat = |id: &str, title: &str, last_message: &str, hours_ago: i64| Chat {
        id: id.to_string(),
        title: title.to_string(),
        last_message: last_message.to_string(),
        timestamp: now - Duration::hours(hours_ago),
    };

    vec![
        chat("1", "New chat", "Hi! I'm MonkyAI...", 0),
        chat("2", "Creative ideas", "Suggest ideas for...", 1),
        chat("3", "Programming", "Write a function...", 2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_catalog_has_one_gradient() {
        let gradients: Vec<_> = BACKGROUNDS.iter().filter(|b| b.is_gradient()).collect();
        assert_eq!(gradients.len(), 1);
        assert_eq!(gradients[0].name, "Gradient");
    }

    #[test]
    fn find_background_matches_by_url() {
        let ocean = BACKGROUNDS[2];
        assert_eq!(find_background(ocean.url), Some(&BACKGROUNDS[2]));
        assert!(find_background("https://example.com/unknown.png").is_none());
        assert!(find_background("").is_none());
    }

    #[test]
    fn seeded_chats_are_newest_first() {
        let now = Local::now();
        let chats = seed_chats(now);
        assert_eq!(chats.len(), 3);
        assert_eq!(chats[0].timestamp, now);
        assert!(chats.windows(2).all(|w| w[0].timestamp > w[1].timestamp));
    }
}
