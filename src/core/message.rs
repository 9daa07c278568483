use std::fmt;

use chrono::{DateTime, Local, TimeZone};

/// Author of a message in the thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    User,
    Ai,
}

impl Sender {
    pub fn is_user(self) -> bool {
        self == Sender::User
    }
}

/// Identifier of a message in the thread.
///
/// Ids are the creation time in milliseconds rendered as a decimal string,
/// bumped forward when two messages share a millisecond.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(String);

impl MessageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn is_user(&self) -> bool {
        self.sender.is_user()
    }

    /// Clock time shown under the message bubble.
    pub fn display_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// Hands out message ids and timestamps for one session.
#[derive(Debug, Default, Clone)]
pub struct MessageFactory {
    last_millis: i64,
}

impl MessageFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&mut self, content: impl Into<String>) -> Message {
        self.create(Sender::User, content, Local::now())
    }

    pub fn ai(&mut self, content: impl Into<String>) -> Message {
        self.create(Sender::Ai, content, Local::now())
    }

    pub fn create(
        &mut self,
        sender: Sender,
        content: impl Into<String>,
        timestamp: DateTime<Local>,
    ) -> Message {
        let millis = timestamp.timestamp_millis().max(self.last_millis + 1);
        self.last_millis = millis;
        let timestamp = Local
            .timestamp_millis_opt(millis)
            .single()
            .unwrap_or(timestamp);

        Message {
            id: MessageId(millis.to_string()),
            content: content.into(),
            sender,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_even_within_the_same_millisecond() {
        let mut factory = MessageFactory::new();
        let now = Local::now();
        let first = factory.create(Sender::User, "hi", now);
        let second = factory.create(Sender::Ai, "hello", now);
        let third = factory.create(Sender::User, "again", now);

        let parse = |m: &Message| m.id.as_str().parse::<i64>().expect("numeric id");
        assert!(parse(&first) < parse(&second));
        assert!(parse(&second) < parse(&third));
        assert!(second.timestamp >= first.timestamp);
    }

    #[test]
    fn id_tracks_creation_time() {
        let mut factory = MessageFactory::new();
        let now = Local::now();
        let message = factory.create(Sender::User, "hi", now);
        assert_eq!(message.id.as_str(), now.timestamp_millis().to_string());
    }
}
