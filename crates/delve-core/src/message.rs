//! Append-only message log.

use serde::{Deserialize, Serialize};

use crate::data::colors::{self, Rgb};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub fg: Rgb,
    /// Repeats folded into this entry; rendered as "text (xN)".
    pub count: u32,
}

impl Message {
    fn new(text: String, fg: Rgb) -> Self {
        Self { text, fg, count: 1 }
    }

    /// Display form, with the repeat count appended when above one.
    pub fn full_text(&self) -> String {
        if self.count > 1 {
            format!("{} (x{})", self.text, self.count)
        } else {
            self.text.clone()
        }
    }
}

/// Ordered log of everything reported to the player. Entries are only
/// appended or folded into the newest entry, never rewritten.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. A repeat of the newest entry bumps its
    /// counter instead of adding a new line.
    pub fn add(&mut self, text: impl Into<String>, fg: Rgb) {
        let text = text.into();
        if let Some(last) = self.messages.last_mut() {
            if last.text == text && last.fg == fg {
                last.count += 1;
                return;
            }
        }
        self.messages.push(Message::new(text, fg));
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.add(text, colors::WHITE);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeats_stack() {
        let mut log = MessageLog::new();
        log.info("You wait.");
        log.info("You wait.");
        log.info("You wait.");
        assert_eq!(log.messages().len(), 1);
        assert_eq!(log.last().unwrap().full_text(), "You wait. (x3)");
    }

    #[test]
    fn test_different_text_breaks_the_stack() {
        let mut log = MessageLog::new();
        log.info("You wait.");
        log.add("Orc attacks you.", colors::ENEMY_ATK);
        log.info("You wait.");
        assert_eq!(log.messages().len(), 3);
    }

    #[test]
    fn test_same_text_different_color_does_not_stack() {
        let mut log = MessageLog::new();
        log.add("hit", colors::PLAYER_ATK);
        log.add("hit", colors::ENEMY_ATK);
        assert_eq!(log.messages().len(), 2);
    }
}
