//! Committed text and the SPACE flash timestamp.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::layout::KeyId;

/// How long the `[SPACE]` indicator stays visible after a space is committed.
pub const SPACE_FLASH: Duration = Duration::from_millis(300);

/// Cursor marker appended when the buffer is displayed.
pub const CURSOR: char = '|';

/// The text typed so far.
#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    text:       String,
    last_space: Option<Instant>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str { &self.text }
    pub fn is_empty(&self) -> bool { self.text.is_empty() }

    /// Apply one key press.
    ///
    /// * `SPACE` appends `' '` and stamps `now` for the flash indicator.
    /// * `BACK` removes the last character; on an empty buffer it does nothing.
    /// * Any other key appends its character.
    pub fn commit(&mut self, key: KeyId, now: Instant) {
        match key {
            KeyId::Space => {
                self.text.push(' ');
                self.last_space = Some(now);
            }
            KeyId::Back => {
                self.delete_last();
            }
            KeyId::Letter(c) => self.text.push(c),
        }
        debug!(key = %key, text = %self.text, "key committed");
    }

    /// Remove and return the last character, if any.
    pub fn delete_last(&mut self) -> Option<char> {
        self.text.pop()
    }

    /// When SPACE was last committed.
    pub fn last_space(&self) -> Option<Instant> { self.last_space }

    /// Whether the SPACE indicator should be drawn at `now`.
    pub fn space_flash_active(&self, now: Instant) -> bool {
        self.last_space
            .is_some_and(|t| now.saturating_duration_since(t) < SPACE_FLASH)
    }

    /// Buffer contents followed by the cursor marker.
    pub fn with_cursor(&self) -> String {
        let mut s = String::with_capacity(self.text.len() + 1);
        s.push_str(&self.text);
        s.push(CURSOR);
        s
    }
}
