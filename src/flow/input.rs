//! Single-slot input mailbox.
//!
//! The front end posts at most one decision at a time. The active phase
//! takes it in the tick it acts on it, so an input is never dropped
//! silently or used twice.

use serde::Serialize;

/// Size of the text buffer. Posted text keeps at most one byte less.
pub const INPUT_TEXT_CAPACITY: usize = 256;

/// One posted decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Input {
    Int(i32),
    Text(String),
}

impl Input {
    /// The input as a number; text is parsed after trimming.
    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Input::Int(v) => Some(*v),
            Input::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct InputMailbox {
    pending: Option<Input>,
}

impl InputMailbox {
    pub fn set_int(&mut self, value: i32) {
        self.pending = Some(Input::Int(value));
    }

    /// Post text, cut to fit the buffer on a character boundary.
    pub fn set_string(&mut self, text: &str) {
        let mut end = text.len().min(INPUT_TEXT_CAPACITY - 1);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.pending = Some(Input::Text(text[..end].to_string()));
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&Input> {
        self.pending.as_ref()
    }

    /// Consume the pending input.
    pub fn take(&mut self) -> Option<Input> {
        self.pending.take()
    }
}
