//! Message lookup for localized labels and descriptions
//!
//! Label text shown to job operators is resolved through a [`MessageSource`]
//! rather than hard-coded in the task, so a host can swap in its own
//! localization backend. The built-in [`MessageBundle`] reads the simple
//! UTF-8 properties format (`code=text`, `#` comments).

use std::collections::HashMap;

/// External collaborator that resolves message codes to display text
pub trait MessageSource: Send + Sync {
    /// Resolve a message by its full code, `None` when the source lacks it
    fn message(&self, code: &str) -> Option<String>;
}

/// Properties-backed message source
#[derive(Debug, Clone, Default)]
pub struct MessageBundle {
    messages: HashMap<String, String>,
}

impl MessageBundle {
    /// Create an empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bundle from properties text
    ///
    /// Blank lines and lines starting with `#` or `!` are skipped; everything
    /// after the first `=` is the message text, with surrounding whitespace
    /// trimmed on both sides.
    pub fn from_properties(text: &str) -> Self {
        let mut messages = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            if let Some((code, text)) = line.split_once('=') {
                messages.insert(code.trim().to_string(), text.trim().to_string());
            }
        }
        Self { messages }
    }

    /// Add or replace a single message
    pub fn insert(&mut self, code: impl Into<String>, text: impl Into<String>) {
        self.messages.insert(code.into(), text.into());
    }
}

impl MessageSource for MessageBundle {
    fn message(&self, code: &str) -> Option<String> {
        self.messages.get(code).cloned()
    }
}
