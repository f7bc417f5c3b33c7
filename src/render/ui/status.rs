//! Status line content.

use crate::input::PromptKind;
use crate::session::Session;

/// Transient message shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Info(text) | StatusMessage::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StatusMessage::Error(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<StatusMessage>,
    pub prompt: Option<(PromptKind, String)>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.message = Some(StatusMessage::Info(message.into()));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.message = Some(StatusMessage::Error(message.into()));
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn set_prompt(&mut self, kind: PromptKind, buffer: String) {
        self.prompt = Some((kind, buffer));
    }

    pub fn clear_prompt(&mut self) {
        self.prompt = None;
    }

    /// Prompt text while typing, otherwise `source | shown/total | flags | message`.
    pub fn format(&self, session: &Session) -> String {
        if let Some((kind, buffer)) = &self.prompt {
            return format!("{}{}", kind.label(), buffer);
        }

        let mut parts = Vec::new();
        match session.active_source() {
            Some(source) => {
                parts.push(source.name.clone());
                let shown = session.view().visible_lines().len();
                if source.is_synthetic {
                    parts.push(format!("{shown} hits"));
                } else {
                    parts.push(format!("{shown}/{} lines", source.line_count()));
                }
            }
            None => parts.push("no file".to_string()),
        }
        if let Some(term) = session.search_term() {
            parts.push(format!("search: {term}"));
        }
        if session.error_only() {
            parts.push("errors only".to_string());
        }
        let checked = session.checked_sources().len();
        if checked > 0 {
            parts.push(format!("{checked} checked"));
        }
        if let Some(message) = &self.message {
            parts.push(message.text().to_string());
        }
        parts.join(" | ")
    }
}
