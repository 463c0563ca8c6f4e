//! Chat shell state: message list and the input bar.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use deskchat_host::HostBridge;

use super::input::{InputBar, Outgoing};

/// Greeting the bot opens every session with.
pub const GREETING: &str = "Hello! How can I help you today?";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
    System,
}

/// A message in the chat window.
#[derive(Debug, Clone)]
pub struct Message {
    /// When the message was created
    pub timestamp: DateTime<Utc>,
    pub sender: Sender,
    pub content: String,
}

impl Message {
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            sender,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Sender::Bot, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Sender::System, content)
    }
}

/// TUI application state.
pub struct App {
    /// Messages in the chat window
    pub messages: Vec<Message>,
    /// Scroll offset for the chat window (0 = bottom)
    pub scroll_offset: usize,
    pub input: InputBar,
    /// Workspace shown in the header
    pub workspace: String,
    pub should_quit: bool,
}

impl App {
    /// Create the app with the bot greeting.
    pub fn new(host: Arc<dyn HostBridge>, workspace: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::bot(GREETING)],
            scroll_offset: 0,
            input: InputBar::new(host),
            workspace: workspace.into(),
            should_quit: false,
        }
    }

    /// Collect host replies and append sent messages and command output.
    pub fn tick(&mut self) {
        let outgoing = self.input.poll();
        if outgoing.is_empty() {
            return;
        }
        for item in outgoing {
            match item {
                Outgoing::Message(message) => {
                    tracing::debug!(len = message.len(), "Message sent");
                    self.messages.push(Message::user(message));
                }
                Outgoing::CommandOutput { command, content } => {
                    tracing::debug!(command = %command, len = content.len(), "Command output");
                    self.messages.push(Message::system(content));
                }
            }
        }
        self.scroll_to_bottom();
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
        self.messages.push(Message::system("Output cleared"));
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_page_up(&mut self, page_size: usize) {
        let max = self.messages.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + page_size).min(max);
    }

    pub fn scroll_page_down(&mut self, page_size: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(page_size);
    }
}
