//! Input bar: text field, slash-command autocomplete and context files.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use deskchat_host::tools::{
    ATTACH_TOOL_NAME, CURRENT_FILE_TOOL_NAME, VIEW_TOOL_NAME, WRITE_TOOL_NAME,
};
use deskchat_host::{CommandInfo, HostBridge, HostError, UiState};

use super::selector::{CommandSelector, InputActions};

/// Placeholder shown while the field is empty.
pub const PLACEHOLDER: &str = "type a message or / for commands";

/// Single-line text buffer with a char-based cursor.
#[derive(Debug, Default)]
pub struct TextField {
    text: String,
    cursor: usize,
    input_event: bool,
}

impl TextField {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the text and move the cursor to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.text
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Remove the char before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    /// Remove the char under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.text.chars().count() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    /// Whether a rewrite happened since the last call.
    pub fn take_input_event(&mut self) -> bool {
        std::mem::take(&mut self.input_event)
    }
}

impl InputActions for TextField {
    fn update_input(&mut self, new_text: String) {
        self.set_text(new_text);
        self.input_event = true;
    }

    fn current_input(&self) -> String {
        self.text.clone()
    }
}

/// Whether the input bar consumed a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Ignored,
}

/// Text the input bar hands to the chat window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    /// A user message, context files included.
    Message(String),
    /// What a command printed, such as the file `/view` opened.
    CommandOutput { command: String, content: String },
}

enum HostReply {
    Commands(Result<Vec<CommandInfo>, HostError>),
    Executed {
        text: String,
        result: Result<UiState, HostError>,
    },
    Composed(String),
}

/// Number of arguments a command needs before Enter runs it.
pub fn required_args(command: &str) -> Option<usize> {
    match command {
        CURRENT_FILE_TOOL_NAME | VIEW_TOOL_NAME => Some(1),
        ATTACH_TOOL_NAME | WRITE_TOOL_NAME => Some(2),
        _ => None,
    }
}

/// Whether `text` is a slash command with all its arguments typed.
pub fn is_complete_command(text: &str) -> bool {
    let text = text.trim();
    let body = text.strip_prefix('/').unwrap_or(text);
    let parts: Vec<&str> = body.split(' ').collect();
    match required_args(parts[0]) {
        Some(n) => parts.len() > 1 && parts.len() > n,
        None => false,
    }
}

/// Prefix `message` with the contents of `files`.
///
/// If any file cannot be read the message is sent without context,
/// prefixed with a note naming the file.
pub fn compose_message<F>(message: &str, files: &[String], mut read: F) -> String
where
    F: FnMut(&str) -> Result<String, HostError>,
{
    if files.is_empty() {
        return message.to_string();
    }

    let mut blocks = String::new();
    for file in files {
        match read(file) {
            Ok(content) => {
                blocks.push_str(&format!(
                    "--- Contents of {} ---\n```\n{}\n```\n\n",
                    file, content
                ));
            }
            Err(e) => {
                tracing::warn!(file = %file, error = %e, "Failed to read context file");
                return format!("(error reading file {}) {}", file, message);
            }
        }
    }
    format!("Based on the files below:\n\n{}\n\n{}", blocks, message)
}

/// A message waiting for its context files.
type Draft = (String, Vec<String>);

/// Start the worker that composes messages one at a time, so replies
/// leave in the order the messages were sent.
fn spawn_composer(
    host: Arc<dyn HostBridge>,
    replies: mpsc::Sender<HostReply>,
) -> mpsc::Sender<Draft> {
    let (tx, rx) = mpsc::channel::<Draft>();
    thread::spawn(move || {
        for (message, files) in rx {
            let composed = compose_message(&message, &files, |f| host.read_file(f));
            if replies.send(HostReply::Composed(composed)).is_err() {
                break;
            }
        }
        tracing::debug!("Message composer stopped");
    });
    tx
}

/// The chat input with its command selector and context state.
pub struct InputBar {
    host: Arc<dyn HostBridge>,
    field: TextField,
    selector: CommandSelector,
    current_file: Option<String>,
    include_current_file: bool,
    attached_files: Vec<String>,
    show_attachments: bool,
    hint: Option<String>,
    reply_tx: mpsc::Sender<HostReply>,
    reply_rx: mpsc::Receiver<HostReply>,
    composer: mpsc::Sender<Draft>,
    outbox: Vec<Outgoing>,
}

impl InputBar {
    /// Create the bar and start loading the command catalog.
    pub fn new(host: Arc<dyn HostBridge>) -> Self {
        let (reply_tx, reply_rx) = mpsc::channel();
        let composer = spawn_composer(Arc::clone(&host), reply_tx.clone());
        let bar = Self {
            selector: CommandSelector::new(Arc::clone(&host), Vec::new()),
            host,
            field: TextField::default(),
            current_file: None,
            include_current_file: true,
            attached_files: Vec::new(),
            show_attachments: false,
            hint: None,
            reply_tx,
            reply_rx,
            composer,
            outbox: Vec::new(),
        };
        bar.spawn_host_call(|host| HostReply::Commands(host.list_commands()));
        bar
    }

    fn spawn_host_call<F>(&self, call: F)
    where
        F: FnOnce(&dyn HostBridge) -> HostReply + Send + 'static,
    {
        let host = Arc::clone(&self.host);
        let tx = self.reply_tx.clone();
        thread::spawn(move || {
            let _ = tx.send(call(host.as_ref()));
        });
    }

    pub fn field(&self) -> &TextField {
        &self.field
    }

    pub fn selector(&self) -> &CommandSelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut CommandSelector {
        &mut self.selector
    }

    pub fn current_file(&self) -> Option<&str> {
        self.current_file.as_deref()
    }

    pub fn include_current_file(&self) -> bool {
        self.include_current_file
    }

    pub fn attached_files(&self) -> &[String] {
        &self.attached_files
    }

    pub fn show_attachments(&self) -> bool {
        self.show_attachments
    }

    /// Last command error, shown under the field.
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Show or hide the selector for the current text.
    pub fn handle_input(&mut self) {
        match self.field.text().strip_prefix('/') {
            Some(query) => {
                let query = query.to_string();
                self.selector.show();
                self.selector.filter(&query);
            }
            None => self.selector.hide(),
        }
    }

    /// Re-run input handling after the selector rewrote the field.
    fn finish_rewrite(&mut self) {
        let keep_open = self.selector.is_visible();
        if self.field.take_input_event() {
            self.handle_input();
            if !keep_open {
                self.selector.hide();
            }
        }
    }

    fn confirm_selection(&mut self) {
        self.selector.confirm_selection(&mut self.field);
        self.finish_rewrite();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if self.selector.is_visible() {
            match key.code {
                KeyCode::Up => {
                    self.selector.select_previous();
                    return KeyOutcome::Handled;
                }
                KeyCode::Down => {
                    self.selector.select_next();
                    return KeyOutcome::Handled;
                }
                KeyCode::Esc => {
                    self.selector.hide();
                    return KeyOutcome::Handled;
                }
                KeyCode::Enter => {
                    if is_complete_command(self.field.text()) {
                        self.execute_current_input();
                    } else if self.selector.has_selection() {
                        self.confirm_selection();
                    }
                    return KeyOutcome::Handled;
                }
                KeyCode::Tab => {
                    if self.selector.has_selection() {
                        self.confirm_selection();
                    }
                    return KeyOutcome::Handled;
                }
                _ => {}
            }
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('x') if ctrl => {
                self.attached_files.clear();
            }
            KeyCode::Char(c) if !ctrl => {
                self.field.insert_char(c);
                self.handle_input();
            }
            KeyCode::Backspace => {
                if self.field.backspace() {
                    self.handle_input();
                }
            }
            KeyCode::Delete => {
                if self.field.delete() {
                    self.handle_input();
                }
            }
            KeyCode::Left => self.field.move_left(),
            KeyCode::Right => self.field.move_right(),
            KeyCode::Home => self.field.move_home(),
            KeyCode::End => self.field.move_end(),
            KeyCode::Enter => self.execute_current_input(),
            KeyCode::F(2) => self.show_attachments = !self.show_attachments,
            KeyCode::F(3) => self.include_current_file = !self.include_current_file,
            _ => return KeyOutcome::Ignored,
        }
        KeyOutcome::Handled
    }

    /// Route a left click; returns true when it hit a selector row.
    pub fn handle_click(&mut self, column: u16, row: u16) -> bool {
        if !self.selector.is_visible() {
            return false;
        }
        let Some(index) = self.selector.row_at(column, row) else {
            return false;
        };
        self.selector.click(index, &mut self.field);
        self.finish_rewrite();
        true
    }

    /// Run the field as a command, or send it as a message.
    pub fn execute_current_input(&mut self) {
        let text = self.field.text().trim().to_string();
        if text.starts_with('/') {
            tracing::info!(command = %text, "Executing command");
            self.spawn_host_call(move |host| {
                let result = host.execute_command(&text);
                HostReply::Executed { text, result }
            });
        } else if !text.is_empty() {
            self.send_message();
        }
    }

    fn context_files(&self) -> Vec<String> {
        let mut files = Vec::new();
        if self.include_current_file {
            files.extend(self.current_file.clone());
        }
        for file in &self.attached_files {
            if !files.contains(file) {
                files.push(file.clone());
            }
        }
        files
    }

    /// Dispatch the field text with its context files and clear the field.
    pub fn send_message(&mut self) {
        let message = self.field.text().trim().to_string();
        if message.is_empty() {
            return;
        }

        let files = self.context_files();
        tracing::info!(files = files.len(), "Sending message");
        if let Err(e) = self.composer.send((message, files)) {
            tracing::error!(error = %e, "Message composer is gone");
            return;
        }
        self.field.clear();
    }

    /// Apply finished host calls. Returns what the chat should show, in order.
    pub fn poll(&mut self) -> Vec<Outgoing> {
        self.selector.poll();
        while let Ok(reply) = self.reply_rx.try_recv() {
            self.apply_reply(reply);
        }
        std::mem::take(&mut self.outbox)
    }

    fn apply_reply(&mut self, reply: HostReply) {
        match reply {
            HostReply::Commands(Ok(commands)) => {
                tracing::debug!(count = commands.len(), "Loaded command catalog");
                self.selector
                    .set_commands(commands.into_iter().map(|c| c.name).collect());
            }
            HostReply::Commands(Err(e)) => {
                tracing::warn!(error = %e, "Failed to load command catalog");
            }
            HostReply::Executed {
                text,
                result: Ok(state),
            } => {
                tracing::debug!(command = %text, ?state, "Command succeeded");
                if !state.view_content.is_empty() {
                    self.outbox.push(Outgoing::CommandOutput {
                        command: text,
                        content: state.view_content,
                    });
                }
                self.current_file = state.current_file;
                self.attached_files = state.attached_files;
                self.hint = None;
                self.field.clear();
                self.selector.hide();
            }
            HostReply::Executed {
                text,
                result: Err(e),
            } => {
                tracing::warn!(command = %text, error = %e, "Command failed");
                self.hint = Some(format!("{}: {}", text, e));
            }
            HostReply::Composed(message) => self.outbox.push(Outgoing::Message(message)),
        }
    }
}

#[cfg(test)]
impl InputBar {
    /// Block until one host reply arrives and apply it.
    fn wait_for_reply(&mut self, timeout: std::time::Duration) -> bool {
        match self.reply_rx.recv_timeout(timeout) {
            Ok(reply) => {
                self.apply_reply(reply);
                true
            }
            Err(_) => false,
        }
    }
}
