//! Terminal chat front-end.
//!
//! Provides a single-pane TUI with:
//! - Header showing the workspace
//! - Scrollable chat window
//! - Context status line (current file, attachments)
//! - Input bar with slash-command and path autocompletion
//! - Footer with keybindings

mod app;
mod events;
mod input;
mod selector;
mod ui;

pub use app::{App, Message, Sender, GREETING};
pub use events::run;
pub use input::{
    compose_message, is_complete_command, InputBar, KeyOutcome, Outgoing, TextField, PLACEHOLDER,
};
pub use selector::{
    CommandSelector, InputActions, SelectorMode, LOAD_ERROR_LABEL, NO_RESULTS_LABEL,
};
