//! The bridge between the chat front-end and its host.

use serde::{Deserialize, Serialize};

use crate::Result;

/// A directory entry as seen by the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Entry name, without any directory prefix.
    pub name: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

impl FileEntry {
    /// Create a file entry.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    /// Create a directory entry.
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }

    /// Label shown in the selector; directories get a trailing `/`.
    pub fn display_name(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// A command offered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInfo {
    pub name: String,
    pub description: String,
}

/// View state the host hands back after executing a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    /// File currently in focus, if any.
    #[serde(default)]
    pub current_file: Option<String>,
    /// Files attached as conversation context, sorted.
    #[serde(default)]
    pub attached_files: Vec<String>,
    /// Text the last command produced for display, such as a viewed file.
    #[serde(default)]
    pub view_content: String,
}

/// Operations the front-end needs from its host.
///
/// Calls may block; the front-end issues them off the UI thread, so
/// implementations must be shareable across threads.
pub trait HostBridge: Send + Sync {
    /// List a directory relative to the workspace root. `"."` is the root.
    /// Entry order is preserved by the caller.
    fn list_directory(&self, path: &str) -> Result<Vec<FileEntry>>;

    /// List the commands the host can execute.
    fn list_commands(&self) -> Result<Vec<CommandInfo>>;

    /// Execute a slash command such as `/attach add src/main.rs`.
    fn execute_command(&self, text: &str) -> Result<UiState>;

    /// Read a workspace file as text.
    fn read_file(&self, path: &str) -> Result<String>;
}
