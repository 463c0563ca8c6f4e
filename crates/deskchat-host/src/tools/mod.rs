//! Tools backing the host's slash commands.
//!
//! Each tool turns positional command arguments into a JSON input and
//! then applies that input to the host's session state or workspace.

mod attach;
mod current_file;
mod view;
mod write;

pub use attach::{AttachParams, AttachTool, ATTACH_TOOL_NAME};
pub use current_file::{CurrentFileParams, CurrentFileTool, CURRENT_FILE_TOOL_NAME};
pub use view::{ViewParams, ViewTool, VIEW_TOOL_NAME};
pub use write::{WriteParams, WriteTool, WRITE_TOOL_NAME};

use crate::Result;

/// Static description of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Session state and workspace files a tool is allowed to touch.
pub trait Toolbox {
    fn attach_file(&mut self, file: &str);
    fn detach_file(&mut self, file: &str);
    fn set_current_file(&mut self, file: &str);

    /// Read a workspace file as text.
    fn read_file(&self, file: &str) -> Result<String>;

    /// Create or replace a workspace file.
    fn write_file(&mut self, file: &str, content: &str) -> Result<()>;
}

/// A command the host can execute.
pub trait Tool: Send + Sync {
    fn info(&self) -> ToolInfo;

    /// Build the tool input from the words following the command name.
    fn input_from_args(&self, args: &[&str]) -> Result<serde_json::Value>;

    /// Apply the input and return a human readable confirmation.
    fn run(&self, toolbox: &mut dyn Toolbox, input: serde_json::Value) -> Result<String>;
}

/// The tools registered on a fresh host, in catalog order.
pub fn default_tools() -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(AttachTool),
        Box::new(CurrentFileTool),
        Box::new(ViewTool),
        Box::new(WriteTool),
    ]
}
