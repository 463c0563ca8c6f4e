//! `/attach add|delete <path>`

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Tool, ToolInfo, Toolbox};
use crate::{HostError, Result};

pub const ATTACH_TOOL_NAME: &str = "attach";

const DESCRIPTION: &str = "Attach or remove files from the conversation context.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachParams {
    /// `add` or `delete`.
    pub sub_command: String,
    pub file_path: String,
}

/// Adds files to, or removes them from, the attached context.
#[derive(Debug, Default)]
pub struct AttachTool;

impl Tool for AttachTool {
    fn info(&self) -> ToolInfo {
        ToolInfo {
            name: ATTACH_TOOL_NAME,
            description: DESCRIPTION,
        }
    }

    fn input_from_args(&self, args: &[&str]) -> Result<serde_json::Value> {
        match args {
            [sub_command, file_path, ..] => Ok(json!({
                "sub_command": sub_command,
                "file_path": file_path,
            })),
            _ => Err(HostError::MissingArguments {
                command: ATTACH_TOOL_NAME.to_string(),
                usage: "a sub-command (add/delete) and a file path",
            }),
        }
    }

    fn run(&self, toolbox: &mut dyn Toolbox, input: serde_json::Value) -> Result<String> {
        let params: AttachParams = serde_json::from_value(input)?;
        match params.sub_command.as_str() {
            "add" => {
                toolbox.attach_file(&params.file_path);
                Ok(format!("File '{}' attached.", params.file_path))
            }
            "delete" => {
                toolbox.detach_file(&params.file_path);
                Ok(format!("File '{}' detached.", params.file_path))
            }
            other => Err(HostError::Tool(format!(
                "unknown sub-command: {}. Use 'add' or 'delete'.",
                other
            ))),
        }
    }
}
