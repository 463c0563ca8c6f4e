//! `/write <path> <content...>`

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Tool, ToolInfo, Toolbox};
use crate::{HostError, Result};

pub const WRITE_TOOL_NAME: &str = "write";

const DESCRIPTION: &str = "Write text to a workspace file, replacing its contents.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteParams {
    pub file_path: String,
    #[serde(default)]
    pub content: String,
}

/// Writes the words after the path, joined by spaces, to a file.
#[derive(Debug, Default)]
pub struct WriteTool;

impl Tool for WriteTool {
    fn info(&self) -> ToolInfo {
        ToolInfo {
            name: WRITE_TOOL_NAME,
            description: DESCRIPTION,
        }
    }

    fn input_from_args(&self, args: &[&str]) -> Result<serde_json::Value> {
        let (file_path, content) = args.split_first().ok_or_else(|| HostError::MissingArguments {
            command: WRITE_TOOL_NAME.to_string(),
            usage: "a file path",
        })?;
        Ok(json!({
            "file_path": file_path,
            "content": content.join(" "),
        }))
    }

    fn run(&self, toolbox: &mut dyn Toolbox, input: serde_json::Value) -> Result<String> {
        let params: WriteParams = serde_json::from_value(input)?;
        toolbox.write_file(&params.file_path, &params.content)?;
        Ok(format!(
            "Wrote {} bytes to '{}'.",
            params.content.len(),
            params.file_path
        ))
    }
}
