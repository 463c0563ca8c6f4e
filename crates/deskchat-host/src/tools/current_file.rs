//! `/currentfile <path>`

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Tool, ToolInfo, Toolbox};
use crate::{HostError, Result};

pub const CURRENT_FILE_TOOL_NAME: &str = "currentfile";

const DESCRIPTION: &str = "Set the main file the assistant works with.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentFileParams {
    pub file_path: String,
}

/// Sets the file in focus.
#[derive(Debug, Default)]
pub struct CurrentFileTool;

impl Tool for CurrentFileTool {
    fn info(&self) -> ToolInfo {
        ToolInfo {
            name: CURRENT_FILE_TOOL_NAME,
            description: DESCRIPTION,
        }
    }

    fn input_from_args(&self, args: &[&str]) -> Result<serde_json::Value> {
        let file_path = args.first().ok_or_else(|| HostError::MissingArguments {
            command: CURRENT_FILE_TOOL_NAME.to_string(),
            usage: "a file path",
        })?;
        Ok(json!({ "file_path": file_path }))
    }

    fn run(&self, toolbox: &mut dyn Toolbox, input: serde_json::Value) -> Result<String> {
        let params: CurrentFileParams = serde_json::from_value(input)?;
        toolbox.set_current_file(&params.file_path);
        Ok(format!("Current file set to '{}'.", params.file_path))
    }
}
