//! `/view <path>`

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Tool, ToolInfo, Toolbox};
use crate::{HostError, Result};

pub const VIEW_TOOL_NAME: &str = "view";

const DESCRIPTION: &str = "Show the contents of a workspace file.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewParams {
    pub file_path: String,
}

/// Returns a file's text as the command reply.
#[derive(Debug, Default)]
pub struct ViewTool;

impl Tool for ViewTool {
    fn info(&self) -> ToolInfo {
        ToolInfo {
            name: VIEW_TOOL_NAME,
            description: DESCRIPTION,
        }
    }

    fn input_from_args(&self, args: &[&str]) -> Result<serde_json::Value> {
        let file_path = args.first().ok_or_else(|| HostError::MissingArguments {
            command: VIEW_TOOL_NAME.to_string(),
            usage: "a file path",
        })?;
        Ok(json!({ "file_path": file_path }))
    }

    fn run(&self, toolbox: &mut dyn Toolbox, input: serde_json::Value) -> Result<String> {
        let params: ViewParams = serde_json::from_value(input)?;
        toolbox.read_file(&params.file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::MemoryToolbox;

    #[test]
    fn test_view_returns_contents() {
        let mut toolbox = MemoryToolbox::default();
        toolbox.files.insert("notes.md".into(), "# notes".into());

        let input = ViewTool.input_from_args(&["notes.md"]).unwrap();
        assert_eq!(ViewTool.run(&mut toolbox, input).unwrap(), "# notes");
    }

    #[test]
    fn test_view_missing_file() {
        let mut toolbox = MemoryToolbox::default();
        let input = ViewTool.input_from_args(&["gone.md"]).unwrap();
        assert!(ViewTool.run(&mut toolbox, input).is_err());
        assert!(ViewTool.input_from_args(&[]).is_err());
    }
}
