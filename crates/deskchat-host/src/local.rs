//! Host backed by a local workspace directory.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::bridge::{CommandInfo, FileEntry, HostBridge, UiState};
use crate::tools::{default_tools, Tool, Toolbox};
use crate::{HostError, Result};

/// Current file and attachments, mutated by the tools.
#[derive(Debug, Default)]
struct SessionState {
    current_file: Option<String>,
    attached_files: BTreeSet<String>,
}

impl SessionState {
    fn ui_state(&self) -> UiState {
        UiState {
            current_file: self.current_file.clone().filter(|f| !f.is_empty()),
            attached_files: self.attached_files.iter().cloned().collect(),
            view_content: String::new(),
        }
    }
}

/// What a tool sees while it runs: the locked session plus the workspace root.
struct Workspace<'a> {
    root: &'a Path,
    session: &'a mut SessionState,
}

impl Toolbox for Workspace<'_> {
    fn attach_file(&mut self, file: &str) {
        self.session.attached_files.insert(file.to_string());
    }

    fn detach_file(&mut self, file: &str) {
        self.session.attached_files.remove(file);
    }

    fn set_current_file(&mut self, file: &str) {
        self.session.current_file = Some(file.to_string());
    }

    fn read_file(&self, file: &str) -> Result<String> {
        read_text(&resolve_in(self.root, file)?)
    }

    fn write_file(&mut self, file: &str, content: &str) -> Result<()> {
        let full_path = resolve_in(self.root, file)?;
        if full_path.as_path() == self.root {
            return Err(HostError::Tool(format!("'{}' is not a file", file)));
        }
        let io_err = |source: std::io::Error| HostError::Io {
            path: full_path.clone(),
            source,
        };
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&full_path, content).map_err(io_err)?;
        tracing::debug!(path = %file, bytes = content.len(), "Wrote file");
        Ok(())
    }
}

/// Resolve a user-supplied path inside `root`.
///
/// A leading `/` is relative to the root. `..` may not climb above it.
fn resolve_in(root: &Path, path: &str) -> Result<PathBuf> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(HostError::OutsideWorkspace(path.to_string()));
                }
            }
            other => segments.push(other),
        }
    }
    Ok(segments
        .iter()
        .fold(root.to_path_buf(), |acc, segment| acc.join(segment)))
}

fn read_text(full_path: &Path) -> Result<String> {
    let bytes = fs::read(full_path).map_err(|source| HostError::Io {
        path: full_path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Serves directory listings, file reads and commands from `root`.
pub struct LocalHost {
    root: PathBuf,
    tools: Vec<Box<dyn Tool>>,
    state: Mutex<SessionState>,
}

impl LocalHost {
    /// Create a host rooted at `root` with the default tools.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_tools(root, default_tools())
    }

    /// Create a host with a custom tool set.
    pub fn with_tools(root: impl Into<PathBuf>, tools: Vec<Box<dyn Tool>>) -> Self {
        Self {
            root: root.into(),
            tools,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// The workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Snapshot of the current view state.
    pub fn ui_state(&self) -> UiState {
        self.lock_state().ui_state()
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn tool(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.info().name == name)
            .map(|t| t.as_ref())
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        resolve_in(&self.root, path)
    }
}

impl HostBridge for LocalHost {
    fn list_directory(&self, path: &str) -> Result<Vec<FileEntry>> {
        let full_path = self.resolve(path)?;
        let io_err = |source: std::io::Error| HostError::Io {
            path: full_path.clone(),
            source,
        };

        let mut files = Vec::new();
        let mut dirs = Vec::new();
        for entry in fs::read_dir(&full_path).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.path().is_dir() {
                dirs.push(FileEntry::dir(name));
            } else {
                files.push(FileEntry::file(name));
            }
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        dirs.sort_by(|a, b| a.name.cmp(&b.name));
        files.extend(dirs);

        tracing::debug!(path = %path, entries = files.len(), "Listed directory");
        Ok(files)
    }

    fn list_commands(&self) -> Result<Vec<CommandInfo>> {
        Ok(self
            .tools
            .iter()
            .map(|t| {
                let info = t.info();
                CommandInfo {
                    name: info.name.to_string(),
                    description: info.description.to_string(),
                }
            })
            .collect())
    }

    fn execute_command(&self, text: &str) -> Result<UiState> {
        let words: Vec<&str> = text
            .trim()
            .strip_prefix('/')
            .unwrap_or(text.trim())
            .split_whitespace()
            .collect();
        let (command, args) = words.split_first().ok_or(HostError::InvalidCommand)?;

        let tool = self
            .tool(command)
            .ok_or_else(|| HostError::UnknownCommand(command.to_string()))?;
        let input = tool.input_from_args(args)?;

        let mut session = self.lock_state();
        let mut workspace = Workspace {
            root: &self.root,
            session: &mut *session,
        };
        let reply = tool.run(&mut workspace, input)?;
        tracing::info!(command = %command, "Executed command");
        tracing::debug!(reply = %reply, "Command reply");

        let mut state = session.ui_state();
        state.view_content = reply;
        Ok(state)
    }

    fn read_file(&self, path: &str) -> Result<String> {
        read_text(&self.resolve(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/app")).unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("src/main.ts"), "console.log('hi');").unwrap();
        fs::write(dir.path().join("README.md"), "# readme").unwrap();
        fs::write(dir.path().join("Cargo.toml"), "[package]").unwrap();
        dir
    }

    #[test]
    fn test_list_directory_files_then_dirs() {
        let dir = workspace();
        let host = LocalHost::new(dir.path());

        let entries = host.list_directory(".").unwrap();
        let names: Vec<String> = entries.iter().map(|e| e.display_name()).collect();
        assert_eq!(names, vec!["Cargo.toml", "README.md", "docs/", "src/"]);
    }

    #[test]
    fn test_list_directory_nested_and_leading_slash() {
        let dir = workspace();
        let host = LocalHost::new(dir.path());

        let nested = host.list_directory("src").unwrap();
        assert_eq!(nested, vec![FileEntry::file("main.ts"), FileEntry::dir("app")]);
        assert_eq!(host.list_directory("/src").unwrap(), nested);
        assert_eq!(host.list_directory("./x/../src").unwrap(), nested);
    }

    #[test]
    fn test_list_directory_missing() {
        let dir = workspace();
        let host = LocalHost::new(dir.path());
        assert!(matches!(
            host.list_directory("nope"),
            Err(HostError::Io { .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_escape() {
        let dir = workspace();
        let host = LocalHost::new(dir.path());
        assert!(matches!(
            host.list_directory("../.."),
            Err(HostError::OutsideWorkspace(_))
        ));
        assert!(host.read_file("src/../../etc/passwd").is_err());
    }

    #[test]
    fn test_read_file() {
        let dir = workspace();
        let host = LocalHost::new(dir.path());
        assert_eq!(host.read_file("src/main.ts").unwrap(), "console.log('hi');");
    }

    #[test]
    fn test_list_commands_in_registration_order() {
        let host = LocalHost::new(".");
        let names: Vec<String> = host
            .list_commands()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["attach", "currentfile", "view", "write"]);
    }

    #[test]
    fn test_execute_attach_and_currentfile() {
        let host = LocalHost::new(".");

        host.execute_command("/attach add src/b.rs").unwrap();
        host.execute_command("/attach add src/a.rs").unwrap();
        let state = host.execute_command("/currentfile src/main.rs").unwrap();
        assert_eq!(state.current_file.as_deref(), Some("src/main.rs"));
        assert_eq!(state.attached_files, vec!["src/a.rs", "src/b.rs"]);

        let state = host.execute_command("/attach delete src/a.rs").unwrap();
        assert_eq!(state.attached_files, vec!["src/b.rs"]);
        assert_eq!(state.view_content, "File 'src/a.rs' detached.");
        assert_eq!(host.ui_state().attached_files, state.attached_files);
        assert!(host.ui_state().view_content.is_empty());
    }

    #[test]
    fn test_execute_view_sets_view_content() {
        let dir = workspace();
        let host = LocalHost::new(dir.path());

        let state = host.execute_command("/view src/main.ts").unwrap();
        assert_eq!(state.view_content, "console.log('hi');");
        assert!(state.current_file.is_none());

        assert!(matches!(
            host.execute_command("/view missing.ts"),
            Err(HostError::Io { .. })
        ));
        assert!(matches!(
            host.execute_command("/view"),
            Err(HostError::MissingArguments { .. })
        ));
    }

    #[test]
    fn test_execute_write_joins_words() {
        let dir = workspace();
        let host = LocalHost::new(dir.path());

        host.execute_command("/write notes/todo.md buy  milk today").unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("notes/todo.md")).unwrap(),
            "buy milk today"
        );

        let state = host.execute_command("/view notes/todo.md").unwrap();
        assert_eq!(state.view_content, "buy milk today");

        assert!(matches!(
            host.execute_command("/write ../outside.txt x"),
            Err(HostError::OutsideWorkspace(_))
        ));
        assert!(!dir.path().join("../outside.txt").exists());
    }

    #[test]
    fn test_execute_errors() {
        let host = LocalHost::new(".");
        assert!(matches!(host.execute_command("/"), Err(HostError::InvalidCommand)));
        assert!(matches!(
            host.execute_command("/help"),
            Err(HostError::UnknownCommand(name)) if name == "help"
        ));
        assert!(matches!(
            host.execute_command("/attach add"),
            Err(HostError::MissingArguments { .. })
        ));
        assert!(matches!(
            host.execute_command("/attach move x"),
            Err(HostError::Tool(_))
        ));
        assert_eq!(host.ui_state(), UiState::default());
    }
}
