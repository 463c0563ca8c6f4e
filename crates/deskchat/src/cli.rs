//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Deskchat - terminal chat with slash commands and file context
#[derive(Parser, Debug)]
#[command(name = "deskchat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to state directory
    #[arg(short, long, env = "DESKCHAT_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Directory the host lists and reads files from
    #[arg(short, long, env = "DESKCHAT_WORKSPACE")]
    pub workspace: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the chat TUI (default)
    Tui,

    /// List the slash commands the host understands
    Commands,

    /// List a workspace directory the way the autocomplete sees it
    Ls {
        /// Path relative to the workspace
        #[arg(default_value = ".")]
        path: String,
    },

    /// Run one slash command and print the resulting state as JSON
    Exec {
        /// Command text, e.g. `/attach add src/main.rs`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
}

impl Cli {
    /// Returns the log file path, honouring `--state-dir`.
    pub fn log_file(&self) -> PathBuf {
        match &self.state_dir {
            Some(dir) => deskchat_core::log_file_in(dir),
            None => deskchat_core::log_file(),
        }
    }

    /// Returns the workspace root with `~` expanded.
    pub fn workspace(&self) -> PathBuf {
        match &self.workspace {
            Some(path) => PathBuf::from(shellexpand::tilde(path).as_ref()),
            None => deskchat_core::workspace_dir(),
        }
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
