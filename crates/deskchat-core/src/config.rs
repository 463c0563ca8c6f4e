//! Shared configuration for Deskchat.
//!
//! Provides functions to locate Deskchat's state directory, its log and
//! config subdirectories, and the workspace the host serves files from.
//!
//! # Storage Structure
//!
//! ```text
//! ~/.deskchat/
//! ├── logs/         # deskchat.log
//! └── config/       # .env.local
//! ```
//!
//! # Environment Variables
//!
//! - `DESKCHAT_STATE_DIR`: Override the base state directory
//! - `DESKCHAT_LOG_DIR`: Override the log directory
//! - `DESKCHAT_CONFIG_DIR`: Override the config directory
//! - `DESKCHAT_WORKSPACE`: Directory the host lists and reads files from

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "DESKCHAT_STATE_DIR";

/// Environment variable for custom log directory.
pub const LOG_DIR_ENV: &str = "DESKCHAT_LOG_DIR";

/// Environment variable for custom config directory.
pub const CONFIG_DIR_ENV: &str = "DESKCHAT_CONFIG_DIR";

/// Environment variable for the workspace root.
pub const WORKSPACE_ENV: &str = "DESKCHAT_WORKSPACE";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".deskchat";

const LOGS_SUBDIR: &str = "logs";
const CONFIG_SUBDIR: &str = "config";
const LOG_FILE_NAME: &str = "deskchat.log";

static STATE_DIR_CACHE: OnceLock<PathBuf> = OnceLock::new();

/// Get the Deskchat state directory.
///
/// The state directory is determined by:
/// 1. `DESKCHAT_STATE_DIR` environment variable if set
/// 2. `~/.deskchat` if home directory is available
/// 3. `.deskchat` in current directory as fallback
pub fn state_dir() -> PathBuf {
    STATE_DIR_CACHE
        .get_or_init(|| {
            std::env::var(STATE_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    dirs::home_dir()
                        .map(|h| h.join(DEFAULT_STATE_DIR))
                        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
                })
        })
        .clone()
}

/// Get the logs directory.
///
/// Defaults to `~/.deskchat/logs/` or `DESKCHAT_LOG_DIR` env var.
pub fn logs_dir() -> PathBuf {
    std::env::var(LOG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir().join(LOGS_SUBDIR))
}

/// Get the log file path.
pub fn log_file() -> PathBuf {
    logs_dir().join(LOG_FILE_NAME)
}

/// Log file path for an explicit state directory.
pub fn log_file_in(state_dir: &Path) -> PathBuf {
    state_dir.join(LOGS_SUBDIR).join(LOG_FILE_NAME)
}

/// Get the user config directory.
///
/// Defaults to `~/.deskchat/config/` or `DESKCHAT_CONFIG_DIR` env var.
pub fn config_dir() -> PathBuf {
    std::env::var(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir().join(CONFIG_SUBDIR))
}

/// Get the .env.local file path.
pub fn env_file() -> PathBuf {
    config_dir().join(".env.local")
}

/// Get the workspace directory the host serves.
///
/// `DESKCHAT_WORKSPACE` if set, otherwise the current directory.
pub fn workspace_dir() -> PathBuf {
    std::env::var(WORKSPACE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Load `.env.local` files into the process environment.
///
/// The config directory copy is read first, then a local `./.env.local`.
/// Existing variables are never overridden.
pub fn load_env() {
    let env_path = env_file();
    if env_path.exists() {
        if let Err(e) = dotenvy::from_path(&env_path) {
            tracing::warn!(path = %env_path.display(), error = %e, "Failed to load env file");
        }
    }
    let _ = dotenvy::from_filename(".env.local");
}
