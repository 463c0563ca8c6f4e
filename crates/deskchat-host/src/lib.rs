//! Host bridge for Deskchat.
//!
//! The chat front-end talks to its host through [`HostBridge`]:
//! - List workspace directories for path autocompletion
//! - List the slash commands the host understands
//! - Execute a slash command and return the resulting view state
//! - Read workspace files for message context
//!
//! [`LocalHost`] implements the bridge against a directory on disk.
//!
//! # Example
//!
//! ```no_run
//! use deskchat_host::{HostBridge, LocalHost};
//!
//! let host = LocalHost::new(".");
//! for entry in host.list_directory(".").unwrap() {
//!     println!("{}", entry.display_name());
//! }
//!
//! let state = host.execute_command("/attach add Cargo.toml").unwrap();
//! println!("attached: {:?}", state.attached_files);
//! ```

pub mod bridge;
pub mod error;
pub mod local;
pub mod tools;

pub use bridge::{CommandInfo, FileEntry, HostBridge, UiState};
pub use error::{HostError, Result};
pub use local::LocalHost;
