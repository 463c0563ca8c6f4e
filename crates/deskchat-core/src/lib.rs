//! Deskchat Core - shared pieces used by the host and the terminal front-end.
//!
//! - **config**: State, log and config directory resolution plus `.env.local` loading
//! - **path**: Joining of user-typed path fragments for autocompletion

pub mod config;
pub mod path;

pub use config::{
    config_dir, env_file, load_env, log_file, log_file_in, logs_dir, state_dir, workspace_dir,
};
pub use path::join;
