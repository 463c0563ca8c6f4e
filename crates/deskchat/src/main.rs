//! Deskchat entry point.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use deskchat::cli::{Cli, Commands};
use deskchat::{commands, tui};
use deskchat_host::{HostBridge, LocalHost};

fn main() {
    deskchat_core::load_env();

    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    init_tracing(&cli, interactive);

    let workspace = cli.workspace();
    tracing::info!(workspace = %workspace.display(), "Starting deskchat");
    let host: Arc<dyn HostBridge> = Arc::new(LocalHost::new(workspace.clone()));

    let result = match cli.command {
        None | Some(Commands::Tui) => tui::run(host, &workspace.display().to_string()),
        Some(cmd) => commands::execute(cmd, host.as_ref(), &mut std::io::stdout()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to the log file while the TUI owns the terminal, otherwise to stderr.
fn init_tracing(cli: &Cli, interactive: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));
    let builder = fmt().with_env_filter(filter).with_target(false);

    let log_file = if interactive {
        open_log_file(&cli.log_file())
    } else {
        None
    };

    match log_file {
        Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}
