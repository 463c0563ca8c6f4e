//! Command handlers for the non-interactive subcommands.

use std::io::Write;

use deskchat_host::HostBridge;
use tracing::info;

use crate::cli::Commands;

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Execute a CLI command, writing its output to `out`.
pub fn execute(command: Commands, host: &dyn HostBridge, out: &mut dyn Write) -> Result<()> {
    match command {
        // The TUI is started from main.
        Commands::Tui => Ok(()),
        Commands::Commands => cmd_commands(host, out),
        Commands::Ls { path } => cmd_ls(host, &path, out),
        Commands::Exec { command } => cmd_exec(host, &command.join(" "), out),
    }
}

fn cmd_commands(host: &dyn HostBridge, out: &mut dyn Write) -> Result<()> {
    for command in host.list_commands()? {
        writeln!(out, "/{:<14} {}", command.name, command.description)?;
    }
    Ok(())
}

fn cmd_ls(host: &dyn HostBridge, path: &str, out: &mut dyn Write) -> Result<()> {
    let entries = host.list_directory(path)?;
    if entries.is_empty() {
        writeln!(out, "(empty)")?;
    }
    for entry in entries {
        writeln!(out, "{}", entry.display_name())?;
    }
    Ok(())
}

fn cmd_exec(host: &dyn HostBridge, text: &str, out: &mut dyn Write) -> Result<()> {
    let text = if text.starts_with('/') {
        text.to_string()
    } else {
        format!("/{}", text)
    };

    info!(command = %text, "Executing command");
    let state = host.execute_command(&text)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&state)?)?;
    Ok(())
}
