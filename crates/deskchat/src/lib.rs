//! Deskchat terminal front-end.
//!
//! This crate provides the command-line entry points and the chat TUI
//! with slash-command autocompletion.

pub mod cli;
pub mod commands;
pub mod tui;
