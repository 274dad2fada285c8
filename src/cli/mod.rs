//! cli
//!
//! The `example` program: a small command tree driven by the engine.
//!
//! # Responsibilities
//!
//! - Assemble the tree (`version`, `build`, `mod edit`)
//! - Hand `argv[1..]` to the root and return its exit code
//! - Does NOT print parse errors itself; the dispatcher does

pub mod commands;

use anyhow::{Context, Result};

use crate::command::{Command, Root};
use crate::error::WiringError;
use commands::{new_mod_command, BuildCommand, VersionCommand};

/// Program name, used as the root command's name.
pub const PROGRAM_NAME: &str = "example";

/// Build the full command tree.
pub fn new_root_command() -> Result<Root, WiringError> {
    Root::new(PROGRAM_NAME).with_children([
        Box::new(VersionCommand::new()) as Box<dyn Command>,
        Box::new(BuildCommand::new()),
        Box::new(new_mod_command()?),
    ])
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<i32> {
    let mut root = new_root_command().context("failed to assemble the command tree")?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    Ok(root.parse_and_execute(&args))
}
