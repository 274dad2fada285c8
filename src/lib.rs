//! cmdtree - A command-tree execution engine for CLI programs
//!
//! cmdtree turns a flat argument vector into a walk down a tree of nested
//! subcommands, runs the command it lands on, synthesizes usage and help text
//! from the tree, and translates parse and validation failures into exit
//! codes and one consistent error message.
//!
//! # Architecture
//!
//! - [`command`] - The `Command` contract, parents, help, root and dispatcher
//! - [`flags`] - Flag and positional-argument adapter with validation rules
//! - [`config`] - Per-command descriptive metadata
//! - [`error`] - Error taxonomy shared across the tree
//! - [`ui`] - Output and error sinks
//! - [`testing`] - In-process harness capturing a command's output
//! - [`cli`] - The `example` demo program
//!
//! # Exit codes
//!
//! - `0` on success, including when help was displayed
//! - `2` on parse errors, unknown commands and unknown help topics
//! - anything a leaf's `execute` returns, verbatim

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod flags;
pub mod testing;
pub mod ui;
