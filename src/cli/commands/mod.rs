//! cli::commands
//!
//! Commands of the `example` program.
//!
//! # Architecture
//!
//! Each leaf composes a [`Base`](crate::command::Base), declares its flags
//! and rules in `new`, and implements `execute`. Parents are assembled by a
//! `new_*_command` function because attaching children can fail.

mod build;
mod mod_cmd;
mod version;

pub use build::BuildCommand;
pub use mod_cmd::{new_mod_command, EditCommand};
pub use version::VersionCommand;
