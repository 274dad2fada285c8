//! error
//!
//! Error types shared by the command tree and the flag adapter.
//!
//! # Taxonomy
//!
//! - [`FlagError::HelpRequested`] is a control signal, not a failure: the
//!   dispatcher renders usage and exits 0.
//! - [`CommandError::UnknownCommand`] carries the token that matched no child.
//! - [`FlagError::Syntax`] and [`FlagError::Validation`] come from the flag
//!   adapter and its rule engine.
//! - [`WiringError`] is raised while the tree is assembled, before any parse.
//!
//! Unknown help topics are not errors; the help command reports them itself.
//! Leaves never print their own parse errors; only the dispatcher does.

use thiserror::Error;

pub use crate::flags::rules::ValidationError;

/// Errors produced by a flag set while parsing a token vector.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlagError {
    /// `-h` or `--help` was given.
    #[error("help requested")]
    HelpRequested,

    /// The tokens could not be parsed (unknown flag, missing value, bad int).
    #[error("{0}")]
    Syntax(String),

    /// Parsing succeeded but a declared rule rejected the result.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors surfaced by [`Command::parse`](crate::command::Command::parse).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    /// No child of a parent matched the token.
    #[error("unknown command ({0})")]
    UnknownCommand(String),

    /// The flag adapter rejected the tokens.
    #[error(transparent)]
    Flag(#[from] FlagError),
}

impl CommandError {
    /// Check if this error is the "help requested" control signal.
    pub fn is_help_requested(&self) -> bool {
        matches!(self, CommandError::Flag(FlagError::HelpRequested))
    }

    /// Check if this error came from a validation rule.
    pub fn is_validation(&self) -> bool {
        matches!(self, CommandError::Flag(FlagError::Validation(_)))
    }
}

/// Errors raised while attaching children to a parent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WiringError {
    /// Two siblings share a name.
    #[error("command '{parent}' already has a child named '{name}'")]
    DuplicateName { parent: String, name: String },

    /// A child tried to take the help command's name.
    #[error("'{name}' is reserved for the help command of '{parent}'")]
    ReservedName { parent: String, name: String },

    /// A root command was offered as a child; roots have no parent.
    #[error("root command '{name}' cannot be attached to '{parent}'")]
    RootAsChild { parent: String, name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_carries_token() {
        let err = CommandError::UnknownCommand("frobnicate".into());
        assert_eq!(err.to_string(), "unknown command (frobnicate)");
        assert!(!err.is_help_requested());
    }

    #[test]
    fn help_requested_classification() {
        let err = CommandError::from(FlagError::HelpRequested);
        assert!(err.is_help_requested());
        assert!(!err.is_validation());
    }

    #[test]
    fn validation_errors_are_transparent() {
        let err = CommandError::from(FlagError::from(ValidationError::MissingRequired {
            flag: "out".into(),
        }));
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "required flag --out is not set");
    }

    #[test]
    fn wiring_error_names_both_commands() {
        let err = WiringError::DuplicateName {
            parent: "mod".into(),
            name: "edit".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("mod"));
        assert!(msg.contains("edit"));
    }

    #[test]
    fn root_as_child_message() {
        let err = WiringError::RootAsChild {
            parent: "app".into(),
            name: "sub".into(),
        };
        assert_eq!(err.to_string(), "root command 'sub' cannot be attached to 'app'");
    }
}
