//! command
//!
//! The command tree: a uniform [`Command`] contract and its variants.
//!
//! # Variants
//!
//! - Leaf: any type composing a [`Base`]; declares flags and implements
//!   [`Command::execute`]
//! - [`ParentBase`]: owns ordered children plus a [`Help`] and resolves which
//!   one runs
//! - [`Help`]: prints the usage of its owner or one of the owner's children
//! - [`Root`]: the entry point, turning an argument vector into an exit code
//!
//! # Architecture
//!
//! Every variant composes a [`Base`] holding the shared plumbing (identity,
//! sinks, lineage, flags). The trait's default methods forward to it, and
//! each variant overrides only what it specializes. Ownership runs from
//! parent to child; a child only knows the names of its ancestors, stamped
//! when it is attached.
//!
//! # Invariants
//!
//! - A command's name never changes and is the only token a parent matches
//! - A command can be attached to at most one parent (it is moved in)
//! - Sink and lineage changes on a parent cascade to its whole subtree
//! - Parse errors are never printed below the dispatcher
//!
//! # Example
//!
//! ```
//! use cmdtree::command::{Base, Command, Root};
//! use cmdtree::config::CommandConfig;
//! use cmdtree::ui::SharedBuffer;
//!
//! struct Hello {
//!     base: Base,
//! }
//!
//! impl Command for Hello {
//!     fn base(&self) -> &Base {
//!         &self.base
//!     }
//!
//!     fn base_mut(&mut self) -> &mut Base {
//!         &mut self.base
//!     }
//!
//!     fn execute(&mut self) -> i32 {
//!         self.base.print("hello\n");
//!         0
//!     }
//! }
//!
//! let hello = Hello {
//!     base: Base::new("hello", CommandConfig::new().short_description("say hello")),
//! };
//! let mut root = Root::new("app").with_children([Box::new(hello) as Box<dyn Command>]).unwrap();
//!
//! let out = SharedBuffer::new();
//! root.set_output_sink(out.sink());
//! assert_eq!(root.parse_and_execute(&["hello".to_string()]), 0);
//! assert_eq!(out.contents(), "hello\n");
//! ```

pub mod base;
pub mod help;
pub mod parent;
pub mod root;
pub mod run;
pub mod usage;

pub use base::Base;
pub use help::{Help, HelpState, HELP_COMMAND_NAME};
pub use parent::{ParentBase, Resolution};
pub use root::Root;
pub use run::{run_command, run_command_with_cancel};
pub use tokio_util::sync::CancellationToken;

use crate::error::CommandError;
use crate::ui::Sink;

/// Exit code for success, including "help was displayed".
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for parse errors, unknown commands and unknown help topics.
pub const EXIT_USAGE: i32 = 2;

/// Commands that can name the help invocation matching their last parse.
pub trait HelpNaming {
    /// E.g. `app help build`, or `app mod help edit` for a nested failure.
    fn full_help_command_name(&self) -> String;
}

/// Commands that can be left out of their parent's listing.
pub trait Hideable {
    fn hidden(&self) -> bool;
}

/// The contract every node of the tree satisfies.
pub trait Command {
    /// The composed shared plumbing.
    fn base(&self) -> &Base;

    fn base_mut(&mut self) -> &mut Base;

    fn name(&self) -> &str {
        self.base().name()
    }

    fn short_description(&self) -> &str {
        self.base().short_description()
    }

    /// Fully rendered help text for this command alone.
    fn usage(&self) -> String {
        self.base().leaf_usage()
    }

    /// Consume the remaining argument vector.
    fn parse(&mut self, args: &[String]) -> Result<(), CommandError> {
        self.base_mut().parse_flags(args)
    }

    /// Whether `err`, returned by this command's `parse`, means "show help".
    fn is_help_requested(&self, err: &CommandError) -> bool {
        err.is_help_requested()
    }

    /// Run the command's behaviour and return its exit code.
    ///
    /// # Panics
    ///
    /// The default panics: a leaf that never overrides `execute` (or
    /// `execute_with_cancel`) is a wiring defect.
    fn execute(&mut self) -> i32 {
        self.base().not_implemented()
    }

    /// Same as [`Command::execute`] for behaviour that observes cancellation.
    ///
    /// Cancellation is advisory: the default ignores the token.
    fn execute_with_cancel(&mut self, cancel: &CancellationToken) -> i32 {
        let _ = cancel;
        self.execute()
    }

    fn set_output_sink(&mut self, sink: Sink) {
        self.base_mut().redirect_output(sink);
    }

    fn set_error_sink(&mut self, sink: Sink) {
        self.base_mut().redirect_errors(sink);
    }

    /// Record the names of this command's ancestors, root first.
    ///
    /// Called by the parent while wiring; not meant for direct use.
    fn set_lineage(&mut self, ancestors: Vec<String>) {
        self.base_mut().stamp_lineage(ancestors);
    }

    /// Names from the root down to this command, this command last.
    fn full_name(&self) -> Vec<String> {
        self.base().full_name()
    }

    /// Whether this command is the entry point of a tree. Roots are refused
    /// as children.
    fn is_root(&self) -> bool {
        false
    }

    fn as_help_naming(&self) -> Option<&dyn HelpNaming> {
        None
    }

    fn as_hideable(&self) -> Option<&dyn Hideable> {
        Some(self.base())
    }
}

/// Whether `cmd` is hidden from listings.
pub fn is_hidden(cmd: &dyn Command) -> bool {
    cmd.as_hideable().map(|h| h.hidden()).unwrap_or(false)
}
