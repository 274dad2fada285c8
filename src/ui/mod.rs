//! ui
//!
//! Output plumbing for commands.
//!
//! # Modules
//!
//! - [`sink`] - Reassignable output/error destinations and capture buffers
//!
//! # Design
//!
//! Commands never write to the process streams directly. Every command holds
//! an output sink and an error sink, which default to stdout and stderr and
//! are reassigned by parents (cascading) or by tests.

pub mod sink;

pub use sink::{SharedBuffer, Sink};
