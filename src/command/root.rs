//! command::root
//!
//! The entry point of a tree. A [`Root`] is a parent with no parent of its
//! own that turns a whole argument vector into an exit code.

use tracing::warn;

use super::parent::ParentBase;
use super::run::{run_command, run_command_with_cancel};
use super::{Base, CancellationToken, Command, HelpNaming, Hideable};
use crate::config::CommandConfig;
use crate::error::{CommandError, WiringError};
use crate::ui::Sink;

pub struct Root {
    inner: ParentBase,
}

impl Root {
    /// A root named after the program, e.g. `example`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, CommandConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: CommandConfig) -> Self {
        Self {
            inner: ParentBase::new(name, config),
        }
    }

    /// See [`ParentBase::add_children`].
    pub fn add_children<I>(&mut self, children: I) -> Result<&mut Self, WiringError>
    where
        I: IntoIterator<Item = Box<dyn Command>>,
    {
        self.inner.add_children(children)?;
        Ok(self)
    }

    pub fn with_children<I>(mut self, children: I) -> Result<Self, WiringError>
    where
        I: IntoIterator<Item = Box<dyn Command>>,
    {
        self.add_children(children)?;
        Ok(self)
    }

    pub fn children(&self) -> &[Box<dyn Command>] {
        self.inner.children()
    }

    /// Resolve `args` (without the program name) and run the result.
    pub fn parse_and_execute(&mut self, args: &[String]) -> i32 {
        run_command(self, args)
    }

    pub fn parse_and_execute_with_cancel(
        &mut self,
        cancel: &CancellationToken,
        args: &[String],
    ) -> i32 {
        run_command_with_cancel(self, args, cancel)
    }
}

impl Command for Root {
    fn base(&self) -> &Base {
        self.inner.base()
    }

    fn base_mut(&mut self) -> &mut Base {
        self.inner.base_mut()
    }

    fn usage(&self) -> String {
        self.inner.usage()
    }

    fn parse(&mut self, args: &[String]) -> Result<(), CommandError> {
        self.inner.parse(args)
    }

    fn is_help_requested(&self, err: &CommandError) -> bool {
        self.inner.is_help_requested(err)
    }

    fn execute(&mut self) -> i32 {
        self.inner.execute()
    }

    fn execute_with_cancel(&mut self, cancel: &CancellationToken) -> i32 {
        self.inner.execute_with_cancel(cancel)
    }

    fn set_output_sink(&mut self, sink: Sink) {
        self.inner.set_output_sink(sink);
    }

    fn set_error_sink(&mut self, sink: Sink) {
        self.inner.set_error_sink(sink);
    }

    fn is_root(&self) -> bool {
        true
    }

    /// A root has no ancestors; the call is ignored.
    fn set_lineage(&mut self, ancestors: Vec<String>) {
        warn!(root = %self.name(), ?ancestors, "ignoring lineage for a root command");
    }

    fn as_help_naming(&self) -> Option<&dyn HelpNaming> {
        Some(&self.inner)
    }

    fn as_hideable(&self) -> Option<&dyn Hideable> {
        self.inner.as_hideable()
    }
}
