//! command::base
//!
//! Shared plumbing composed into every command.
//!
//! A [`Base`] holds a command's identity, descriptive config, sinks, lineage
//! and flag set. On its own it is a leaf with no behaviour: parsing works,
//! executing panics.

use tracing::trace;

use super::usage::{indent_continuation, INDENT};
use super::{Command, Hideable};
use crate::config::CommandConfig;
use crate::error::CommandError;
use crate::flags::FlagSet;
use crate::ui::Sink;

/// Identity, sinks, lineage and flags of a command.
#[derive(Debug, Clone)]
pub struct Base {
    name: String,
    config: CommandConfig,
    out: Sink,
    err: Sink,
    lineage: Vec<String>,
    flags: FlagSet,
}

impl Base {
    /// A detached command writing to stdout/stderr.
    pub fn new(name: impl Into<String>, config: CommandConfig) -> Self {
        let name = name.into();
        Self {
            flags: FlagSet::new(name.clone()),
            name,
            config,
            out: Sink::stdout(),
            err: Sink::stderr(),
            lineage: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_description(&self) -> &str {
        &self.config.short_description
    }

    pub fn short_usage(&self) -> &str {
        &self.config.short_usage
    }

    pub fn config(&self) -> &CommandConfig {
        &self.config
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    /// Declare flags, positional slots and rules.
    pub fn flags_mut(&mut self) -> &mut FlagSet {
        &mut self.flags
    }

    pub fn output_sink(&self) -> &Sink {
        &self.out
    }

    pub fn error_sink(&self) -> &Sink {
        &self.err
    }

    /// Write to the output sink.
    pub fn print(&self, msg: &str) {
        self.out.write_str(msg);
    }

    /// Write to the error sink.
    pub fn print_error(&self, msg: &str) {
        self.err.write_str(msg);
    }

    pub(crate) fn redirect_output(&mut self, sink: Sink) {
        self.out = sink;
    }

    pub(crate) fn redirect_errors(&mut self, sink: Sink) {
        self.err = sink;
    }

    /// Names of the ancestors, root first. Empty for a detached command.
    pub fn lineage(&self) -> &[String] {
        &self.lineage
    }

    pub(crate) fn stamp_lineage(&mut self, ancestors: Vec<String>) {
        trace!(command = %self.name, ?ancestors, "lineage stamped");
        self.lineage = ancestors;
    }

    pub fn full_name(&self) -> Vec<String> {
        let mut names = self.lineage.clone();
        names.push(self.name.clone());
        names
    }

    /// First usage line: indented full name followed by the usage hint.
    pub fn usage_line(&self) -> String {
        let mut line = format!("{}{}", " ".repeat(INDENT), self.full_name().join(" "));
        if !self.config.short_usage.is_empty() {
            line.push(' ');
            line.push_str(&indent_continuation(&self.config.short_usage, INDENT));
        }
        line
    }

    /// Usage text of a leaf: header, then the flags and arguments sections
    /// when they are non-empty.
    pub fn leaf_usage(&self) -> String {
        let mut usage = format!("\nUsage:\n\n{}\n", self.usage_line());

        let flags = self.flags.flag_usages();
        if !flags.is_empty() {
            usage.push_str("\nFlags:\n\n");
            usage.push_str(&flags);
        }

        let args = self.flags.arg_usages();
        if !args.is_empty() {
            usage.push_str("\nArguments:\n\n");
            usage.push_str(&args);
        }
        usage
    }

    pub(crate) fn parse_flags(&mut self, args: &[String]) -> Result<(), CommandError> {
        self.flags.parse(args)?;
        Ok(())
    }

    pub(crate) fn not_implemented(&self) -> ! {
        panic!("{} is not implemented", self.name)
    }
}

impl Hideable for Base {
    fn hidden(&self) -> bool {
        self.config.hidden
    }
}

/// A bare base is a leaf without behaviour.
impl Command for Base {
    fn base(&self) -> &Base {
        self
    }

    fn base_mut(&mut self) -> &mut Base {
        self
    }
}
