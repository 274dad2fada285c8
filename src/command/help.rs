//! command::help
//!
//! The synthetic `help` command attached to every parent.
//!
//! # States
//!
//! ```text
//! Unresolved --parse+settle--> Target { name, usage }
//!            \--parse+settle--> UnknownTopic(topic)
//! ```
//!
//! `parse` only records the topic and never fails. The owning parent then
//! settles the state, because only the parent can see its siblings. The
//! target's usage is rendered at that point, after wiring is complete.

use tracing::debug;

use super::{Base, Command, EXIT_SUCCESS, EXIT_USAGE};
use crate::config::CommandConfig;
use crate::error::CommandError;

/// The reserved name of the help command.
pub const HELP_COMMAND_NAME: &str = "help";

/// What a help invocation resolved to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HelpState {
    #[default]
    Unresolved,
    /// Print this usage text.
    Target { name: String, usage: String },
    /// The topic matched nothing.
    UnknownTopic(String),
}

/// Prints the usage of its owner or of one of the owner's children.
#[derive(Debug, Clone)]
pub struct Help {
    base: Base,
    topic: Option<String>,
    state: HelpState,
}

impl Default for Help {
    fn default() -> Self {
        Self::new()
    }
}

impl Help {
    pub fn new() -> Self {
        Self {
            base: Base::new(HELP_COMMAND_NAME, CommandConfig::default()),
            topic: None,
            state: HelpState::Unresolved,
        }
    }

    /// The topic recorded by the last parse; `None` means "the owner".
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn state(&self) -> &HelpState {
        &self.state
    }

    pub(crate) fn settle(&mut self, state: HelpState) {
        debug!(
            help = %self.full_name().join(" "),
            topic = ?self.topic,
            resolved = state_label(&state),
            "help settled"
        );
        self.state = state;
    }
}

fn state_label(state: &HelpState) -> &str {
    match state {
        HelpState::Unresolved => "unresolved",
        HelpState::Target { name, .. } => name,
        HelpState::UnknownTopic(_) => "unknown topic",
    }
}

impl Command for Help {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn usage(&self) -> String {
        String::new()
    }

    fn parse(&mut self, args: &[String]) -> Result<(), CommandError> {
        self.topic = args.first().cloned();
        self.state = HelpState::Unresolved;
        Ok(())
    }

    fn is_help_requested(&self, _err: &CommandError) -> bool {
        false
    }

    fn execute(&mut self) -> i32 {
        match &self.state {
            HelpState::Target { usage, .. } => {
                self.base.print(&format!("{}\n", usage));
                EXIT_SUCCESS
            }
            HelpState::UnknownTopic(topic) => {
                let full_name = self.full_name().join(" ");
                self.base.print_error(&format!(
                    "{} {}: unknown help topic. Run '{}'.\n",
                    full_name, topic, full_name
                ));
                EXIT_USAGE
            }
            HelpState::Unresolved => panic!(
                "{} executed before it was resolved",
                self.full_name().join(" ")
            ),
        }
    }
}
