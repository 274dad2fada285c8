//! mod command - Module maintenance, grouping the `edit` subcommand
//!
//! `mod` is a parent: it has no behaviour of its own and only resolves to
//! one of its children or to its help.

use crate::command::{Base, Command, ParentBase};
use crate::config::CommandConfig;
use crate::error::WiringError;
use crate::flags::Rule;

/// Build `mod` with its children attached.
pub fn new_mod_command() -> Result<ParentBase, WiringError> {
    ParentBase::new(
        "mod",
        CommandConfig::new().short_description("provides access to operations on modules."),
    )
    .with_children([Box::new(EditCommand::new()) as Box<dyn Command>])
}

/// Edits a module file in one of three mutually exclusive modes.
pub struct EditCommand {
    base: Base,
}

impl EditCommand {
    pub fn new() -> Self {
        let mut base = Base::new(
            "edit",
            CommandConfig::new()
                .short_description("edit a file from tools or scripts")
                .short_usage("[--fmt|--print|--json]"),
        );
        base.flags_mut()
            .bool_flag("fmt", None, "reformats the file without making other changes")
            .bool_flag("print", None, "prints the file in its text format")
            .bool_flag("json", None, "prints the file in JSON format");
        base.flags_mut().set_rules([
            Rule::number_of_args(0),
            Rule::mutually_exclusive(["fmt", "print", "json"]),
        ]);
        Self { base }
    }
}

impl Default for EditCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for EditCommand {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn execute(&mut self) -> i32 {
        let flags = self.base.flags();
        let msg = if flags.get_bool("fmt") {
            "formatted!!"
        } else if flags.get_bool("print") {
            "printed in text format!!"
        } else if flags.get_bool("json") {
            "printed in JSON format!!"
        } else {
            "edited!!"
        };
        self.base.print(&format!("{}\n", msg));
        0
    }
}
