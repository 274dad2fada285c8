//! build command - Compile the named packages
//!
//! Demonstrates a leaf with a required string flag, a bool flag and exactly
//! one positional argument.

use tracing::debug;

use crate::command::{Base, Command};
use crate::config::CommandConfig;
use crate::flags::Rule;

pub struct BuildCommand {
    base: Base,
}

impl BuildCommand {
    pub fn new() -> Self {
        let mut base = Base::new(
            "build",
            CommandConfig::new()
                .short_description("compile packages and dependencies")
                .short_usage("--out output [--race] <packages>"),
        );
        base.flags_mut()
            .string_flag(
                "out",
                Some('o'),
                "",
                "write the resulting executable to the named output file",
            )
            .bool_flag("race", None, "enable data race detection")
            .positional(0, "packages", "the packages named by the import paths");
        base.flags_mut().set_rules([Rule::required("out"), Rule::number_of_args(1)]);
        Self { base }
    }
}

impl Default for BuildCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for BuildCommand {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn execute(&mut self) -> i32 {
        let flags = self.base.flags();
        let package = flags.arg(0);
        let out = flags.get_string("out").unwrap_or_default();
        debug!(package, out, race = flags.get_bool("race"), "building");

        self.base.print(&format!(
            "Build successful. package=<{}> out=<{}>\n",
            package, out
        ));
        0
    }
}
