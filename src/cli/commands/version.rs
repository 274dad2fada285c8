//! version command - Print the program version

use crate::command::{Base, Command};
use crate::config::CommandConfig;

pub struct VersionCommand {
    base: Base,
}

impl VersionCommand {
    pub fn new() -> Self {
        Self {
            base: Base::new(
                "version",
                CommandConfig::new().short_description("print version"),
            ),
        }
    }
}

impl Default for VersionCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for VersionCommand {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn execute(&mut self) -> i32 {
        self.base.print(&format!("v{}\n", env!("CARGO_PKG_VERSION")));
        0
    }
}
