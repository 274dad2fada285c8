//! command::parent
//!
//! Commands that own subcommands and resolve which one runs.
//!
//! # Resolution
//!
//! Given the remaining tokens:
//!
//! 1. no tokens: help for this parent
//! 2. `help [topic]`: help for the topic
//! 3. a child's name: parse the child with the rest of the tokens
//!    - success: the child runs
//!    - the child asked for help: help for the child, resolved from the
//!      *original* tokens, so `a b --help` and `a help b` render the same
//!      text
//!    - any other failure: returned unchanged
//! 4. anything else: [`CommandError::UnknownCommand`]
//!
//! Children are matched in listing order. Registration rejects duplicate
//! names, so at most one child can match; were duplicates present, the first
//! registered would win.

use tracing::debug;

use super::help::{Help, HelpState, HELP_COMMAND_NAME};
use super::usage::{align_columns, INDENT};
use super::{is_hidden, Base, CancellationToken, Command, HelpNaming, Hideable};
use crate::config::CommandConfig;
use crate::error::{CommandError, WiringError};
use crate::ui::Sink;

/// Usage hint shared by all parents.
const PARENT_SHORT_USAGE: &str = "<command> [flags] [arguments]";

/// What a successful parse selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Help,
    /// Index into [`ParentBase::children`].
    Child(usize),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum ParseState {
    #[default]
    Unparsed,
    /// The last parse failed; `attempted` is the child that rejected its tokens.
    Failed { attempted: Option<usize> },
    Resolved(Resolution),
}

/// A command owning ordered children and a help command.
pub struct ParentBase {
    base: Base,
    children: Vec<Box<dyn Command>>,
    help: Help,
    state: ParseState,
}

impl ParentBase {
    pub fn new(name: impl Into<String>, config: CommandConfig) -> Self {
        let base = Base::new(name, config);
        let mut help = Help::new();
        help.set_lineage(base.full_name());
        help.set_output_sink(base.output_sink().clone());
        help.set_error_sink(base.error_sink().clone());
        Self {
            base,
            children: Vec::new(),
            help,
            state: ParseState::Unparsed,
        }
    }

    /// Attach children after the existing ones, in order.
    ///
    /// Each child receives this parent's lineage and current sinks. Names are
    /// checked before anything is attached, so on error the parent is
    /// unchanged. A [`Root`](super::Root) is never accepted as a child.
    pub fn add_children<I>(&mut self, children: I) -> Result<&mut Self, WiringError>
    where
        I: IntoIterator<Item = Box<dyn Command>>,
    {
        let children: Vec<Box<dyn Command>> = children.into_iter().collect();

        let mut seen: Vec<&str> = self.children.iter().map(|c| c.name()).collect();
        for child in &children {
            let name = child.name();
            if child.is_root() {
                return Err(WiringError::RootAsChild {
                    parent: self.base.name().to_string(),
                    name: name.to_string(),
                });
            }
            if name == HELP_COMMAND_NAME {
                return Err(WiringError::ReservedName {
                    parent: self.base.name().to_string(),
                    name: name.to_string(),
                });
            }
            if seen.contains(&name) {
                return Err(WiringError::DuplicateName {
                    parent: self.base.name().to_string(),
                    name: name.to_string(),
                });
            }
            seen.push(name);
        }

        let lineage = self.base.full_name();
        for mut child in children {
            child.set_lineage(lineage.clone());
            child.set_output_sink(self.base.output_sink().clone());
            child.set_error_sink(self.base.error_sink().clone());
            debug!(parent = %self.base.name(), child = %child.name(), "attached");
            self.children.push(child);
        }
        Ok(self)
    }

    /// Builder form of [`ParentBase::add_children`].
    pub fn with_children<I>(mut self, children: I) -> Result<Self, WiringError>
    where
        I: IntoIterator<Item = Box<dyn Command>>,
    {
        self.add_children(children)?;
        Ok(self)
    }

    /// Children in listing order.
    pub fn children(&self) -> &[Box<dyn Command>] {
        &self.children
    }

    pub fn help(&self) -> &Help {
        &self.help
    }

    /// The selection of the last parse, if it succeeded.
    pub fn resolution(&self) -> Option<Resolution> {
        match self.state {
            ParseState::Resolved(resolution) => Some(resolution),
            _ => None,
        }
    }

    /// The command that will run, if the last parse succeeded.
    pub fn resolved(&self) -> Option<&dyn Command> {
        match self.resolution()? {
            Resolution::Help => Some(&self.help),
            Resolution::Child(index) => Some(self.children[index].as_ref()),
        }
    }

    fn find_child(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|c| c.name() == name)
    }

    fn help_state_for(&self, topic: Option<&str>) -> HelpState {
        match topic {
            None => HelpState::Target {
                name: self.base.name().to_string(),
                usage: self.usage(),
            },
            Some(topic) => match self.find_child(topic) {
                Some(index) => {
                    let child = &self.children[index];
                    HelpState::Target {
                        name: child.name().to_string(),
                        usage: child.usage(),
                    }
                }
                None => HelpState::UnknownTopic(topic.to_string()),
            },
        }
    }

    fn resolve_help(&mut self, topic: &[String]) -> Result<(), CommandError> {
        self.help.parse(topic)?;
        let state = self.help_state_for(self.help.topic());
        self.help.settle(state);
        self.state = ParseState::Resolved(Resolution::Help);
        Ok(())
    }

    /// The Commands block body, or an empty string when nothing is listed.
    fn listing(&self) -> String {
        let rows: Vec<(&str, &str)> = self
            .children
            .iter()
            .filter(|c| !is_hidden(c.as_ref()))
            .map(|c| (c.name(), c.short_description()))
            .collect();
        align_columns(&rows)
    }

    fn selected_child(&self) -> Option<usize> {
        match self.state {
            ParseState::Resolved(Resolution::Child(index))
            | ParseState::Failed {
                attempted: Some(index),
            } => Some(index),
            _ => None,
        }
    }
}

impl HelpNaming for ParentBase {
    fn full_help_command_name(&self) -> String {
        let Some(index) = self.selected_child() else {
            let mut words = self.full_name();
            words.push(HELP_COMMAND_NAME.to_string());
            return words.join(" ");
        };

        let child = &self.children[index];
        if let Some(nested) = child.as_help_naming() {
            let name = nested.full_help_command_name();
            if !name.is_empty() {
                return name;
            }
        }
        let mut words = self.help.full_name();
        words.push(child.name().to_string());
        words.join(" ")
    }
}

impl Command for ParentBase {
    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn usage(&self) -> String {
        let full_name = self.full_name().join(" ");
        let mut usage = format!(
            "\nUsage:\n\n{}{} {}\n",
            " ".repeat(INDENT),
            full_name,
            PARENT_SHORT_USAGE
        );

        let listing = self.listing();
        if !listing.is_empty() {
            usage.push_str("\nCommands:\n\n");
            usage.push_str(&listing);
        }

        usage.push_str(&format!(
            "\nUse '{} {} <command>' for more details on a command.\n",
            full_name, HELP_COMMAND_NAME
        ));
        usage
    }

    fn parse(&mut self, args: &[String]) -> Result<(), CommandError> {
        self.state = ParseState::Unparsed;

        let Some(head) = args.first() else {
            return self.resolve_help(&[]);
        };
        if head == HELP_COMMAND_NAME {
            return self.resolve_help(&args[1..]);
        }

        let Some(index) = self.find_child(head) else {
            debug!(parent = %self.base.name(), token = %head, "no matching subcommand");
            self.state = ParseState::Failed { attempted: None };
            return Err(CommandError::UnknownCommand(head.clone()));
        };

        match self.children[index].parse(&args[1..]) {
            Ok(()) => {
                debug!(parent = %self.base.name(), child = %head, "resolved subcommand");
                self.state = ParseState::Resolved(Resolution::Child(index));
                Ok(())
            }
            Err(err) if self.children[index].is_help_requested(&err) => {
                debug!(parent = %self.base.name(), child = %head, "help requested by subcommand");
                self.resolve_help(args)
            }
            Err(err) => {
                self.state = ParseState::Failed {
                    attempted: Some(index),
                };
                Err(err)
            }
        }
    }

    fn execute(&mut self) -> i32 {
        match self.state {
            ParseState::Resolved(Resolution::Help) => self.help.execute(),
            ParseState::Resolved(Resolution::Child(index)) => self.children[index].execute(),
            _ => panic!("{} executed without a successful parse", self.base.name()),
        }
    }

    fn execute_with_cancel(&mut self, cancel: &CancellationToken) -> i32 {
        match self.state {
            ParseState::Resolved(Resolution::Help) => self.help.execute_with_cancel(cancel),
            ParseState::Resolved(Resolution::Child(index)) => {
                self.children[index].execute_with_cancel(cancel)
            }
            _ => panic!("{} executed without a successful parse", self.base.name()),
        }
    }

    fn set_output_sink(&mut self, sink: Sink) {
        self.help.set_output_sink(sink.clone());
        for child in &mut self.children {
            child.set_output_sink(sink.clone());
        }
        self.base.redirect_output(sink);
    }

    fn set_error_sink(&mut self, sink: Sink) {
        self.help.set_error_sink(sink.clone());
        for child in &mut self.children {
            child.set_error_sink(sink.clone());
        }
        self.base.redirect_errors(sink);
    }

    fn set_lineage(&mut self, ancestors: Vec<String>) {
        self.base.stamp_lineage(ancestors);
        let full_name = self.base.full_name();
        self.help.set_lineage(full_name.clone());
        for child in &mut self.children {
            child.set_lineage(full_name.clone());
        }
    }

    fn as_help_naming(&self) -> Option<&dyn HelpNaming> {
        Some(self)
    }

    fn as_hideable(&self) -> Option<&dyn Hideable> {
        Some(&self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Rule;
    use crate::ui::SharedBuffer;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    /// A leaf that records whether it ran.
    struct Probe {
        base: Base,
        code: i32,
    }

    impl Probe {
        fn boxed(name: &str, description: &str) -> Box<dyn Command> {
            Box::new(Self::new(name, CommandConfig::new().short_description(description)))
        }

        fn new(name: &str, config: CommandConfig) -> Self {
            let mut base = Base::new(name, config);
            base.flags_mut().bool_flag("loud", None, "shout");
            base.flags_mut().set_rules([Rule::number_of_args(0)]);
            Self { base, code: 7 }
        }
    }

    impl Command for Probe {
        fn base(&self) -> &Base {
            &self.base
        }

        fn base_mut(&mut self) -> &mut Base {
            &mut self.base
        }

        fn execute(&mut self) -> i32 {
            self.base.print(&format!("{} ran\n", self.base.name()));
            self.code
        }
    }

    fn tree() -> (ParentBase, SharedBuffer, SharedBuffer) {
        let out = SharedBuffer::new();
        let err = SharedBuffer::new();
        let mut parent = ParentBase::new("app", CommandConfig::default())
            .with_children([
                Probe::boxed("alpha", "first command"),
                Probe::boxed("be", "second command"),
                Box::new(Probe::new(
                    "ghost",
                    CommandConfig::new().short_description("hidden").hidden(true),
                )) as Box<dyn Command>,
            ])
            .unwrap();
        parent.set_output_sink(out.sink());
        parent.set_error_sink(err.sink());
        (parent, out, err)
    }

    #[test]
    fn empty_args_resolve_to_own_help() {
        let (mut parent, out, _) = tree();
        parent.parse(&[]).unwrap();
        assert_eq!(parent.resolution(), Some(Resolution::Help));
        assert_eq!(parent.execute(), 0);
        assert_eq!(out.contents(), format!("{}\n", parent.usage()));
    }

    #[test]
    fn child_name_resolves_child() {
        let (mut parent, out, _) = tree();
        parent.parse(&tokens(&["be"])).unwrap();
        assert_eq!(parent.resolution(), Some(Resolution::Child(1)));
        assert_eq!(parent.resolved().map(|c| c.name()), Some("be"));
        assert_eq!(parent.execute(), 7);
        assert_eq!(out.contents(), "be ran\n");
    }

    #[test]
    fn hidden_child_is_invocable() {
        let (mut parent, out, _) = tree();
        parent.parse(&tokens(&["ghost"])).unwrap();
        assert_eq!(parent.execute(), 7);
        assert_eq!(out.contents(), "ghost ran\n");
    }

    #[test]
    fn unknown_token_fails_with_that_token() {
        let (mut parent, out, err) = tree();
        let e = parent.parse(&tokens(&["gamma", "x"])).unwrap_err();
        assert_eq!(e, CommandError::UnknownCommand("gamma".into()));
        assert_eq!(parent.resolution(), None);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn child_errors_propagate_unchanged() {
        let (mut parent, _, _) = tree();
        let e = parent.parse(&tokens(&["alpha", "extra"])).unwrap_err();
        assert!(e.is_validation());
        assert_eq!(e.to_string(), "accepts 0 arg(s), received 1");
        assert_eq!(parent.resolution(), None);
    }

    #[test]
    fn help_flag_on_child_becomes_help_for_child() {
        let (mut parent, _, _) = tree();
        parent.parse(&tokens(&["alpha", "--help"])).unwrap();
        assert_eq!(parent.resolution(), Some(Resolution::Help));
        assert_eq!(
            parent.help().state(),
            &HelpState::Target {
                name: "alpha".into(),
                usage: parent.children()[0].usage(),
            }
        );
    }

    #[test]
    fn help_keyword_with_topic() {
        let (mut parent, out, _) = tree();
        parent.parse(&tokens(&["help", "alpha"])).unwrap();
        assert_eq!(parent.execute(), 0);
        assert_eq!(out.contents(), format!("{}\n", parent.children()[0].usage()));
    }

    #[test]
    fn help_keyword_with_unknown_topic() {
        let (mut parent, out, err) = tree();
        parent.parse(&tokens(&["help", "zeta"])).unwrap();
        assert_eq!(parent.execute(), 2);
        assert!(out.is_empty());
        assert_eq!(
            err.contents(),
            "app help zeta: unknown help topic. Run 'app help'.\n"
        );
    }

    #[test]
    fn usage_lists_visible_children_aligned() {
        let (parent, _, _) = tree();
        assert_eq!(
            parent.usage(),
            "\nUsage:\n\n  app <command> [flags] [arguments]\n\
             \nCommands:\n\n  alpha   first command\n  be      second command\n\
             \nUse 'app help <command>' for more details on a command.\n"
        );
    }

    #[test]
    fn usage_without_visible_children_skips_listing() {
        let parent = ParentBase::new("bare", CommandConfig::default());
        assert_eq!(
            parent.usage(),
            "\nUsage:\n\n  bare <command> [flags] [arguments]\n\
             \nUse 'bare help <command>' for more details on a command.\n"
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut parent = ParentBase::new("app", CommandConfig::default());
        parent.add_children([Probe::boxed("alpha", "")]).unwrap();
        let err = parent
            .add_children([Probe::boxed("beta", ""), Probe::boxed("alpha", "")])
            .err();
        assert_eq!(
            err,
            Some(WiringError::DuplicateName {
                parent: "app".into(),
                name: "alpha".into()
            })
        );
        assert_eq!(parent.children().len(), 1);
    }

    #[test]
    fn help_name_is_reserved() {
        let err = ParentBase::new("app", CommandConfig::default())
            .with_children([Probe::boxed("help", "")])
            .err();
        assert!(matches!(err, Some(WiringError::ReservedName { .. })));
    }

    #[test]
    fn root_cannot_be_attached() {
        let mut parent = ParentBase::new("app", CommandConfig::default());
        let err = parent
            .add_children([
                Probe::boxed("alpha", ""),
                Box::new(crate::command::Root::new("sub")) as Box<dyn Command>,
            ])
            .err();
        assert_eq!(
            err,
            Some(WiringError::RootAsChild {
                parent: "app".into(),
                name: "sub".into()
            })
        );
        assert!(parent.children().is_empty());
    }

    #[test]
    fn attaching_stamps_lineage_and_cascades() {
        let inner = ParentBase::new("mod", CommandConfig::default())
            .with_children([Probe::boxed("edit", "")])
            .unwrap();
        let outer = ParentBase::new("app", CommandConfig::default())
            .with_children([Box::new(inner) as Box<dyn Command>])
            .unwrap();

        let module = &outer.children()[0];
        assert_eq!(module.full_name(), vec!["app", "mod"]);
    }

    #[test]
    fn late_children_get_current_sinks() {
        let out = SharedBuffer::new();
        let mut parent = ParentBase::new("app", CommandConfig::default());
        parent.set_output_sink(out.sink());
        parent.add_children([Probe::boxed("alpha", "")]).unwrap();

        assert!(parent.children()[0].base().output_sink().same_as(&out.sink()));
        parent.children()[0].base().print("late\n");
        assert_eq!(out.contents(), "late\n");
    }

    #[test]
    fn help_naming_tracks_the_selected_child() {
        let (mut parent, _, _) = tree();
        assert_eq!(parent.full_help_command_name(), "app help");

        let _ = parent.parse(&tokens(&["alpha", "extra"]));
        assert_eq!(parent.full_help_command_name(), "app help alpha");

        let _ = parent.parse(&tokens(&["nope"]));
        assert_eq!(parent.full_help_command_name(), "app help");
    }

    #[test]
    fn reparse_clears_previous_resolution() {
        let (mut parent, _, _) = tree();
        parent.parse(&tokens(&["alpha"])).unwrap();
        assert!(parent.parse(&tokens(&["nope"])).is_err());
        assert_eq!(parent.resolution(), None);
    }

    #[test]
    #[should_panic(expected = "app executed without a successful parse")]
    fn execute_before_parse_panics() {
        let (mut parent, _, _) = tree();
        parent.execute();
    }
}
