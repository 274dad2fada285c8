//! flags
//!
//! Flag and positional-argument adapter for leaf commands.
//!
//! # Design
//!
//! A [`FlagSet`] is declared once when a command is constructed: typed flags
//! (bool, string, int) with optional shorthands and defaults, indexed
//! positional slots with usage text, and a list of validation [`Rule`]s.
//! Token parsing is delegated to `clap`; this module only translates the
//! declarations into a `clap::Command`, copies the matches into typed
//! storage, and runs the rules.
//!
//! `-h` / `--help` is reported as [`FlagError::HelpRequested`] so the command
//! tree can turn it into a help invocation. Declaring a flag named `help` or
//! with the `h` shorthand panics.
//!
//! Value-taking flags consume the next token even when it starts with `-`
//! (so `--count -5` works), and a repeated flag keeps its last value.
//!
//! # Example
//!
//! ```
//! use cmdtree::flags::{FlagSet, Rule};
//!
//! let mut fs = FlagSet::new("build");
//! fs.string_flag("out", Some('o'), "", "write the output to this file")
//!     .bool_flag("race", None, "enable data race detection")
//!     .positional(0, "packages", "the packages to build");
//! fs.set_rules([Rule::required("out"), Rule::number_of_args(1)]);
//!
//! let args: Vec<String> = ["-o", "bin", "./..."].iter().map(|s| s.to_string()).collect();
//! fs.parse(&args).unwrap();
//! assert_eq!(fs.get_string("out"), Some("bin"));
//! assert!(!fs.get_bool("race"));
//! assert_eq!(fs.arg(0), "./...");
//! ```

pub mod rules;

pub use rules::{Rule, ValidationError};

use std::collections::{BTreeMap, BTreeSet, HashMap};

use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgAction, ColorChoice};
use tracing::trace;

use crate::command::usage::align_columns;
use crate::error::FlagError;

/// Internal id of the catch-all positional argument.
const POSITIONALS: &str = "__positionals";

const HELP_FLAG: &str = "help";
const HELP_SHORT: char = 'h';

/// The value type of a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Bool,
    String,
    Int,
}

/// Typed storage for a flag's current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Bool(bool),
    String(String),
    Int(i64),
}

/// A declared flag.
#[derive(Debug, Clone)]
pub struct FlagSpec {
    pub name: String,
    pub short: Option<char>,
    pub kind: FlagKind,
    pub usage: String,
    pub default: FlagValue,
}

impl FlagSpec {
    /// Left column of the flag listing, e.g. `-o, --out string`.
    fn signature(&self) -> String {
        let mut sig = match self.short {
            Some(short) => format!("-{}, --{}", short, self.name),
            None => format!("    --{}", self.name),
        };
        match self.kind {
            FlagKind::Bool => {}
            FlagKind::String => sig.push_str(" string"),
            FlagKind::Int => sig.push_str(" int"),
        }
        sig
    }

    /// Right column of the flag listing, with the default when it is not zero.
    fn description(&self) -> String {
        match &self.default {
            FlagValue::String(d) if !d.is_empty() => format!("{} (default {:?})", self.usage, d),
            FlagValue::Int(d) if *d != 0 => format!("{} (default {})", self.usage, d),
            _ => self.usage.clone(),
        }
    }
}

/// A declared positional argument slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgSpec {
    pub index: usize,
    pub name: String,
    pub usage: String,
}

/// Flags, positional slots and validation rules of one command.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    name: String,
    specs: Vec<FlagSpec>,
    args: BTreeMap<usize, ArgSpec>,
    rules: Vec<Rule>,
    values: HashMap<String, FlagValue>,
    given: BTreeSet<String>,
    positionals: Vec<String>,
}

impl FlagSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// # Panics
    ///
    /// When the flag takes the name `help` or the shorthand `h`, which are
    /// reserved for help requests. This is a wiring defect, not user input.
    fn declare(&mut self, spec: FlagSpec) -> &mut Self {
        assert!(
            spec.name != HELP_FLAG && spec.short != Some(HELP_SHORT),
            "flag set {}: --{} collides with the reserved -h/--help flag",
            self.name,
            spec.name
        );
        self.values.insert(spec.name.clone(), spec.default.clone());
        self.specs.push(spec);
        self
    }

    /// Declare a boolean flag (false unless given).
    pub fn bool_flag(&mut self, name: &str, short: Option<char>, usage: &str) -> &mut Self {
        self.declare(FlagSpec {
            name: name.to_string(),
            short,
            kind: FlagKind::Bool,
            usage: usage.to_string(),
            default: FlagValue::Bool(false),
        })
    }

    /// Declare a string flag.
    pub fn string_flag(
        &mut self,
        name: &str,
        short: Option<char>,
        default: &str,
        usage: &str,
    ) -> &mut Self {
        self.declare(FlagSpec {
            name: name.to_string(),
            short,
            kind: FlagKind::String,
            usage: usage.to_string(),
            default: FlagValue::String(default.to_string()),
        })
    }

    /// Declare an integer flag.
    pub fn int_flag(&mut self, name: &str, short: Option<char>, default: i64, usage: &str) -> &mut Self {
        self.declare(FlagSpec {
            name: name.to_string(),
            short,
            kind: FlagKind::Int,
            usage: usage.to_string(),
            default: FlagValue::Int(default),
        })
    }

    /// Declare the positional argument at `index`.
    ///
    /// Redeclaring an index replaces the previous slot.
    pub fn positional(&mut self, index: usize, name: &str, usage: &str) -> &mut Self {
        self.args.insert(
            index,
            ArgSpec {
                index,
                name: name.to_string(),
                usage: usage.to_string(),
            },
        );
        self
    }

    /// Replace the validation rules.
    pub fn set_rules(&mut self, rules: impl IntoIterator<Item = Rule>) {
        self.rules = rules.into_iter().collect();
    }

    pub fn specs(&self) -> &[FlagSpec] {
        &self.specs
    }

    pub fn arg_specs(&self) -> impl Iterator<Item = &ArgSpec> {
        self.args.values()
    }

    fn command(&self) -> clap::Command {
        let mut cmd = clap::Command::new(self.name.clone())
            .no_binary_name(true)
            .disable_version_flag(true)
            .args_override_self(true)
            .color(ColorChoice::Never)
            .arg(
                Arg::new(POSITIONALS)
                    .num_args(0..)
                    .action(ArgAction::Append)
                    .value_parser(value_parser!(String)),
            );

        for spec in &self.specs {
            let mut arg = Arg::new(spec.name.clone())
                .long(spec.name.clone())
                .help(spec.usage.clone());
            if let Some(short) = spec.short {
                arg = arg.short(short);
            }
            arg = match spec.kind {
                FlagKind::Bool => arg.action(ArgAction::SetTrue),
                FlagKind::String => arg
                    .action(ArgAction::Set)
                    .allow_hyphen_values(true)
                    .value_parser(value_parser!(String)),
                FlagKind::Int => arg
                    .action(ArgAction::Set)
                    .allow_negative_numbers(true)
                    .value_parser(value_parser!(i64)),
            };
            cmd = cmd.arg(arg);
        }
        cmd
    }

    fn reset(&mut self) {
        self.given.clear();
        self.positionals.clear();
        for spec in &self.specs {
            self.values.insert(spec.name.clone(), spec.default.clone());
        }
    }

    /// Parse `tokens`, store the values, then run the validation rules.
    ///
    /// Every call starts from the declared defaults.
    pub fn parse(&mut self, tokens: &[String]) -> Result<(), FlagError> {
        self.reset();

        let matches = self
            .command()
            .try_get_matches_from(tokens)
            .map_err(|err| match err.kind() {
                ErrorKind::DisplayHelp => FlagError::HelpRequested,
                _ => FlagError::Syntax(summarize(&err)),
            })?;

        for spec in &self.specs {
            let id = spec.name.as_str();
            if matches.value_source(id) == Some(ValueSource::CommandLine) {
                self.given.insert(spec.name.clone());
            }
            let value = match spec.kind {
                FlagKind::Bool => FlagValue::Bool(matches.get_flag(id)),
                FlagKind::String => matches
                    .get_one::<String>(id)
                    .map(|v| FlagValue::String(v.clone()))
                    .unwrap_or_else(|| spec.default.clone()),
                FlagKind::Int => matches
                    .get_one::<i64>(id)
                    .map(|v| FlagValue::Int(*v))
                    .unwrap_or_else(|| spec.default.clone()),
            };
            self.values.insert(spec.name.clone(), value);
        }

        self.positionals = matches
            .get_many::<String>(POSITIONALS)
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default();

        trace!(
            flag_set = %self.name,
            given = ?self.given,
            positionals = self.positionals.len(),
            "parsed flags"
        );

        for rule in &self.rules {
            rule.check(self)?;
        }
        Ok(())
    }

    /// Whether the flag appeared on the command line in the last parse.
    pub fn is_set(&self, name: &str) -> bool {
        self.given.contains(name)
    }

    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.values.get(name)
    }

    /// Value of a bool flag; false for unknown names.
    pub fn get_bool(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(FlagValue::Bool(true)))
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(FlagValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(FlagValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    /// All positional tokens from the last parse.
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// The positional token at `index`, or `""` when fewer were given.
    pub fn arg(&self, index: usize) -> &str {
        self.positionals
            .get(index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Flag listing for usage text; empty when no flags are declared.
    pub fn flag_usages(&self) -> String {
        let rows: Vec<(String, String)> = self
            .specs
            .iter()
            .map(|spec| (spec.signature(), spec.description()))
            .collect();
        align_columns(&rows)
    }

    /// Positional argument listing for usage text, in index order.
    pub fn arg_usages(&self) -> String {
        let rows: Vec<(String, String)> = self
            .args
            .values()
            .map(|arg| (arg.name.clone(), arg.usage.clone()))
            .collect();
        align_columns(&rows)
    }
}

/// First line of a clap error without the `error: ` prefix.
fn summarize(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).trim().to_string()
}
