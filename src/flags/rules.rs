//! flags::rules
//!
//! Declarative validation rules checked after a flag set parses.
//!
//! # Rules
//!
//! - [`Rule::required`] - the flag must be given on the command line
//! - [`Rule::mutually_exclusive`] - at most one of the flags may be given
//! - [`Rule::number_of_args`] - exact count of positional tokens
//!
//! Rules run in declaration order and the first violation wins. A flag
//! counts as "given" only when it appeared on the command line; defaults
//! never satisfy [`Rule::required`] and never trip exclusivity.

use thiserror::Error;

use super::FlagSet;

/// A rule violation reported by [`FlagSet::parse`](super::FlagSet::parse).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required flag --{flag} is not set")]
    MissingRequired { flag: String },

    #[error("flags {} are mutually exclusive", dashed(.flags))]
    MutuallyExclusive { flags: Vec<String> },

    #[error("accepts {expected} arg(s), received {actual}")]
    ArgCount { expected: usize, actual: usize },
}

fn dashed(flags: &[String]) -> String {
    flags
        .iter()
        .map(|f| format!("--{}", f))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A single validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Required(String),
    MutuallyExclusive(Vec<String>),
    NumberOfArgs(usize),
}

impl Rule {
    pub fn required(flag: impl Into<String>) -> Self {
        Rule::Required(flag.into())
    }

    pub fn mutually_exclusive<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::MutuallyExclusive(flags.into_iter().map(Into::into).collect())
    }

    pub fn number_of_args(n: usize) -> Self {
        Rule::NumberOfArgs(n)
    }

    /// Check the rule against a parsed flag set.
    pub(crate) fn check(&self, flags: &FlagSet) -> Result<(), ValidationError> {
        match self {
            Rule::Required(flag) => {
                if flags.is_set(flag) {
                    Ok(())
                } else {
                    Err(ValidationError::MissingRequired { flag: flag.clone() })
                }
            }
            Rule::MutuallyExclusive(group) => {
                let given: Vec<String> = group
                    .iter()
                    .filter(|f| flags.is_set(f))
                    .cloned()
                    .collect();
                if given.len() > 1 {
                    Err(ValidationError::MutuallyExclusive { flags: given })
                } else {
                    Ok(())
                }
            }
            Rule::NumberOfArgs(expected) => {
                let actual = flags.positionals().len();
                if actual == *expected {
                    Ok(())
                } else {
                    Err(ValidationError::ArgCount {
                        expected: *expected,
                        actual,
                    })
                }
            }
        }
    }
}
