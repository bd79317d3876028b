//! Definition and package validation.
//!
//! Checks command definitions against the platform's structural limits
//! before they are sent for registration: name format, description length,
//! option counts, nesting rules and required-before-optional ordering.
//! Findings are returned as a list; the builder itself never rejects input.
//!
//! # Examples
//!
//! ```
//! use slash_command_core::*;
//!
//! let query = ArgumentDescriptor::string(ArgumentOptions::new("query", "Search text."));
//! let command = SlashCommand::new("search", "Searches the wiki.").args("<{}>", &[&query]);
//! assert!(validate_command(command.data()).is_empty());
//!
//! // Names must be lowercase.
//! let bad = SlashCommandData::new("Search", "Searches the wiki.");
//! assert!(!validate_command(&bad).is_empty());
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::{CommandOption, CommandPackage, OptionKind, SlashCommandData};

/// Maximum number of options at one nesting level.
pub const MAX_OPTIONS: usize = 25;
/// Maximum number of choices on one option.
pub const MAX_CHOICES: usize = 25;
/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 100;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-_\p{Ll}\p{Lo}\p{N}]{1,32}$")
        .expect("static regex must compile")
});

/// Definition/package validation errors.
///
/// Paths are the space-separated chain of names from the command down to
/// the offending entry, e.g. `"tags add name"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Package version string is empty.
    #[error("package version cannot be empty")]
    EmptyPackageVersion,
    /// Two commands in the same package share a name.
    #[error("duplicate command in package: {0}")]
    DuplicateCommand(String),
    /// Name is missing, too long, or contains disallowed characters.
    #[error("invalid name at {path}: {name:?}")]
    InvalidName { path: String, name: String },
    /// Description is missing or longer than 100 characters.
    #[error("invalid description length at {path}: {len}")]
    InvalidDescription { path: String, len: usize },
    /// More than 25 options at one level.
    #[error("too many options at {path}: {count}")]
    TooManyOptions { path: String, count: usize },
    /// More than 25 choices on one option.
    #[error("too many choices at {path}: {count}")]
    TooManyChoices { path: String, count: usize },
    /// Two entries at the same level share a name.
    #[error("duplicate option at {0}")]
    DuplicateOption(String),
    /// A group holds something other than subcommands, or a subcommand
    /// holds a container.
    #[error("invalid nesting at {path}: {kind} not allowed here")]
    InvalidNesting { path: String, kind: OptionKind },
    /// Subcommands or groups share a level with plain arguments.
    #[error("subcommands and arguments mixed at {0}")]
    MixedLevel(String),
    /// A required argument follows an optional one.
    #[error("required option after optional at {0}")]
    RequiredAfterOptional(String),
}

/// Validates every command in a package.
///
/// An empty version stops validation immediately; otherwise findings from
/// all commands are collected.
///
/// # Examples
///
/// ```
/// use slash_command_core::*;
///
/// let mut package = CommandPackage::new("1.0.0");
/// package.commands.push(SlashCommandData::new("ping", "Pong."));
/// assert!(validate_package(&package).is_empty());
///
/// package.commands.push(SlashCommandData::new("ping", "Pong again."));
/// let errors = validate_package(&package);
/// assert!(errors.iter().any(|e| matches!(e, ValidationError::DuplicateCommand(_))));
/// ```
pub fn validate_package(package: &CommandPackage) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if package.version.trim().is_empty() {
        errors.push(ValidationError::EmptyPackageVersion);
        return errors;
    }

    let mut seen_commands: HashSet<&str> = HashSet::new();
    for command in &package.commands {
        if !seen_commands.insert(command.name.as_str()) {
            errors.push(ValidationError::DuplicateCommand(command.name.clone()));
        }
        errors.extend(validate_command(command));
    }

    errors
}

/// Validates one command definition.
pub fn validate_command(command: &SlashCommandData) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let path = command.name.clone();

    check_name(&path, &command.name, &mut errors);
    check_description(&path, &command.description, &mut errors);
    check_level(&path, &command.options, None, &mut errors);

    errors
}

fn check_name(path: &str, name: &str, errors: &mut Vec<ValidationError>) {
    if !NAME_PATTERN.is_match(name) {
        errors.push(ValidationError::InvalidName {
            path: path.to_string(),
            name: name.to_string(),
        });
    }
}

fn check_description(path: &str, description: &str, errors: &mut Vec<ValidationError>) {
    let len = description.chars().count();
    if len == 0 || len > MAX_DESCRIPTION_LEN {
        errors.push(ValidationError::InvalidDescription {
            path: path.to_string(),
            len,
        });
    }
}

/// Checks one level of options. `parent` is the kind of the enclosing
/// option, `None` at the top level.
fn check_level(
    path: &str,
    options: &[CommandOption],
    parent: Option<OptionKind>,
    errors: &mut Vec<ValidationError>,
) {
    if options.len() > MAX_OPTIONS {
        errors.push(ValidationError::TooManyOptions {
            path: path.to_string(),
            count: options.len(),
        });
    }

    let containers = options.iter().filter(|opt| opt.is_container()).count();
    if parent.is_none() && containers > 0 && containers < options.len() {
        errors.push(ValidationError::MixedLevel(path.to_string()));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut seen_optional = false;

    for option in options {
        let name = option.name.as_deref().unwrap_or_default();
        let option_path = format!("{path} {name}");

        check_name(&option_path, name, errors);
        check_description(
            &option_path,
            option.description.as_deref().unwrap_or_default(),
            errors,
        );

        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateOption(option_path.clone()));
        }

        let allowed = match parent {
            Some(OptionKind::SubcommandGroup) => option.kind == OptionKind::Subcommand,
            Some(OptionKind::Subcommand) => !option.is_container(),
            _ => true,
        };
        if !allowed {
            errors.push(ValidationError::InvalidNesting {
                path: option_path.clone(),
                kind: option.kind,
            });
        }

        if let Some(choices) = &option.choices {
            if choices.len() > MAX_CHOICES {
                errors.push(ValidationError::TooManyChoices {
                    path: option_path.clone(),
                    count: choices.len(),
                });
            }
        }

        if option.is_container() {
            check_level(&option_path, option.suboptions(), Some(option.kind), errors);
        } else if option.required == Some(true) {
            if seen_optional {
                errors.push(ValidationError::RequiredAfterOptional(option_path));
            }
        } else {
            seen_optional = true;
        }
    }
}
