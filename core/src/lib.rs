//! Slash command definitions and argument syntax.
//!
//! This crate builds the registry-ready definition of a chat-input command:
//!
//! - [`ArgumentDescriptor`] describes one argument (kind plus
//!   [`ArgumentOptions`]); [`Finalizer`] turns it into a wire-shaped
//!   [`CommandOption`].
//! - [`parse`] reads a template such as `"{} <{}> [{}]"` together with a
//!   descriptor list and produces a de-duplicated option tree with at most
//!   one leading subcommand or subcommand group.
//! - [`merge_args`] folds the result of one call into a command's existing
//!   option list, extending subcommands and groups that reappear.
//! - [`SlashCommand`] wraps both behind a builder and produces a
//!   [`SlashCommandData`] payload.
//!
//! Validation ([`validate_command`], [`validate_package`]) reports
//! structural problems against the platform's limits without changing the
//! definition.
//!
//! # Example
//!
//! ```
//! use slash_command_core::*;
//!
//! let group = ArgumentDescriptor::subgroup(ArgumentOptions::new("role", "Manage roles."));
//! let add = ArgumentDescriptor::subcommand(ArgumentOptions::new("add", "Give a role."));
//! let user = ArgumentDescriptor::user(ArgumentOptions::new("user", "Member."));
//! let role = ArgumentDescriptor::role(ArgumentOptions::new("role", "Role to give."));
//!
//! let command = SlashCommand::new("admin", "Administration tools.")
//!     .args("{} {} <{}> <{}>", &[&group, &add, &user, &role])
//!     .member_permissions(&[Permission::ManageRoles])
//!     .dm_permission(false);
//!
//! let group = &command.data().options[0];
//! assert_eq!(group.kind, OptionKind::SubcommandGroup);
//! assert_eq!(group.suboptions()[0].suboptions().len(), 2);
//! assert!(validate_command(command.data()).is_empty());
//! ```

mod command;
mod descriptor;
mod finalize;
mod merge;
mod package;
mod permissions;
mod syntax;
mod types;
mod validate;

pub use command::SlashCommand;
pub use descriptor::{ArgumentDescriptor, ArgumentOptions};
pub use finalize::Finalizer;
pub use merge::merge_args;
pub use package::CommandPackage;
pub use permissions::Permission;
pub use syntax::{
    Classifier, DuplicateArgument, ParsedArgs, classify, fragments_for, parse, split_template,
};
pub use types::*;
pub use validate::{
    MAX_CHOICES, MAX_DESCRIPTION_LEN, MAX_OPTIONS, ValidationError, validate_command,
    validate_package,
};
