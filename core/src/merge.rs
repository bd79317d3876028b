//! Cross-call coalescing of parsed arguments into a command's option list.
//!
//! Each `args` call on a command parses its template independently; the
//! records it produces are folded into the command's persistent list by
//! [`merge_args`]:
//!
//! - a leading subcommand group merges with an existing group of the same
//!   name, subcommand by subcommand;
//! - a leading subcommand merges its leaves into an existing subcommand of
//!   the same name;
//! - any other argument whose name already exists at the top level is
//!   dropped and reported.
//!
//! Containers are matched by kind and name, plain arguments by name alone.
//!
//! # Example
//!
//! ```
//! use slash_command_core::*;
//!
//! let sub = ArgumentDescriptor::subcommand(ArgumentOptions::new("sub1", "First."));
//! let a = ArgumentDescriptor::string(ArgumentOptions::new("a", "A."));
//! let b = ArgumentDescriptor::string(ArgumentOptions::new("b", "B."));
//!
//! let mut options = Vec::new();
//! merge_args(&mut options, parse(&split_template("{} <{}>"), &[&sub, &a]).options);
//! merge_args(&mut options, parse(&split_template("{} [{}]"), &[&sub, &b]).options);
//!
//! assert_eq!(options.len(), 1);
//! assert_eq!(options[0].suboptions().len(), 2);
//! ```

use tracing::debug;

use crate::{CommandOption, DuplicateArgument, OptionKind};

/// Merges newly parsed records into an existing option list.
///
/// Returns one [`DuplicateArgument`] per plain argument that was dropped
/// because its name was already present. The reported count is the number
/// of records with that name in `incoming`, not a running total.
pub fn merge_args(
    existing: &mut Vec<CommandOption>,
    incoming: Vec<CommandOption>,
) -> Vec<DuplicateArgument> {
    let incoming_names: Vec<Option<String>> =
        incoming.iter().map(|opt| opt.name.clone()).collect();
    let mut duplicates = Vec::new();

    for (index, record) in incoming.into_iter().enumerate() {
        let matching = existing.iter().position(|opt| opt.same_entry(&record));

        match (index, record.kind) {
            (0, OptionKind::SubcommandGroup) => match matching {
                Some(position) => merge_group(&mut existing[position], record),
                None => existing.push(record),
            },
            (0, OptionKind::Subcommand) => match matching {
                Some(position) => merge_leaves(&mut existing[position], record),
                None => existing.push(record),
            },
            (_, kind) if kind.is_container() => {
                debug!(
                    name = ?record.name,
                    index,
                    "Ignoring container that does not lead its syntax call"
                );
            }
            _ => {
                if existing.iter().any(|opt| opt.name == record.name) {
                    let count = incoming_names
                        .iter()
                        .filter(|name| **name == record.name)
                        .count();
                    duplicates.push(DuplicateArgument {
                        name: record.name,
                        count,
                    });
                } else {
                    existing.push(record);
                }
            }
        }
    }

    duplicates
}

fn merge_group(existing: &mut CommandOption, incoming: CommandOption) {
    let target = existing.suboptions_mut();
    let subcommands = incoming
        .options
        .unwrap_or_default()
        .into_iter()
        .filter(|opt| opt.kind == OptionKind::Subcommand);

    for subcommand in subcommands {
        match target.iter_mut().find(|opt| opt.same_entry(&subcommand)) {
            Some(current) => merge_leaves(current, subcommand),
            None => target.push(subcommand),
        }
    }
}

/// Appends the incoming leaves after the existing ones, keeping order.
fn merge_leaves(existing: &mut CommandOption, incoming: CommandOption) {
    existing
        .suboptions_mut()
        .extend(incoming.options.unwrap_or_default());
}
