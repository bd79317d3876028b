//! Template syntax parsing for command arguments.
//!
//! A template interleaves text fragments with descriptors:
//!
//! ```text
//! {} {} <{}> [{}]
//! ```
//!
//! Each fragment is classified by its last whitespace-delimited token and
//! decides how the descriptor that follows it is used:
//!
//! | trailing token | meaning                                |
//! |----------------|----------------------------------------|
//! | (empty)        | subcommand or subcommand group marker  |
//! | `<`            | required argument                      |
//! | `[`            | optional argument                      |
//! | anything else  | argument with no required flag applied |
//!
//! [`parse`] walks fragments and descriptors in lock-step and builds at most
//! one top-level subcommand group or subcommand plus flat arguments. Repeated
//! groups, subcommands and same-named top-level arguments are dropped; the
//! latter are reported as [`DuplicateArgument`]s.
//!
//! # Example
//!
//! ```
//! use slash_command_core::{ArgumentDescriptor, ArgumentOptions, parse, split_template};
//!
//! let sub = ArgumentDescriptor::subcommand(ArgumentOptions::new("roll", "Roll dice."));
//! let sides = ArgumentDescriptor::integer(ArgumentOptions::new("sides", "Die sides."));
//! let count = ArgumentDescriptor::integer(ArgumentOptions::new("count", "Dice count."));
//!
//! let parsed = parse(&split_template("{} <{}> [{}]"), &[&sub, &sides, &count]);
//! assert_eq!(parsed.options.len(), 1);
//!
//! let roll = &parsed.options[0];
//! assert_eq!(roll.suboptions().len(), 2);
//! assert_eq!(roll.suboptions()[0].required, Some(true));
//! assert_eq!(roll.suboptions()[1].required, Some(false));
//! ```

use crate::{ArgumentDescriptor, CommandOption, OptionKind};

/// Classification of a template fragment by its trailing token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classifier {
    /// Empty trailing token: the next descriptor is a subcommand or group.
    Bare,
    /// `<`: the next descriptor is a required argument.
    Required,
    /// `[`: the next descriptor is an optional argument.
    Optional,
    /// Any other token.
    Other,
}

/// Classifies a fragment by its final whitespace-delimited token.
///
/// # Examples
///
/// ```
/// use slash_command_core::{Classifier, classify};
///
/// assert_eq!(classify(""), Classifier::Bare);
/// assert_eq!(classify("> "), Classifier::Bare);
/// assert_eq!(classify("> <"), Classifier::Required);
/// assert_eq!(classify("["), Classifier::Optional);
/// assert_eq!(classify(" x<"), Classifier::Other);
/// ```
pub fn classify(fragment: &str) -> Classifier {
    match fragment.rsplit(char::is_whitespace).next().unwrap_or_default() {
        "" => Classifier::Bare,
        "<" => Classifier::Required,
        "[" => Classifier::Optional,
        _ => Classifier::Other,
    }
}

/// Splits a template on `{}` placeholders into its fragments.
///
/// A template with `n` placeholders yields `n + 1` fragments.
///
/// # Examples
///
/// ```
/// use slash_command_core::split_template;
///
/// assert_eq!(split_template("{} <{}> [{}]"), vec!["", " <", "> [", "]"]);
/// assert_eq!(split_template("<{}>"), vec!["<", ">"]);
/// ```
pub fn split_template(template: &str) -> Vec<&str> {
    template.split("{}").collect()
}

/// Synthesizes fragments for a plain list of descriptors.
///
/// Subcommands and groups get a bare marker; other kinds are wrapped in
/// `<`…`>` when their explicit required flag is `true` and in `[`…`]`
/// otherwise.
///
/// # Examples
///
/// ```
/// use slash_command_core::{ArgumentDescriptor, ArgumentOptions, fragments_for};
///
/// let sub = ArgumentDescriptor::subcommand(ArgumentOptions::new("add", "Add."));
/// let a = ArgumentDescriptor::string(ArgumentOptions::new("a", "A.").with_required(true));
/// let b = ArgumentDescriptor::string(ArgumentOptions::new("b", "B."));
///
/// assert_eq!(fragments_for(&[&sub, &a, &b]), vec!["", " <", "> [", "]"]);
/// ```
pub fn fragments_for(descriptors: &[&ArgumentDescriptor]) -> Vec<String> {
    let joined = descriptors
        .iter()
        .map(|descriptor| {
            if descriptor.kind().is_container() {
                "-"
            } else if descriptor.required_hint() == Some(true) {
                "<->"
            } else {
                "[-]"
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    joined.split('-').map(String::from).collect()
}

/// A top-level argument dropped because its name was already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateArgument {
    /// The repeated name.
    pub name: Option<String>,
    /// How many top-level records with this name were seen in the call,
    /// subcommands and groups included.
    pub count: usize,
}

/// Output of a single [`parse`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    /// Top-level records in template order.
    pub options: Vec<CommandOption>,
    /// Top-level argument names that were dropped as duplicates.
    pub duplicates: Vec<DuplicateArgument>,
}

/// Where leaves following a subcommand marker are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubcommandSlot {
    /// The subcommand is the top-level record at this index.
    TopLevel(usize),
    /// The subcommand is the last nested option of the group at this index.
    InGroup(usize),
}

#[derive(Debug, Default)]
struct ParseState {
    options: Vec<CommandOption>,
    pending_group: Option<usize>,
    pending_subcommand: Option<SubcommandSlot>,
    /// Set while the most recent subcommand lives inside a group and
    /// nothing has been appended to the top level after it.
    nested_is_last: bool,
    name_counts: Vec<NameCount>,
}

/// Same-named top-level records seen in one call.
#[derive(Debug)]
struct NameCount {
    name: Option<String>,
    count: usize,
    /// Set once a leaf with this name was dropped.
    dropped: bool,
}

impl ParseState {
    fn first_kind(&self) -> Option<OptionKind> {
        self.options.first().map(|opt| opt.kind)
    }

    fn push_top_level(&mut self, record: CommandOption) -> usize {
        self.options.push(record);
        self.nested_is_last = false;
        self.options.len() - 1
    }

    fn add_group(&mut self, record: CommandOption) {
        self.count_name(&record.name);
        if self.first_kind() == Some(OptionKind::SubcommandGroup) {
            return;
        }
        let index = self.push_top_level(record);
        self.pending_group = Some(index);
    }

    fn add_subcommand(&mut self, record: CommandOption) {
        if let Some(group_index) = self.pending_group {
            let group = &mut self.options[group_index];
            if !group.suboptions().is_empty() {
                return;
            }
            group.suboptions_mut().push(record);
            self.pending_group = None;
            self.pending_subcommand = Some(SubcommandSlot::InGroup(group_index));
            self.nested_is_last = true;
            return;
        }

        self.count_name(&record.name);
        if self.first_kind() == Some(OptionKind::Subcommand) {
            return;
        }
        let index = self.push_top_level(record);
        self.pending_subcommand = Some(SubcommandSlot::TopLevel(index));
    }

    fn add_leaf(&mut self, record: CommandOption) {
        match self.pending_subcommand {
            Some(SubcommandSlot::TopLevel(index)) => {
                self.options[index].suboptions_mut().push(record);
            }
            Some(SubcommandSlot::InGroup(group_index)) => {
                if let Some(sub) = self.options[group_index].suboptions_mut().last_mut() {
                    sub.suboptions_mut().push(record);
                }
            }
            None => {
                let entry = self.count_name(&record.name);
                if self.options.iter().any(|opt| opt.name == record.name) {
                    self.name_counts[entry].dropped = true;
                    return;
                }
                self.push_top_level(record);
            }
        }
    }

    fn count_name(&mut self, name: &Option<String>) -> usize {
        match self.name_counts.iter().position(|seen| &seen.name == name) {
            Some(index) => {
                self.name_counts[index].count += 1;
                index
            }
            None => {
                self.name_counts.push(NameCount {
                    name: name.clone(),
                    count: 1,
                    dropped: false,
                });
                self.name_counts.len() - 1
            }
        }
    }

    /// Drops a dangling top-level subcommand that trails a leading group.
    fn trim_trailing_subcommand(&mut self) {
        let visible = self.options.len() + usize::from(self.nested_is_last);
        if self.pending_subcommand.is_some()
            && visible > 1
            && self.first_kind() == Some(OptionKind::SubcommandGroup)
            && !self.nested_is_last
        {
            self.options.pop();
        }
    }

    fn finish(mut self) -> ParsedArgs {
        self.trim_trailing_subcommand();
        let duplicates = self
            .name_counts
            .into_iter()
            .filter(|seen| seen.dropped)
            .map(|seen| DuplicateArgument {
                name: seen.name,
                count: seen.count,
            })
            .collect();

        ParsedArgs {
            options: self.options,
            duplicates,
        }
    }
}

/// Parses fragments and descriptors into top-level records.
///
/// One descriptor is consumed per fragment; whichever sequence is longer is
/// truncated. Every consumed descriptor is finalized into a fresh record, so
/// reusing a descriptor across calls never shares state between results.
/// Parsing is total: malformed input degrades by dropping, never by failing.
pub fn parse<S: AsRef<str>>(fragments: &[S], descriptors: &[&ArgumentDescriptor]) -> ParsedArgs {
    let mut state = ParseState::default();

    for (fragment, descriptor) in fragments.iter().zip(descriptors) {
        let classifier = classify(fragment.as_ref());
        let mut record = descriptor.finalize();

        match classifier {
            Classifier::Bare => match record.kind {
                OptionKind::SubcommandGroup => state.add_group(record),
                OptionKind::Subcommand => state.add_subcommand(record),
                _ => {}
            },
            Classifier::Required | Classifier::Optional | Classifier::Other => {
                if record.required.is_none() {
                    record.required = match classifier {
                        Classifier::Required => Some(true),
                        Classifier::Optional => Some(false),
                        _ => None,
                    };
                }
                state.add_leaf(record);
            }
        }
    }

    state.finish()
}
