//! The slash command builder.
//!
//! [`SlashCommand`] accumulates arguments across any number of
//! [`args`](SlashCommand::args) calls. Each call parses its template on its
//! own and then folds the result into the command's option list with
//! [`merge_args`], so subcommands and groups that reappear in later calls
//! are extended rather than repeated.
//!
//! # Example
//!
//! ```
//! use slash_command_core::*;
//!
//! let add = ArgumentDescriptor::subcommand(ArgumentOptions::new("add", "Add a tag."));
//! let remove = ArgumentDescriptor::subcommand(ArgumentOptions::new("remove", "Remove a tag."));
//! let tag = ArgumentDescriptor::string(ArgumentOptions::new("tag", "Tag name."));
//!
//! let command = SlashCommand::new("tags", "Manage tags.")
//!     .args("{} <{}>", &[&add, &tag])
//!     .args("{} <{}>", &[&remove, &tag])
//!     .member_permissions(&[Permission::ManageMessages]);
//!
//! assert_eq!(command.data().options.len(), 1);
//! assert_eq!(command.data().default_member_permissions.as_deref(), Some("8192"));
//! ```

use serde_json::Value;
use tracing::warn;

use crate::{
    ArgumentDescriptor, DuplicateArgument, LocalizationMap, Permission, SlashCommandData,
    fragments_for, merge_args, parse, split_template,
};

/// Builder for one chat-input command definition.
///
/// Building never fails. Duplicate arguments are dropped and reported
/// through [`warnings`](SlashCommand::warnings) as well as `tracing`.
#[derive(Debug, Clone, PartialEq)]
pub struct SlashCommand {
    data: SlashCommandData,
    descriptors: Vec<ArgumentDescriptor>,
    warnings: Vec<String>,
}

impl SlashCommand {
    /// Creates a command with a name and description and no arguments.
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            data: SlashCommandData::new(name, description),
            descriptors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds arguments described by a template such as `"{} <{}> [{}]"`.
    ///
    /// Each `{}` placeholder consumes the next descriptor. The text before a
    /// placeholder decides its role: nothing marks a subcommand or group,
    /// `<` a required argument and `[` an optional one.
    ///
    /// # Examples
    ///
    /// ```
    /// use slash_command_core::*;
    ///
    /// let user = ArgumentDescriptor::user(ArgumentOptions::new("user", "Who to greet."));
    /// let loud = ArgumentDescriptor::boolean(ArgumentOptions::new("loud", "Shout it."));
    ///
    /// let command = SlashCommand::new("greet", "Greets someone.")
    ///     .args("<{}> [{}]", &[&user, &loud]);
    ///
    /// let options = &command.data().options;
    /// assert_eq!(options[0].required, Some(true));
    /// assert_eq!(options[1].required, Some(false));
    /// ```
    pub fn args(self, template: &str, descriptors: &[&ArgumentDescriptor]) -> Self {
        let fragments = split_template(template);
        self.args_fragments(&fragments, descriptors)
    }

    /// Adds arguments from an already split fragment sequence.
    pub fn args_fragments<S: AsRef<str>>(
        mut self,
        fragments: &[S],
        descriptors: &[&ArgumentDescriptor],
    ) -> Self {
        self.descriptors
            .extend(descriptors.iter().map(|descriptor| (*descriptor).clone()));

        let parsed = parse(fragments, descriptors);
        self.report(&parsed.duplicates);
        let merged = merge_args(&mut self.data.options, parsed.options);
        self.report(&merged);
        self
    }

    /// Adds arguments without a template.
    ///
    /// Subcommands and groups are placed bare, arguments whose descriptor is
    /// explicitly required are wrapped in `<>` and all others in `[]`.
    pub fn options(self, descriptors: &[&ArgumentDescriptor]) -> Self {
        let fragments = fragments_for(descriptors);
        self.args_fragments(&fragments, descriptors)
    }

    /// Replaces the localized names.
    pub fn local_name(mut self, names: LocalizationMap) -> Self {
        self.data.name_localizations = Some(names);
        self
    }

    /// Replaces the localized descriptions.
    pub fn local_desc(mut self, descs: LocalizationMap) -> Self {
        self.data.description_localizations = Some(descs);
        self
    }

    /// Sets an extra top-level property on the definition.
    ///
    /// # Examples
    ///
    /// ```
    /// use slash_command_core::SlashCommand;
    ///
    /// let command = SlashCommand::new("ping", "Pong.").custom("contexts", serde_json::json!([0, 1]));
    /// let json = serde_json::to_value(command.data()).unwrap();
    /// assert_eq!(json["contexts"], serde_json::json!([0, 1]));
    /// ```
    pub fn custom(mut self, key: &str, value: Value) -> Self {
        self.data.custom.insert(key.to_string(), value);
        self
    }

    /// Marks the command as age-restricted.
    pub fn nsfw(mut self, nsfw: bool) -> Self {
        self.data.nsfw = Some(nsfw);
        self
    }

    /// Requires members to hold every given permission. An empty slice
    /// leaves the current setting untouched.
    pub fn member_permissions(mut self, permissions: &[Permission]) -> Self {
        if !permissions.is_empty() {
            self.data.default_member_permissions =
                Some(Permission::combine(permissions).to_string());
        }
        self
    }

    /// Allows or forbids the command in direct messages.
    pub fn dm_permission(mut self, allowed: bool) -> Self {
        self.data.dm_permission = Some(allowed);
        self
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Returns the registry-ready definition.
    pub fn data(&self) -> &SlashCommandData {
        &self.data
    }

    /// Consumes the builder and returns the definition.
    pub fn into_data(self) -> SlashCommandData {
        self.data
    }

    /// Duplicate-argument warnings raised so far, oldest first.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Every descriptor supplied to this command, in order.
    pub fn descriptors(&self) -> &[ArgumentDescriptor] {
        &self.descriptors
    }

    fn report(&mut self, duplicates: &[DuplicateArgument]) {
        for duplicate in duplicates {
            let message = format!(
                "At least {} arguments with the same name were detected in the command '{}'\n\
                 The duplicated arguments have been automatically merged; \
                 please ensure your arguments have unique names.",
                duplicate.count, self.data.name
            );
            warn!(
                command = %self.data.name,
                argument = ?duplicate.name,
                count = duplicate.count,
                "{message}"
            );
            self.warnings.push(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArgumentOptions, CommandType, OptionKind};

    fn leaf(name: &str) -> ArgumentDescriptor {
        ArgumentDescriptor::string(ArgumentOptions::new(name, "Testing arguments."))
    }

    #[test]
    fn test_new_command_is_chat_input() {
        let command = SlashCommand::new("ping", "Replies with pong.");
        assert_eq!(command.name(), "ping");
        assert_eq!(command.data().kind, CommandType::ChatInput);
        assert!(command.data().options.is_empty());
        assert!(command.warnings().is_empty());
    }

    #[test]
    fn test_warning_text_names_command_and_count() {
        let arg = leaf("arg1");
        let command = SlashCommand::new("dupeargs", "Duplicates.")
            .args("<{}> <{}> <{}> <{}>", &[&arg, &arg, &arg, &arg]);

        assert_eq!(command.data().options.len(), 1);
        assert_eq!(command.warnings().len(), 1);
        assert_eq!(
            command.warnings()[0],
            "At least 4 arguments with the same name were detected in the command 'dupeargs'\n\
             The duplicated arguments have been automatically merged; please ensure your \
             arguments have unique names."
        );
    }

    #[test]
    fn test_cross_call_duplicate_leaf_warns() {
        let command = SlashCommand::new("twice", "Twice.")
            .args("<{}>", &[&leaf("value")])
            .args("[{}]", &[&leaf("value")]);

        assert_eq!(command.data().options.len(), 1);
        assert_eq!(command.data().options[0].required, Some(true));
        assert_eq!(command.warnings().len(), 1);
        assert!(command.warnings()[0].starts_with("At least 1 arguments"));
    }

    #[test]
    fn test_leaf_named_like_group_warns() {
        let group = ArgumentDescriptor::subgroup(ArgumentOptions::new("x", "Group."));
        let command = SlashCommand::new("clash", "Clash.").args("{} <{}>", &[&group, &leaf("x")]);

        assert_eq!(command.data().options.len(), 1);
        assert_eq!(command.data().options[0].kind, OptionKind::SubcommandGroup);
        assert_eq!(command.warnings().len(), 1);
        assert!(command.warnings()[0].starts_with("At least 2 arguments"));
        assert!(command.warnings()[0].contains("'clash'"));
    }

    #[test]
    fn test_options_synthesizes_template() {
        let sub = ArgumentDescriptor::subcommand(ArgumentOptions::new("set", "Set."));
        let key = ArgumentDescriptor::string(ArgumentOptions::new("key", "Key.").with_required(true));
        let value = leaf("value");

        let command = SlashCommand::new("config", "Config.").options(&[&sub, &key, &value]);

        let set = &command.data().options[0];
        assert_eq!(set.kind, OptionKind::Subcommand);
        assert_eq!(set.suboptions()[0].required, Some(true));
        assert_eq!(set.suboptions()[1].required, Some(false));
        assert_eq!(command.descriptors().len(), 3);
    }

    #[test]
    fn test_empty_permission_list_is_noop() {
        let command = SlashCommand::new("ban", "Bans.")
            .member_permissions(&[Permission::BanMembers])
            .member_permissions(&[]);
        assert_eq!(
            command.data().default_member_permissions.as_deref(),
            Some("4")
        );
    }

    #[test]
    fn test_metadata_setters_serialize() {
        let mut names = LocalizationMap::new();
        names.insert("fi".into(), "piippaus".into());

        let command = SlashCommand::new("beep", "Beeps.")
            .local_name(names)
            .nsfw(false)
            .dm_permission(true);

        let json = serde_json::to_value(command.data()).unwrap();
        assert_eq!(json["name_localizations"]["fi"], "piippaus");
        assert_eq!(json["nsfw"], false);
        assert_eq!(json["dm_permission"], true);
        assert_eq!(json["type"], 1);
    }
}
