//! Wire-shaped type definitions for slash-command options.
//!
//! This module defines the result records produced by finalization and
//! parsing, plus the small fixed tables (option kinds, channel kinds) that
//! map symbolic names to the numeric codes the platform expects. The types
//! serialize with [`serde`] into the JSON shape accepted by the command
//! registry.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Map of locale identifiers (e.g. `"en-US"`) to localized text.
pub type LocalizationMap = BTreeMap<String, String>;

/// Error returned when a symbolic name or wire code does not match any
/// entry of a fixed lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {table} kind: {value}")]
pub struct UnknownKind {
    /// Which table was consulted (e.g. `"option"`).
    pub table: &'static str,
    /// The offending name or code.
    pub value: String,
}

/// Kind of a command option.
///
/// Serializes as the numeric wire code (`String` → `3`, `Subcommand` → `1`).
/// [`Display`](fmt::Display) and [`FromStr`] use the symbolic name.
///
/// # Examples
///
/// ```
/// use slash_command_core::OptionKind;
///
/// assert_eq!(OptionKind::String.code(), 3);
/// assert_eq!(OptionKind::SubcommandGroup.to_string(), "SubcommandGroup");
/// assert_eq!("Integer".parse::<OptionKind>().unwrap(), OptionKind::Integer);
/// assert!(OptionKind::Subcommand.is_container());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum OptionKind {
    /// Named branch holding leaf arguments.
    Subcommand = 1,
    /// Second nesting level holding subcommands.
    SubcommandGroup = 2,
    String = 3,
    Integer = 4,
    Boolean = 5,
    User = 6,
    Channel = 7,
    Role = 8,
    /// User or role.
    Mentionable = 9,
    /// Floating point number.
    Number = 10,
    /// Uploaded file.
    Attachment = 11,
}

const OPTION_KINDS: [(OptionKind, u8, &str); 11] = [
    (OptionKind::Subcommand, 1, "Subcommand"),
    (OptionKind::SubcommandGroup, 2, "SubcommandGroup"),
    (OptionKind::String, 3, "String"),
    (OptionKind::Integer, 4, "Integer"),
    (OptionKind::Boolean, 5, "Boolean"),
    (OptionKind::User, 6, "User"),
    (OptionKind::Channel, 7, "Channel"),
    (OptionKind::Role, 8, "Role"),
    (OptionKind::Mentionable, 9, "Mentionable"),
    (OptionKind::Number, 10, "Number"),
    (OptionKind::Attachment, 11, "Attachment"),
];

impl OptionKind {
    /// Returns the numeric wire code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns the symbolic name (e.g. `"SubcommandGroup"`).
    pub fn name(self) -> &'static str {
        OPTION_KINDS[usize::from(self.code()) - 1].2
    }

    /// Returns `true` for [`Subcommand`](Self::Subcommand) and
    /// [`SubcommandGroup`](Self::SubcommandGroup).
    pub fn is_container(self) -> bool {
        matches!(self, Self::Subcommand | Self::SubcommandGroup)
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<OptionKind> for u8 {
    fn from(kind: OptionKind) -> Self {
        kind.code()
    }
}

impl TryFrom<u8> for OptionKind {
    type Error = UnknownKind;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        OPTION_KINDS
            .iter()
            .find(|(_, c, _)| *c == code)
            .map(|(kind, _, _)| *kind)
            .ok_or_else(|| UnknownKind {
                table: "option",
                value: code.to_string(),
            })
    }
}

impl FromStr for OptionKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OPTION_KINDS
            .iter()
            .find(|(_, _, name)| name.eq_ignore_ascii_case(s))
            .map(|(kind, _, _)| *kind)
            .ok_or_else(|| UnknownKind {
                table: "option",
                value: s.to_string(),
            })
    }
}

/// Channel kinds a channel argument may be restricted to.
///
/// Descriptors carry channel kinds by symbolic name; finalized records carry
/// the numeric codes returned by [`code`](Self::code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelType {
    GuildText,
    #[serde(rename = "DM")]
    Dm,
    GuildVoice,
    #[serde(rename = "GroupDM")]
    GroupDm,
    GuildCategory,
    GuildAnnouncement,
    AnnouncementThread,
    PublicThread,
    PrivateThread,
    GuildStageVoice,
    GuildDirectory,
    GuildForum,
    GuildMedia,
}

impl ChannelType {
    /// Returns the numeric wire code.
    ///
    /// # Examples
    ///
    /// ```
    /// use slash_command_core::ChannelType;
    ///
    /// assert_eq!(ChannelType::GuildText.code(), 0);
    /// assert_eq!(ChannelType::PublicThread.code(), 11);
    /// ```
    pub fn code(self) -> u8 {
        match self {
            Self::GuildText => 0,
            Self::Dm => 1,
            Self::GuildVoice => 2,
            Self::GroupDm => 3,
            Self::GuildCategory => 4,
            Self::GuildAnnouncement => 5,
            Self::AnnouncementThread => 10,
            Self::PublicThread => 11,
            Self::PrivateThread => 12,
            Self::GuildStageVoice => 13,
            Self::GuildDirectory => 14,
            Self::GuildForum => 15,
            Self::GuildMedia => 16,
        }
    }
}

/// A choice value: string, integer or floating point number.
///
/// Deserialization tries integer before number so `5` stays an integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    Integer(i64),
    Number(f64),
    String(String),
}

impl fmt::Display for ChoiceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Number(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
        }
    }
}

impl From<i64> for ChoiceValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for ChoiceValue {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for ChoiceValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for ChoiceValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for ChoiceValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

/// A `{name, value}` pair offered to the user for an argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Display name (the stringified value).
    pub name: String,
    /// The value submitted when chosen.
    pub value: ChoiceValue,
}

impl Choice {
    /// Builds a choice whose display name is the stringified value.
    ///
    /// # Examples
    ///
    /// ```
    /// use slash_command_core::{Choice, ChoiceValue};
    ///
    /// let choice = Choice::from_value(42);
    /// assert_eq!(choice.name, "42");
    /// assert_eq!(choice.value, ChoiceValue::Integer(42));
    /// ```
    pub fn from_value(value: impl Into<ChoiceValue>) -> Self {
        let value = value.into();
        Self {
            name: value.to_string(),
            value,
        }
    }
}

/// Converts autocomplete results into API-compatible suggestion objects.
///
/// # Examples
///
/// ```
/// use slash_command_core::autocomplete_response;
///
/// let suggestions = autocomplete_response(["red", "green"]);
/// assert_eq!(suggestions.len(), 2);
/// assert_eq!(suggestions[1].name, "green");
/// ```
pub fn autocomplete_response<V, I>(values: I) -> Vec<Choice>
where
    V: Into<ChoiceValue>,
    I: IntoIterator<Item = V>,
{
    values.into_iter().map(Choice::from_value).collect()
}

/// Finalized, wire-shaped representation of an argument, subcommand or
/// subcommand group.
///
/// Every optional field is omitted from JSON when unset. `options` is only
/// meaningful for container kinds: a group holds subcommands, a subcommand
/// holds leaf arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    /// Kind of the option (serialized as `type`).
    #[serde(rename = "type")]
    pub kind: OptionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<LocalizationMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_localizations: Option<LocalizationMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
    /// Minimum numeric value (non-string kinds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<serde_json::Number>,
    /// Maximum numeric value (non-string kinds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<serde_json::Number>,
    /// Minimum length (string kind).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    /// Maximum length (string kind).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    /// Numeric channel kind codes allowed in a channel argument.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_types: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<bool>,
    /// Nested options (subcommands of a group, leaves of a subcommand).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<CommandOption>>,
}

impl CommandOption {
    /// Creates an empty record of the given kind.
    pub fn new(kind: OptionKind) -> Self {
        Self {
            kind,
            name: None,
            description: None,
            name_localizations: None,
            description_localizations: None,
            required: None,
            choices: None,
            min_value: None,
            max_value: None,
            min_length: None,
            max_length: None,
            channel_types: None,
            autocomplete: None,
            options: None,
        }
    }

    /// Returns `true` if this record is a subcommand or subcommand group.
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Returns the nested option list, creating it if absent.
    pub fn suboptions_mut(&mut self) -> &mut Vec<CommandOption> {
        self.options.get_or_insert_with(Vec::new)
    }

    /// Returns the nested options, or an empty slice.
    pub fn suboptions(&self) -> &[CommandOption] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Returns `true` if `other` has the same kind and name.
    pub fn same_entry(&self, other: &CommandOption) -> bool {
        self.kind == other.kind && self.name == other.name
    }
}

/// Kind of an application command. Builders only produce
/// [`ChatInput`](Self::ChatInput).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CommandType {
    /// Slash command.
    #[default]
    ChatInput,
    /// Context-menu command on a user.
    User,
    /// Context-menu command on a message.
    Message,
}

impl From<CommandType> for u8 {
    fn from(kind: CommandType) -> Self {
        match kind {
            CommandType::ChatInput => 1,
            CommandType::User => 2,
            CommandType::Message => 3,
        }
    }
}

impl TryFrom<u8> for CommandType {
    type Error = UnknownKind;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::ChatInput),
            2 => Ok(Self::User),
            3 => Ok(Self::Message),
            _ => Err(UnknownKind {
                table: "command",
                value: code.to_string(),
            }),
        }
    }
}

/// Complete, registry-ready definition of a command.
///
/// Unknown keys set through [`SlashCommand::custom`](crate::SlashCommand::custom)
/// are flattened into the JSON object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SlashCommandData {
    pub name: String,
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: CommandType,
    #[serde(default)]
    pub options: Vec<CommandOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<LocalizationMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_localizations: Option<LocalizationMap>,
    /// Permission bitmask as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_member_permissions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dm_permission: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<bool>,
    /// Extra properties not modelled above.
    #[serde(flatten)]
    pub custom: serde_json::Map<String, serde_json::Value>,
}

impl SlashCommandData {
    /// Creates a chat-input definition with no options.
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    /// Finds a top-level option by name.
    pub fn find_option(&self, name: &str) -> Option<&CommandOption> {
        self.options
            .iter()
            .find(|opt| opt.name.as_deref() == Some(name))
    }
}
