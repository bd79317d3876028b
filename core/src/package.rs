use serde::{Deserialize, Serialize};

use crate::{SlashCommand, SlashCommandData};

/// Serializable bundle of command definitions.
///
/// A package is what the CLI reads from disk and what a registrar sends as
/// the request body: the full set of commands an application exposes.
///
/// # Examples
///
/// ```
/// use slash_command_core::*;
///
/// let mut package = CommandPackage::new("1.0.0");
/// package.name = Some("utility".into());
/// package.push(SlashCommand::new("ping", "Replies with pong."));
/// package.commands.push(SlashCommandData::new("echo", "Echoes text."));
///
/// assert_eq!(package.command_count(), 2);
/// assert!(package.find_command("echo").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommandPackage {
    /// Package format version (semver string).
    pub version: String,
    /// Optional package name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional package description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Command definitions included in this package.
    #[serde(default)]
    pub commands: Vec<SlashCommandData>,
}

impl CommandPackage {
    /// Creates an empty package.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Default::default()
        }
    }

    /// Appends a built command's definition.
    pub fn push(&mut self, command: SlashCommand) {
        self.commands.push(command.into_data());
    }

    /// Returns the number of commands in this package.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Finds a command by name.
    pub fn find_command(&self, name: &str) -> Option<&SlashCommandData> {
        self.commands.iter().find(|command| command.name == name)
    }
}
