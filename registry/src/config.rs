//! Registration credentials.
//!
//! [`RegistrationConfig`] carries the bot token, the application id and an
//! optional guild id. It is passed explicitly to every registration call.
//!
//! # Example YAML
//!
//! ```yaml
//! token: "MTA5...secret"
//! application_id: "1095000000000000000"
//! guild_id: "1100000000000000000"
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// Environment variable holding the bot token.
pub const TOKEN_VAR: &str = "DISCORD_TOKEN";
/// Environment variable holding the application id.
pub const APPLICATION_ID_VAR: &str = "DISCORD_APPLICATION_ID";
/// Environment variable holding the optional guild id.
pub const GUILD_ID_VAR: &str = "DISCORD_GUILD_ID";

/// Credentials and scope for command registration.
///
/// When `guild_id` is set, commands are registered for that guild only;
/// otherwise they are registered globally.
///
/// # Examples
///
/// ```
/// use slash_command_registry::{RegistrationConfig, RegistryError};
///
/// let config = RegistrationConfig::new("secret", "1095000000000000000");
/// assert!(config.validate().is_ok());
///
/// let missing = RegistrationConfig::default();
/// assert!(matches!(missing.validate(), Err(RegistryError::MissingToken)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationConfig {
    /// Bot token, sent as `Authorization: Bot <token>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Application (client) id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    /// Guild to scope registration to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
}

impl RegistrationConfig {
    /// Creates a global-scope configuration.
    pub fn new(token: impl Into<String>, application_id: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            application_id: Some(application_id.into()),
            guild_id: None,
        }
    }

    /// Scopes registration to one guild.
    pub fn with_guild(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = Some(guild_id.into());
        self
    }

    /// Reads the configuration from `DISCORD_TOKEN`,
    /// `DISCORD_APPLICATION_ID` and `DISCORD_GUILD_ID`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup. Empty
    /// values count as unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use slash_command_registry::RegistrationConfig;
    ///
    /// let config = RegistrationConfig::from_lookup(|key| match key {
    ///     "DISCORD_TOKEN" => Some("secret".to_string()),
    ///     "DISCORD_APPLICATION_ID" => Some("42".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.application_id.as_deref(), Some("42"));
    /// assert!(config.guild_id.is_none());
    /// ```
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            token: read(TOKEN_VAR),
            application_id: read(APPLICATION_ID_VAR),
            guild_id: read(GUILD_ID_VAR),
        }
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::RegistryError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::RegistryError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Checks that credentials are present, token first.
    ///
    /// # Errors
    ///
    /// [`MissingToken`](RegistryError::MissingToken) or
    /// [`MissingApplicationId`](RegistryError::MissingApplicationId).
    pub fn validate(&self) -> Result<()> {
        if self.token.as_deref().is_none_or(|t| t.trim().is_empty()) {
            return Err(RegistryError::MissingToken);
        }
        if self
            .application_id
            .as_deref()
            .is_none_or(|id| id.trim().is_empty())
        {
            return Err(RegistryError::MissingApplicationId);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
token: "abc.def"
application_id: "1095"
guild_id: "77"
"#
    }

    #[test]
    fn test_deserialize_complete() {
        let config: RegistrationConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(config.token.as_deref(), Some("abc.def"));
        assert_eq!(config.application_id.as_deref(), Some("1095"));
        assert_eq!(config.guild_id.as_deref(), Some("77"));
    }

    #[test]
    fn test_validate_reports_token_before_application_id() {
        let config = RegistrationConfig::default();
        assert!(matches!(config.validate(), Err(RegistryError::MissingToken)));

        let config = RegistrationConfig {
            token: Some("abc".into()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RegistryError::MissingApplicationId)
        ));
    }

    #[test]
    fn test_blank_token_is_missing() {
        let config = RegistrationConfig::new("  ", "1095");
        assert!(matches!(config.validate(), Err(RegistryError::MissingToken)));
    }

    #[test]
    fn test_lookup_ignores_empty_values() {
        let config = RegistrationConfig::from_lookup(|key| match key {
            TOKEN_VAR => Some("abc".to_string()),
            GUILD_ID_VAR => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert!(config.application_id.is_none());
        assert!(config.guild_id.is_none());
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("registration.yml");

        let original = RegistrationConfig::new("abc", "1095").with_guild("77");
        original.save(&path).unwrap();

        let loaded = RegistrationConfig::load(&path).unwrap();
        assert_eq!(loaded, original);
    }
}
