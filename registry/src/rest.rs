//! Bulk command registration over the platform's REST API.
//!
//! Registration is a bulk overwrite: the full command set is sent with one
//! `PUT`, replacing whatever was registered before. Sending an empty set
//! unregisters everything.

use serde_json::Value;
use slash_command_core::SlashCommandData;
use tracing::debug;

use crate::config::RegistrationConfig;
use crate::error::{RegistryError, Result};

/// Default API root.
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

/// Sends a command set to the platform.
///
/// Implemented by [`HttpRegistrar`]; tests and offline tools can supply
/// their own implementation.
pub trait Registrar {
    /// Replaces the registered command set with `commands`.
    ///
    /// Returns how many commands the platform acknowledged.
    fn put_commands(
        &self,
        config: &RegistrationConfig,
        commands: &[SlashCommandData],
    ) -> Result<usize>;
}

/// [`Registrar`] backed by a blocking HTTP client.
///
/// # Examples
///
/// ```
/// use slash_command_registry::{HttpRegistrar, RegistrationConfig};
///
/// let registrar = HttpRegistrar::new();
/// let config = RegistrationConfig::new("secret", "42").with_guild("7");
/// assert_eq!(
///     registrar.commands_url(&config).unwrap(),
///     "https://discord.com/api/v10/applications/42/guilds/7/commands"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct HttpRegistrar {
    base_url: String,
}

impl Default for HttpRegistrar {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpRegistrar {
    /// Creates a registrar for the public API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Overrides the API root, e.g. for a proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Returns the endpoint for the configured scope.
    ///
    /// # Errors
    ///
    /// [`MissingApplicationId`](RegistryError::MissingApplicationId) when no
    /// application id is configured.
    pub fn commands_url(&self, config: &RegistrationConfig) -> Result<String> {
        let application_id = config
            .application_id
            .as_deref()
            .ok_or(RegistryError::MissingApplicationId)?;

        Ok(match config.guild_id.as_deref() {
            Some(guild_id) => format!(
                "{}/applications/{}/guilds/{}/commands",
                self.base_url, application_id, guild_id
            ),
            None => format!("{}/applications/{}/commands", self.base_url, application_id),
        })
    }
}

impl Registrar for HttpRegistrar {
    fn put_commands(
        &self,
        config: &RegistrationConfig,
        commands: &[SlashCommandData],
    ) -> Result<usize> {
        config.validate()?;
        let token = config.token.as_deref().ok_or(RegistryError::MissingToken)?;
        let url = self.commands_url(config)?;
        debug!(url = %url, count = commands.len(), "Sending command set");

        let agent = ureq::Agent::new_with_defaults();
        let response = agent
            .put(&url)
            .header("Authorization", &format!("Bot {token}"))
            .send_json(commands)?;

        let acknowledged = response
            .into_body()
            .read_json::<Vec<Value>>()
            .map_err(|e| RegistryError::Http(format!("could not parse response: {e}")))?;

        Ok(acknowledged.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_url() {
        let config = RegistrationConfig::new("t", "1095");
        assert_eq!(
            HttpRegistrar::new().commands_url(&config).unwrap(),
            "https://discord.com/api/v10/applications/1095/commands"
        );
    }

    #[test]
    fn test_custom_base_trims_slash() {
        let registrar = HttpRegistrar::new().with_base_url("http://localhost:8080/api/");
        let config = RegistrationConfig::new("t", "1");
        assert_eq!(
            registrar.commands_url(&config).unwrap(),
            "http://localhost:8080/api/applications/1/commands"
        );
    }

    #[test]
    fn test_put_without_token_fails_before_network() {
        let config = RegistrationConfig {
            application_id: Some("1".into()),
            ..Default::default()
        };
        let err = HttpRegistrar::new().put_commands(&config, &[]).unwrap_err();
        assert!(matches!(err, RegistryError::MissingToken));
    }
}
