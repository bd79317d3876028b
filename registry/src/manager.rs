//! Command storage, dispatch and registration.
//!
//! [`CommandManager`] keeps command definitions in insertion order together
//! with an optional handler per command. It dispatches incoming
//! interactions by command name and pushes the stored set to the platform
//! through a [`Registrar`].
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use slash_command_core::SlashCommandData;
//! use slash_command_registry::CommandManager;
//!
//! let hits = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&hits);
//!
//! let mut manager: CommandManager<String> = CommandManager::new();
//! manager.insert_with_handler(SlashCommandData::new("ping", "Pong."), move |_| {
//!     counter.set(counter.get() + 1);
//! });
//!
//! assert!(manager.execute("ping", &"interaction".to_string()));
//! assert!(!manager.execute("missing", &"interaction".to_string()));
//! assert_eq!(hits.get(), 1);
//! ```

use std::fmt;

use serde_json::Value;
use slash_command_core::SlashCommandData;
use tracing::{debug, info};

use crate::config::RegistrationConfig;
use crate::error::Result;
use crate::rest::Registrar;

/// Callback invoked with the interaction that triggered a command.
pub type Handler<I> = Box<dyn Fn(&I)>;

struct Entry<I> {
    data: SlashCommandData,
    handler: Option<Handler<I>>,
}

/// Ordered store of commands and their handlers.
///
/// `I` is the interaction type handed to handlers. It defaults to a raw
/// JSON payload.
pub struct CommandManager<I = Value> {
    entries: Vec<Entry<I>>,
}

impl<I> Default for CommandManager<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> fmt::Debug for CommandManager<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandManager")
            .field("commands", &self.names())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Register,
    Unregister,
}

impl<I> CommandManager<I> {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Stores a definition without a handler.
    ///
    /// A command with the same name is replaced in place; its handler is
    /// dropped. Returns the replaced definition.
    pub fn insert(&mut self, data: SlashCommandData) -> Option<SlashCommandData> {
        self.store(data, None)
    }

    /// Stores a definition together with its handler.
    pub fn insert_with_handler<F>(
        &mut self,
        data: SlashCommandData,
        handler: F,
    ) -> Option<SlashCommandData>
    where
        F: Fn(&I) + 'static,
    {
        self.store(data, Some(Box::new(handler)))
    }

    pub(crate) fn store(
        &mut self,
        data: SlashCommandData,
        handler: Option<Handler<I>>,
    ) -> Option<SlashCommandData> {
        let entry = Entry { data, handler };
        match self.position(&entry.data.name) {
            Some(index) => {
                let previous = std::mem::replace(&mut self.entries[index], entry);
                Some(previous.data)
            }
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.data.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&SlashCommandData> {
        self.position(name).map(|index| &self.entries[index].data)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Removes a command locally without contacting the platform.
    pub fn remove(&mut self, name: &str) -> Option<SlashCommandData> {
        self.position(name)
            .map(|index| self.entries.remove(index).data)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Command names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.data.name.as_str())
            .collect()
    }

    /// The registration payload: every stored definition, in order.
    pub fn definitions(&self) -> Vec<SlashCommandData> {
        self.entries.iter().map(|entry| entry.data.clone()).collect()
    }

    /// Runs the handler of `name` with `interaction`.
    ///
    /// Returns `false` when the command is unknown or has no handler.
    pub fn execute(&self, name: &str, interaction: &I) -> bool {
        let Some(index) = self.position(name) else {
            debug!(command = name, "No such command");
            return false;
        };

        match &self.entries[index].handler {
            Some(handler) => {
                handler(interaction);
                true
            }
            None => {
                debug!(command = name, "Command has no handler");
                false
            }
        }
    }

    /// Registers every stored command, replacing the platform's set.
    ///
    /// Returns the number of commands the platform acknowledged.
    ///
    /// # Errors
    ///
    /// Credential errors are reported before any request is made.
    pub fn register_all(
        &self,
        registrar: &impl Registrar,
        config: &RegistrationConfig,
    ) -> Result<usize> {
        config.validate()?;
        self.push(registrar, config, Operation::Register)
    }

    /// Removes `name` locally and re-registers the remaining set.
    pub fn unregister(
        &mut self,
        name: &str,
        registrar: &impl Registrar,
        config: &RegistrationConfig,
    ) -> Result<usize> {
        config.validate()?;
        self.remove(name);
        self.push(registrar, config, Operation::Unregister)
    }

    /// Removes every command locally and registers the empty set.
    pub fn unregister_all(
        &mut self,
        registrar: &impl Registrar,
        config: &RegistrationConfig,
    ) -> Result<usize> {
        config.validate()?;
        self.clear();
        self.push(registrar, config, Operation::Unregister)
    }

    fn push(
        &self,
        registrar: &impl Registrar,
        config: &RegistrationConfig,
        operation: Operation,
    ) -> Result<usize> {
        let body = self.definitions();

        match operation {
            Operation::Register => {
                info!("Registering {} application (/) commands.", body.len())
            }
            Operation::Unregister => info!("Unregistering all application (/) commands."),
        }

        let acknowledged = registrar.put_commands(config, &body)?;

        match operation {
            Operation::Register => info!(
                "Successfully registered {} application (/) commands.",
                acknowledged
            ),
            Operation::Unregister => {
                info!("Successfully unregistered all application (/) commands.")
            }
        }

        Ok(acknowledged)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::RegistryError;

    #[derive(Default)]
    struct RecordingRegistrar {
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl Registrar for RecordingRegistrar {
        fn put_commands(
            &self,
            _config: &RegistrationConfig,
            commands: &[SlashCommandData],
        ) -> Result<usize> {
            self.calls
                .borrow_mut()
                .push(commands.iter().map(|c| c.name.clone()).collect());
            Ok(commands.len())
        }
    }

    fn config() -> RegistrationConfig {
        RegistrationConfig::new("token", "1095")
    }

    fn manager_with(names: &[&str]) -> CommandManager<Value> {
        let mut manager = CommandManager::new();
        for name in names {
            manager.insert(SlashCommandData::new(name, "Test command."));
        }
        manager
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut manager = manager_with(&["a", "b", "c"]);
        let previous = manager.insert(SlashCommandData::new("b", "Replacement."));

        assert_eq!(previous.unwrap().description, "Test command.");
        assert_eq!(manager.names(), vec!["a", "b", "c"]);
        assert_eq!(manager.get("b").unwrap().description, "Replacement.");
    }

    #[test]
    fn test_execute_passes_interaction() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut manager = CommandManager::new();
        manager.insert_with_handler(SlashCommandData::new("echo", "Echo."), move |i: &Value| {
            sink.borrow_mut().push(i["data"]["name"].clone());
        });
        manager.insert(SlashCommandData::new("silent", "No handler."));

        let interaction = serde_json::json!({"data": {"name": "echo"}});
        assert!(manager.execute("echo", &interaction));
        assert!(!manager.execute("silent", &interaction));
        assert!(!manager.execute("nope", &interaction));
        assert_eq!(*seen.borrow(), vec![Value::from("echo")]);
    }

    #[test]
    fn test_register_all_sends_every_definition() {
        let manager = manager_with(&["a", "b"]);
        let registrar = RecordingRegistrar::default();

        assert_eq!(manager.register_all(&registrar, &config()).unwrap(), 2);
        assert_eq!(*registrar.calls.borrow(), vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_unregister_puts_remaining_set() {
        let mut manager = manager_with(&["a", "b", "c"]);
        let registrar = RecordingRegistrar::default();

        manager.unregister("b", &registrar, &config()).unwrap();
        manager.unregister_all(&registrar, &config()).unwrap();

        assert!(manager.is_empty());
        assert_eq!(
            *registrar.calls.borrow(),
            vec![vec!["a".to_string(), "c".to_string()], vec![]]
        );
    }

    #[test]
    fn test_missing_credentials_leave_store_untouched() {
        let mut manager = manager_with(&["a"]);
        let registrar = RecordingRegistrar::default();
        let config = RegistrationConfig {
            token: Some("token".into()),
            ..Default::default()
        };

        let err = manager.unregister_all(&registrar, &config).unwrap_err();
        assert!(matches!(err, RegistryError::MissingApplicationId));
        assert_eq!(manager.len(), 1);
        assert!(registrar.calls.borrow().is_empty());
    }
}
