//! Adapters that hand a built command to a [`CommandManager`].
//!
//! An adapter decides how a command ends up in the manager:
//!
//! - [`HandlerAdapter`] stores the command once a handler is supplied with
//!   [`execute`](HandlerAdapter::execute);
//! - [`RegisterOnlyAdapter`] stores the command immediately and never
//!   accepts a handler.
//!
//! Both are reached from a [`SlashCommand`] through [`SlashCommandExt`].
//!
//! # Example
//!
//! ```
//! use slash_command_core::{ArgumentDescriptor, ArgumentOptions, SlashCommand};
//! use slash_command_registry::{CommandManager, SlashCommandExt};
//!
//! let text = ArgumentDescriptor::string(ArgumentOptions::new("text", "What to say."));
//! let mut manager: CommandManager = CommandManager::new();
//!
//! SlashCommand::new("say", "Says something.")
//!     .args("<{}>", &[&text])
//!     .adapter(&mut manager)
//!     .execute(|interaction| println!("{interaction}"));
//!
//! SlashCommand::new("info", "Shows information.").register_only(&mut manager);
//!
//! assert_eq!(manager.names(), vec!["say", "info"]);
//! ```

use slash_command_core::{SlashCommand, SlashCommandData};

use crate::error::Result;
use crate::log::log_definition;
use crate::manager::{CommandManager, Handler};

/// Common interface of the adapters.
pub trait Adapter<I> {
    /// Stores the command without a handler.
    fn register(&mut self);

    /// Stores the command with `handler` attached.
    fn attach_handler(&mut self, handler: Handler<I>);
}

/// Stores a command together with its handler.
pub struct HandlerAdapter<'m, I> {
    data: SlashCommandData,
    manager: &'m mut CommandManager<I>,
}

impl<'m, I> HandlerAdapter<'m, I> {
    pub fn new(command: SlashCommand, manager: &'m mut CommandManager<I>) -> Self {
        Self {
            data: command.into_data(),
            manager,
        }
    }

    /// Writes the definition to `path_template` (see [`log_definition`])
    /// and continues.
    ///
    /// # Errors
    ///
    /// Any I/O or serialization error from writing the file.
    pub fn log(self, path_template: &str) -> Result<Self> {
        log_definition(path_template, &self.data)?;
        Ok(self)
    }

    /// Stores the command with `handler` attached.
    pub fn execute<F>(mut self, handler: F)
    where
        F: Fn(&I) + 'static,
    {
        self.attach_handler(Box::new(handler));
    }
}

impl<I> Adapter<I> for HandlerAdapter<'_, I> {
    fn register(&mut self) {
        self.manager.store(self.data.clone(), None);
    }

    fn attach_handler(&mut self, handler: Handler<I>) {
        self.manager.store(self.data.clone(), Some(handler));
    }
}

/// Stores a command on creation; handlers are ignored.
pub struct RegisterOnlyAdapter<'m, I> {
    data: SlashCommandData,
    manager: &'m mut CommandManager<I>,
}

impl<'m, I> RegisterOnlyAdapter<'m, I> {
    pub fn new(command: SlashCommand, manager: &'m mut CommandManager<I>) -> Self {
        let mut adapter = Self {
            data: command.into_data(),
            manager,
        };
        adapter.register();
        adapter
    }
}

impl<I> Adapter<I> for RegisterOnlyAdapter<'_, I> {
    fn register(&mut self) {
        self.manager.store(self.data.clone(), None);
    }

    fn attach_handler(&mut self, _handler: Handler<I>) {}
}

/// Adapter constructors on [`SlashCommand`].
pub trait SlashCommandExt {
    /// Prepares the command to be stored with a handler.
    fn adapter<I>(self, manager: &mut CommandManager<I>) -> HandlerAdapter<'_, I>;

    /// Stores the command without a handler.
    fn register_only<I>(self, manager: &mut CommandManager<I>) -> RegisterOnlyAdapter<'_, I>;
}

impl SlashCommandExt for SlashCommand {
    fn adapter<I>(self, manager: &mut CommandManager<I>) -> HandlerAdapter<'_, I> {
        HandlerAdapter::new(self, manager)
    }

    fn register_only<I>(self, manager: &mut CommandManager<I>) -> RegisterOnlyAdapter<'_, I> {
        RegisterOnlyAdapter::new(self, manager)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_handler_adapter_stores_on_execute() {
        let mut manager: CommandManager<u32> = CommandManager::new();
        let total = Rc::new(Cell::new(0));
        let sink = Rc::clone(&total);

        SlashCommand::new("add", "Adds.")
            .adapter(&mut manager)
            .execute(move |n| sink.set(sink.get() + n));

        assert!(manager.execute("add", &5));
        assert!(manager.execute("add", &2));
        assert_eq!(total.get(), 7);
    }

    #[test]
    fn test_unexecuted_adapter_stores_nothing() {
        let mut manager: CommandManager<u32> = CommandManager::new();
        let adapter = SlashCommand::new("later", "Later.").adapter(&mut manager);
        drop(adapter);
        assert!(manager.is_empty());
    }

    #[test]
    fn test_register_only_ignores_handler() {
        let mut manager: CommandManager<u32> = CommandManager::new();
        let called = Rc::new(Cell::new(false));
        let flag = Rc::clone(&called);

        let mut adapter = SlashCommand::new("info", "Info.").register_only(&mut manager);
        adapter.attach_handler(Box::new(move |_: &u32| flag.set(true)));
        drop(adapter);

        assert!(manager.contains("info"));
        assert!(!manager.execute("info", &1));
        assert!(!called.get());
    }

    #[test]
    fn test_handler_adapter_register_without_handler() {
        let mut manager: CommandManager<u32> = CommandManager::new();
        let mut adapter = SlashCommand::new("plain", "Plain.").adapter(&mut manager);
        adapter.register();
        drop(adapter);

        assert!(manager.contains("plain"));
        assert!(!manager.execute("plain", &0));
    }

    #[test]
    fn test_log_writes_before_storing() {
        let dir = tempfile::TempDir::new().unwrap();
        let template = dir.path().join("{name}.json");
        let mut manager: CommandManager<u32> = CommandManager::new();

        SlashCommand::new("logged", "Logged.")
            .adapter(&mut manager)
            .log(template.to_str().unwrap())
            .unwrap()
            .execute(|_| {});

        assert!(dir.path().join("logged.json").exists());
        assert!(manager.contains("logged"));
    }
}
