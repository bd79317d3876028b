//! Command manager, adapters and REST registration for slash commands.
//!
//! This crate takes command definitions built with `slash-command-core` and
//! makes them usable at runtime:
//!
//! - [`CommandManager`] stores definitions with optional handlers and
//!   dispatches interactions by command name.
//! - [`HandlerAdapter`] and [`RegisterOnlyAdapter`] move a built command
//!   into a manager (see [`SlashCommandExt`]).
//! - [`Registrar`] / [`HttpRegistrar`] push the stored set to the platform
//!   using explicit [`RegistrationConfig`] credentials.
//! - [`log_definition`] writes a definition to a JSON file.
//!
//! # Quick start
//!
//! ```no_run
//! use slash_command_core::{ArgumentDescriptor, ArgumentOptions, SlashCommand};
//! use slash_command_registry::{
//!     CommandManager, HttpRegistrar, RegistrationConfig, SlashCommandExt,
//! };
//!
//! let mut manager: CommandManager = CommandManager::new();
//! let user = ArgumentDescriptor::user(ArgumentOptions::new("user", "Who to greet."));
//!
//! SlashCommand::new("greet", "Greets a member.")
//!     .args("<{}>", &[&user])
//!     .adapter(&mut manager)
//!     .execute(|interaction| println!("greet: {interaction}"));
//!
//! let config = RegistrationConfig::from_env();
//! let count = manager.register_all(&HttpRegistrar::new(), &config).unwrap();
//! println!("registered {count} commands");
//! ```

mod adapter;
mod config;
mod error;
mod log;
mod manager;
mod rest;

pub use adapter::{Adapter, HandlerAdapter, RegisterOnlyAdapter, SlashCommandExt};
pub use config::{APPLICATION_ID_VAR, GUILD_ID_VAR, RegistrationConfig, TOKEN_VAR};
pub use error::{RegistryError, Result};
pub use log::log_definition;
pub use manager::{CommandManager, Handler};
pub use rest::{DEFAULT_API_BASE, HttpRegistrar, Registrar};
