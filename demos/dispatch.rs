//! Dispatch and registration example.
//!
//! Stores commands in a [`CommandManager`] through the adapters, dispatches
//! a fake interaction payload and, when credentials are present in the
//! environment, registers the set.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p slash-command-demos --example dispatch
//!
//! # Register for real (guild id optional)
//! DISCORD_TOKEN=... DISCORD_APPLICATION_ID=... DISCORD_GUILD_ID=... \
//!     cargo run -p slash-command-demos --example dispatch
//! ```

use serde_json::{Value, json};
use slash_command_core::{ArgumentDescriptor, ArgumentOptions, SlashCommand};
use slash_command_registry::{
    CommandManager, HttpRegistrar, RegistrationConfig, SlashCommandExt,
};

fn main() {
    let mut manager: CommandManager<Value> = CommandManager::new();
    let text = ArgumentDescriptor::string(ArgumentOptions::new("text", "What to repeat."));

    let echo = SlashCommand::new("echo", "Repeats text.")
        .args("<{}>", &[&text])
        .adapter(&mut manager);

    // Write the definition next to the build output before storing it.
    let echo = match echo.log("target/commands/{name}.json") {
        Ok(adapter) => adapter,
        Err(e) => {
            eprintln!("could not log definition: {e}");
            return;
        }
    };
    echo.execute(|interaction| {
        let value = &interaction["data"]["options"][0]["value"];
        println!("echo: {value}");
    });

    SlashCommand::new("about", "About this bot.").register_only(&mut manager);

    println!("stored commands: {:?}", manager.names());

    let interaction = json!({
        "type": 2,
        "data": {
            "name": "echo",
            "options": [{"name": "text", "type": 3, "value": "hello"}]
        }
    });
    let name = interaction["data"]["name"].as_str().unwrap_or_default();
    if !manager.execute(name, &interaction) {
        println!("no handler for {name}");
    }

    let config = RegistrationConfig::from_env();
    if config.validate().is_err() {
        println!("DISCORD_TOKEN / DISCORD_APPLICATION_ID not set; skipping registration");
        return;
    }

    match manager.register_all(&HttpRegistrar::new(), &config) {
        Ok(count) => println!("registered {count} command(s)"),
        Err(e) => eprintln!("registration failed: {e}"),
    }
}
