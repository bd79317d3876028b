//! Command builder example.
//!
//! Builds a few commands with the template syntax, shows how repeated
//! `args` calls are merged, validates the result and prints the package
//! that would be sent for registration.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p slash-command-demos --example build_commands
//! ```

use slash_command_core::{
    ArgumentDescriptor, ArgumentOptions, ChannelType, CommandPackage, Permission, SlashCommand,
    validate_package,
};

fn main() {
    // Descriptors are plain values and can be reused across calls.
    let member = ArgumentDescriptor::user(ArgumentOptions::new("member", "Target member."));
    let reason = ArgumentDescriptor::string(
        ArgumentOptions::new("reason", "Why.").with_range(None, Some(200.0)),
    );
    let days = ArgumentDescriptor::integer(
        ArgumentOptions::new("days", "Days of messages to delete.")
            .with_choices([0, 1, 7]),
    );

    let ban = SlashCommand::new("ban", "Bans a member.")
        .args("<{}> [{}] [{}]", &[&member, &reason, &days])
        .member_permissions(&[Permission::BanMembers])
        .dm_permission(false);

    // Two calls on the same group and subcommands merge into one tree.
    let group = ArgumentDescriptor::subgroup(ArgumentOptions::new("channel", "Channel tools."));
    let lock = ArgumentDescriptor::subcommand(ArgumentOptions::new("lock", "Lock a channel."));
    let unlock =
        ArgumentDescriptor::subcommand(ArgumentOptions::new("unlock", "Unlock a channel."));
    let target = ArgumentDescriptor::channel(
        ArgumentOptions::new("target", "Channel to change.")
            .with_channel_types([ChannelType::GuildText, ChannelType::GuildForum]),
    );

    let moderation = SlashCommand::new("mod", "Moderation tools.")
        .args("{} {} <{}>", &[&group, &lock, &target])
        .args("{} {} <{}>", &[&group, &unlock, &target])
        .member_permissions(&[Permission::ManageChannels]);

    // Duplicate names in one call are dropped with a warning.
    let noisy = SlashCommand::new("noisy", "Shows duplicate handling.")
        .args("<{}> <{}>", &[&reason, &reason]);
    for warning in noisy.warnings() {
        println!("warning: {warning}");
    }

    let mut package = CommandPackage::new("1.0.0");
    package.name = Some("moderation".into());
    package.push(ban);
    package.push(moderation);
    package.push(noisy);

    let errors = validate_package(&package);
    if errors.is_empty() {
        println!("package is valid");
    } else {
        for error in &errors {
            println!("invalid: {error}");
        }
    }

    match serde_json::to_string_pretty(&package) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("could not serialize package: {e}"),
    }
}
