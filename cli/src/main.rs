use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use slash_command_core::{
    ArgumentDescriptor, ArgumentOptions, CommandPackage, OptionKind, SlashCommand,
    validate_package,
};
use slash_command_registry::{CommandManager, HttpRegistrar, RegistrationConfig};

#[derive(Debug, Parser)]
#[command(name = "slash-commands")]
#[command(about = "Preview, validate and register chat slash commands")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse an argument template and print the resulting options.
    Preview(PreviewArgs),
    /// Validate one or more command package JSON files.
    Validate(ValidateArgs),
    /// Register every command of a package, replacing the current set.
    Register(RegisterArgs),
    /// Remove every registered command.
    UnregisterAll(UnregisterAllArgs),
}

#[derive(Debug, Args)]
struct PreviewArgs {
    /// Argument template, e.g. "{} <{}> [{}]".
    #[arg(long)]
    template: String,
    /// YAML or JSON file with the list of argument descriptors.
    #[arg(long)]
    args: PathBuf,
    /// Command name used in warnings.
    #[arg(long, default_value = "preview")]
    name: String,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Command package JSON files.
    #[arg(required = true)]
    packages: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct CredentialArgs {
    /// Registration config YAML; credentials are read from the environment
    /// when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the API root.
    #[arg(long)]
    api_base: Option<String>,
}

#[derive(Debug, Args)]
struct RegisterArgs {
    #[command(flatten)]
    credentials: CredentialArgs,
    /// Command package JSON file.
    package: PathBuf,
}

#[derive(Debug, Args)]
struct UnregisterAllArgs {
    #[command(flatten)]
    credentials: CredentialArgs,
}

/// One entry of a `preview --args` file.
#[derive(Debug, Deserialize)]
struct DescriptorSpec {
    kind: String,
    #[serde(flatten)]
    options: ArgumentOptions,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Preview(args) => run_preview(args),
        Command::Validate(args) => run_validate(args),
        Command::Register(args) => run_register(args),
        Command::UnregisterAll(args) => run_unregister_all(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_preview(args: PreviewArgs) -> Result<(), String> {
    let raw = fs::read_to_string(&args.args)
        .map_err(|err| format!("Failed to read '{}': {err}", args.args.display()))?;
    let specs: Vec<DescriptorSpec> = serde_yaml::from_str(&raw)
        .map_err(|err| format!("Failed to parse '{}': {err}", args.args.display()))?;

    let descriptors = specs
        .into_iter()
        .map(|spec| {
            let kind = spec.kind.parse::<OptionKind>().map_err(|e| e.to_string())?;
            Ok(ArgumentDescriptor::new(kind, spec.options))
        })
        .collect::<Result<Vec<_>, String>>()?;
    let refs: Vec<&ArgumentDescriptor> = descriptors.iter().collect();

    let command = SlashCommand::new(&args.name, "Preview.").args(&args.template, &refs);

    for warning in command.warnings() {
        eprintln!("warning: {warning}");
    }

    let raw = serde_json::to_string_pretty(&command.data().options)
        .map_err(|err| format!("Failed to serialize options: {err}"))?;
    println!("{raw}");
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut failures = 0usize;
    let mut commands = 0usize;

    for path in &args.packages {
        let package = load_package(path)?;
        commands += package.command_count();
        for error in validate_package(&package) {
            eprintln!("{}: {error}", path.display());
            failures += 1;
        }
    }

    if failures > 0 {
        return Err(format!("{failures} validation error(s) found"));
    }

    println!(
        "Validated {} package(s) with {commands} command(s).",
        args.packages.len()
    );
    Ok(())
}

fn run_register(args: RegisterArgs) -> Result<(), String> {
    let config = load_config(&args.credentials)?;
    let package = load_package(&args.package)?;

    let errors = validate_package(&package);
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("{}: {error}", args.package.display());
        }
        return Err(format!(
            "refusing to register: {} validation error(s) found",
            errors.len()
        ));
    }

    let mut manager: CommandManager = CommandManager::new();
    for data in package.commands {
        manager.insert(data);
    }

    let count = manager
        .register_all(&registrar(&args.credentials), &config)
        .map_err(|err| err.to_string())?;
    println!("Registered {count} command(s).");
    Ok(())
}

fn run_unregister_all(args: UnregisterAllArgs) -> Result<(), String> {
    let config = load_config(&args.credentials)?;
    let mut manager: CommandManager = CommandManager::new();

    manager
        .unregister_all(&registrar(&args.credentials), &config)
        .map_err(|err| err.to_string())?;
    println!("Unregistered all commands.");
    Ok(())
}

fn load_package(path: &Path) -> Result<CommandPackage, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    serde_json::from_str(&raw)
        .map_err(|err| format!("Failed to parse package '{}': {err}", path.display()))
}

fn load_config(args: &CredentialArgs) -> Result<RegistrationConfig, String> {
    match &args.config {
        Some(path) => RegistrationConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display())),
        None => Ok(RegistrationConfig::from_env()),
    }
}

fn registrar(args: &CredentialArgs) -> HttpRegistrar {
    match &args.api_base {
        Some(base) => HttpRegistrar::new().with_base_url(base.as_str()),
        None => HttpRegistrar::new(),
    }
}
