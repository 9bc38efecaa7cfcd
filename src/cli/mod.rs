// src/cli/mod.rs
use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use termcolor::WriteColor;

pub mod args;
pub mod bookmark_commands;
pub mod completion;
pub mod display;
pub mod error;

/// Runs the parsed command line, creating services only for commands that touch the stores
pub fn execute_command<W: WriteColor>(stderr: &mut W, cli: Cli, settings: &Settings) -> CliResult<()> {
    if cli.generate_config {
        println!("{}", crate::config::generate_default_config());
        return Ok(());
    }
    if let Some(Commands::Completion { shell }) = &cli.command {
        return handle_completion(shell);
    }

    let services = ServiceContainer::new(settings)?;
    execute_command_with_services(stderr, cli, &services)
}

pub fn execute_command_with_services<W: WriteColor>(
    stderr: &mut W,
    cli: Cli,
    services: &ServiceContainer,
) -> CliResult<()> {
    let offline = cli.offline;
    match cli.command {
        Some(Commands::Add { url, name }) => {
            bookmark_commands::add(stderr, services, &url, &name, offline)
        }
        Some(Commands::Edit { id, name, url }) => {
            bookmark_commands::edit(stderr, services, &id, name, url, offline)
        }
        Some(Commands::Delete { ids }) => bookmark_commands::delete(stderr, services, &ids),
        Some(Commands::List { page, is_json }) => {
            bookmark_commands::list(stderr, services, page, is_json, offline)
        }
        Some(Commands::Show { id }) => bookmark_commands::show(stderr, services, &id),
        Some(Commands::Refresh { ids, force }) => {
            bookmark_commands::refresh(stderr, services, ids.as_deref(), force, offline)
        }
        Some(Commands::Open { id }) => bookmark_commands::open(services, &id),
        Some(Commands::Completion { shell }) => handle_completion(&shell),
        None => bookmark_commands::list(stderr, services, 1, false, offline),
    }
}

fn handle_completion(shell: &str) -> CliResult<()> {
    // Write a brief comment to stderr about what's being output
    match shell.to_lowercase().as_str() {
        "bash" => {
            eprintln!("# Outputting bash completion script for linkshelf");
            eprintln!("# To use, run one of:");
            eprintln!("# - eval \"$(linkshelf completion bash)\"          # one-time use");
            eprintln!("# - linkshelf completion bash >> ~/.bashrc         # add to bashrc");
            eprintln!("#");
        }
        "zsh" => {
            eprintln!("# Outputting zsh completion script for linkshelf");
            eprintln!("# To use, run one of:");
            eprintln!("# - eval \"$(linkshelf completion zsh)\"           # one-time use");
            eprintln!("# - linkshelf completion zsh > ~/.zfunc/_linkshelf # save to fpath directory");
            eprintln!("#");
        }
        "fish" => {
            eprintln!("# Outputting fish completion script for linkshelf");
            eprintln!("# To use, run one of:");
            eprintln!("# - linkshelf completion fish | source             # one-time use");
            eprintln!("# - linkshelf completion fish > ~/.config/fish/completions/linkshelf.fish");
            eprintln!("#");
        }
        _ => {}
    }

    completion::generate_completion(shell).map_err(|e| {
        error::CliError::CommandFailed(format!("Failed to generate completion script: {}", e))
    })
}
