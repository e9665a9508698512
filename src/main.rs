mod commands;
mod config;
mod content;
mod diagnostics;
mod error;
mod info;
mod resolver;
mod store;
mod types;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "frost", about = "Source links for flake documentation records")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show commands, identifier syntax, and current project state
    Info {
        /// Output as JSON instead of markdown
        #[arg(long)]
        json: bool,
    },
    /// Print the link for a flake identifier, optionally to a file inside it
    Link {
        /// Flake identifier, e.g. github:owner/repo or path:/srv/flake
        uri: String,
        /// File relative to the flake root
        path: Option<String>,
    },
    /// List lib records with their source locations and links
    List {
        /// Flake identifier, overriding `flake` in .frost.toml
        #[arg(long)]
        flake: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Remove the /nix/store/<hash>-<name> prefix from a path
    Strip {
        /// Path as recorded by the evaluator
        path: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info { json } => {
            commands::info(json);
            Ok(ExitCode::SUCCESS)
        },
        Commands::Link { uri, path } => {
            commands::link(&uri, path.as_deref()).map(|()| return ExitCode::SUCCESS)
        },
        Commands::List { flake, json } => commands::list(flake, json),
        Commands::Strip { path } => {
            commands::strip(&path);
            Ok(ExitCode::SUCCESS)
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(3)
        },
    }
}
