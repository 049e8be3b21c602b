//! Workshop CLI.
//!
//! Resolves exercise/final app tokens and runs developer commands in the
//! resolved directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use workshop::advance::advance;
use workshop::bulk::{BulkTask, nuke, run_each};
use workshop::dev::dev;
use workshop::diff::diff;
use workshop::exit_codes;
use workshop::io::layout::{WorkshopPaths, absolute_root};
use workshop::io::process::SystemRunner;
use workshop::logging;
use workshop::outcome::CommandOutcome;
use workshop::resolve::{Workshop, print_apps, print_resolved};

#[derive(Parser)]
#[command(
    name = "workshop",
    version,
    about = "Resolve workshop exercises and run developer commands in them"
)]
struct Cli {
    /// Workshop root containing the exercise and final directories.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Config file (defaults to `<root>/workshop.toml`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Copy an app into the workspace directory (skipping node_modules).
    Advance {
        /// App token, e.g. `3`, `3.1`, `final/02`, `routing`.
        app: String,
    },
    /// Start an app's dev server on its derived port.
    Dev { app: String },
    /// Diff an app's sources against its final counterpart.
    Diff {
        first: String,
        /// Defaults to the final counterpart of `first`.
        second: Option<String>,
    },
    /// Install dependencies in every app, one at a time.
    Install,
    /// Build every app, one at a time.
    Build,
    /// Delete node_modules and lockfiles from every app and the workspace.
    Nuke,
    /// Print the directory a token resolves to.
    Resolve { token: String },
    /// Print every app in resolution order.
    List,
}

fn main() {
    logging::init();
    match run() {
        Ok(outcome) => {
            outcome.report();
            std::process::exit(outcome.exit_code());
        }
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<CommandOutcome> {
    let cli = Cli::parse();
    let root = match cli.root {
        Some(root) => absolute_root(&root)?,
        None => std::env::current_dir().context("read current directory")?,
    };
    let paths = match cli.config {
        Some(config) => WorkshopPaths::with_config(root, config),
        None => WorkshopPaths::new(root),
    };
    let workshop = Workshop::load(paths)?;
    let runner = SystemRunner;

    match cli.command {
        Command::Advance { app } => advance(&workshop, &app),
        Command::Dev { app } => dev(&workshop, &app, &runner),
        Command::Diff { first, second } => diff(&workshop, &first, second.as_deref(), &runner),
        Command::Install => run_each(&workshop, BulkTask::Install, &runner),
        Command::Build => run_each(&workshop, BulkTask::Build, &runner),
        Command::Nuke => nuke(&workshop),
        Command::Resolve { token } => Ok(print_resolved(&workshop, &token)),
        Command::List => Ok(print_apps(&workshop)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_diff_with_optional_second() {
        let cli = Cli::parse_from(["workshop", "diff", "01"]);
        assert!(matches!(
            cli.command,
            Command::Diff { ref first, second: None } if first == "01"
        ));

        let cli = Cli::parse_from(["workshop", "diff", "1", "3.1"]);
        assert!(matches!(
            cli.command,
            Command::Diff { second: Some(ref second), .. } if second == "3.1"
        ));
    }

    #[test]
    fn parse_global_root_after_subcommand() {
        let cli = Cli::parse_from(["workshop", "resolve", "3", "--root", "/tmp/ws"]);
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/ws")));
        assert!(matches!(cli.command, Command::Resolve { ref token } if token == "3"));
    }

    #[test]
    fn parse_bulk_commands() {
        assert!(matches!(
            Cli::parse_from(["workshop", "install"]).command,
            Command::Install
        ));
        assert!(matches!(
            Cli::parse_from(["workshop", "nuke"]).command,
            Command::Nuke
        ));
    }
}
