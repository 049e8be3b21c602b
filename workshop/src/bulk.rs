//! Commands that walk every app: `install`, `build`, `nuke`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::io::process::{CommandSpec, ScriptRunner};
use crate::outcome::CommandOutcome;
use crate::resolve::Workshop;

/// Per-app command run sequentially by [`run_each`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkTask {
    Install,
    Build,
}

impl BulkTask {
    fn argv(self, workshop: &Workshop) -> &[String] {
        match self {
            Self::Install => &workshop.config.install_command,
            Self::Build => &workshop.config.build_command,
        }
    }

    fn banner(self) -> &'static str {
        match self {
            Self::Install => "Installing dependencies for",
            Self::Build => "Building",
        }
    }
}

/// Run `task` in every app, one at a time, stopping at the first failure.
///
/// Apps that already succeeded are left as they are.
pub fn run_each<R: ScriptRunner>(
    workshop: &Workshop,
    task: BulkTask,
    runner: &R,
) -> Result<CommandOutcome> {
    let apps = workshop.apps();
    if apps.is_empty() {
        println!("No apps found");
        return Ok(CommandOutcome::Done);
    }
    let listing: Vec<String> = apps.iter().map(|app| app.rel_path()).collect();
    println!("{}:\n- {}\n", task.banner(), listing.join("\n- "));

    for app in &apps {
        println!("{} {}", task.banner(), app.rel_path());
        let spec = CommandSpec::from_argv(task.argv(workshop), workshop.app_dir(app))?;
        let report = runner.run(&spec)?;
        if !report.success() {
            warn!(app = %app, exit_code = ?report.code, ?task, "stopping after failure");
            return Ok(CommandOutcome::ChildFailed {
                command: format!("{spec} (in {})", app.rel_path()),
                code: report.code,
            });
        }
        debug!(app = %app, ?task, "app finished");
    }
    info!(count = apps.len(), ?task, "all apps finished");
    Ok(CommandOutcome::Done)
}

/// Every directory `nuke` cleans: each app plus the workspace, if present.
pub fn nuke_targets(workshop: &Workshop) -> Vec<PathBuf> {
    let mut targets: Vec<PathBuf> = workshop
        .apps()
        .iter()
        .map(|app| workshop.app_dir(app))
        .collect();
    let workspace = workshop.workspace_dir();
    if workspace.is_dir() {
        targets.push(workspace);
    }
    targets
}

/// Delete installed dependencies and lockfiles everywhere.
///
/// Individual deletion failures are logged and skipped.
pub fn nuke(workshop: &Workshop) -> Result<CommandOutcome> {
    for dir in nuke_targets(workshop) {
        let display = display_relative(&workshop.paths.root, &dir);
        println!("Deleting {} from {display}", workshop.config.nuke_paths.join(", "));
        for rel in &workshop.config.nuke_paths {
            remove_path(&dir.join(rel));
        }
    }
    Ok(CommandOutcome::Done)
}

fn remove_path(path: &Path) {
    let result = match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(err) => Err(err),
    };
    match result {
        Ok(()) => debug!(path = %path.display(), "removed"),
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => warn!(path = %path.display(), err = %err, "could not remove"),
    }
}

fn display_relative(root: &Path, dir: &Path) -> String {
    match dir.strip_prefix(root) {
        Ok(rel) => format!("./{}", rel.display()),
        Err(_) => dir.display().to_string(),
    }
}
