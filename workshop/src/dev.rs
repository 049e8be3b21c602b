//! `workshop dev`: start an app's dev server on its derived port.
//!
//! The server is spawned detached and never supervised; this process exits
//! as soon as the child is running.

use std::ffi::OsString;

use anyhow::{Context, Result};
use tracing::info;

use crate::core::port::derive_port;
use crate::core::types::DirectoryEntry;
use crate::io::app_config::read_dev_server_port;
use crate::io::process::{CommandSpec, ScriptRunner, missing_env};
use crate::outcome::CommandOutcome;
use crate::resolve::Workshop;

pub const PORT_VAR: &str = "PORT";
pub const DEV_SERVER_PORT_VAR: &str = "DEV_SERVER_PORT";

/// Everything needed to launch one dev server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevPlan {
    pub entry: DirectoryEntry,
    pub port: u16,
    pub dev_server_port: u16,
    pub spec: CommandSpec,
}

/// Derive ports and the command line for `entry`.
///
/// `lookup` reads the parent environment; variables it already defines are
/// not overridden.
pub fn plan_dev<F>(workshop: &Workshop, entry: DirectoryEntry, lookup: F) -> Result<DevPlan>
where
    F: Fn(&str) -> Option<OsString>,
{
    let port = derive_port(&entry, &workshop.config.port_bases())?;
    let app_dir = workshop.app_dir(&entry);
    let app_config = app_dir.join(&workshop.config.app_config_file);
    let dev_server_port = read_dev_server_port(&app_config)
        .with_context(|| format!("dev server port for {}", entry.rel_path()))?;
    let env = missing_env(
        vec![
            (PORT_VAR.to_string(), port.to_string()),
            (DEV_SERVER_PORT_VAR.to_string(), dev_server_port.to_string()),
        ],
        lookup,
    );
    let spec = CommandSpec::from_argv(&workshop.config.dev_command, app_dir)?.with_env(env);
    Ok(DevPlan {
        entry,
        port,
        dev_server_port,
        spec,
    })
}

pub fn dev<R: ScriptRunner>(workshop: &Workshop, token: &str, runner: &R) -> Result<CommandOutcome> {
    let Some(entry) = workshop.resolve(token).into_found() else {
        return Ok(CommandOutcome::not_found(token, None));
    };
    let plan = plan_dev(workshop, entry, |key| std::env::var_os(key))?;
    let pid = runner.spawn_detached(&plan.spec)?;
    info!(
        app = %plan.entry,
        pid,
        port = plan.port,
        dev_server_port = plan.dev_server_port,
        "dev server spawned"
    );
    println!(
        "Starting {} on port {} (dev server port {})",
        plan.entry.rel_path(),
        plan.port,
        plan.dev_server_port
    );
    Ok(CommandOutcome::Done)
}
