//! `workshop advance`: copy an app into the workspace directory.

use anyhow::{Context, Result};
use tracing::info;

use crate::io::copy::copy_tree;
use crate::outcome::CommandOutcome;
use crate::resolve::Workshop;

pub fn advance(workshop: &Workshop, token: &str) -> Result<CommandOutcome> {
    let Some(entry) = workshop.resolve(token).into_found() else {
        return Ok(CommandOutcome::not_found(token, None));
    };
    let src = workshop.app_dir(&entry);
    let dst = workshop.workspace_dir();
    let stats = copy_tree(&src, &dst, &workshop.config.copy_exclude)
        .with_context(|| format!("copy {} into {}", entry.rel_path(), dst.display()))?;
    info!(
        app = %entry,
        files = stats.files,
        skipped = stats.skipped,
        "workspace updated"
    );
    println!("Workspace is now at {}", entry.rel_path());
    Ok(CommandOutcome::Done)
}
