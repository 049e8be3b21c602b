//! Token resolution against the apps on disk, for every command and `workshop resolve`.

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, instrument};

use crate::core::matcher;
use crate::core::types::{DirectoryEntry, ResolveOutcome};
use crate::io::config::{WorkshopConfig, load_config};
use crate::io::layout::{WorkshopPaths, list_all};
use crate::outcome::CommandOutcome;

/// A workshop root plus its loaded configuration.
#[derive(Debug, Clone)]
pub struct Workshop {
    pub paths: WorkshopPaths,
    pub config: WorkshopConfig,
}

impl Workshop {
    pub fn new(paths: WorkshopPaths, config: WorkshopConfig) -> Self {
        Self { paths, config }
    }

    /// Load `workshop.toml` (or defaults) for `paths`.
    pub fn load(paths: WorkshopPaths) -> Result<Self> {
        let config = load_config(&paths.config_path)?;
        Ok(Self::new(paths, config))
    }

    /// Every app, listed fresh from disk in resolution order.
    pub fn apps(&self) -> Vec<DirectoryEntry> {
        list_all(&self.paths, &self.config)
    }

    #[instrument(skip(self))]
    pub fn resolve(&self, token: &str) -> ResolveOutcome {
        let token = self.paths.relativize_token(token);
        let outcome = matcher::resolve(&token, &self.apps());
        debug!(?outcome, "resolved token");
        outcome
    }

    pub fn app_dir(&self, entry: &DirectoryEntry) -> PathBuf {
        self.paths.entry_dir(entry)
    }

    pub fn workspace_dir(&self) -> PathBuf {
        self.paths.workspace_dir(&self.config)
    }
}

/// `workshop resolve`: print the relative path a token resolves to.
pub fn print_resolved(workshop: &Workshop, token: &str) -> CommandOutcome {
    match workshop.resolve(token) {
        ResolveOutcome::Found(entry) => {
            println!("{}", entry.rel_path());
            CommandOutcome::Done
        }
        ResolveOutcome::NotFound { token } => CommandOutcome::not_found(token, None),
    }
}

/// `workshop list`: print every app in resolution order.
pub fn print_apps(workshop: &Workshop) -> CommandOutcome {
    let apps = workshop.apps();
    if apps.is_empty() {
        eprintln!(
            "no apps found under {}",
            workshop.config.root_names().collect::<Vec<_>>().join(", ")
        );
    }
    for app in apps {
        println!("{}", app.rel_path());
    }
    CommandOutcome::Done
}
