//! Workshop configuration stored in `workshop.toml` at the workshop root.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::port::PortBase;

pub const CONFIG_FILE_NAME: &str = "workshop.toml";

/// Workshop configuration (TOML).
///
/// Edited by humans. Missing fields default to the conventional
/// `exercise/` + `final/` npm layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WorkshopConfig {
    /// App roots in listing order. Earlier roots win ties during resolution.
    pub roots: Vec<RootConfig>,

    /// Directory (relative to the workshop root) that `advance` copies into.
    pub workspace_dir: String,

    /// Per-app file holding the `devServerPort` export.
    pub app_config_file: String,

    /// Path components skipped when copying an app into the workspace.
    pub copy_exclude: Vec<String>,

    pub dev_command: Vec<String>,
    pub install_command: Vec<String>,
    pub build_command: Vec<String>,

    /// Paths (relative to each app) removed by `nuke`.
    pub nuke_paths: Vec<String>,

    pub diff: DiffConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RootConfig {
    pub name: String,
    /// Dev-server base port; `None` means apps under this root cannot run `dev`.
    #[serde(default)]
    pub port_base: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DiffConfig {
    /// Root a bare-number first argument expands into.
    pub source_root: String,
    /// Root substituted for `source_root` to find the counterpart.
    pub target_root: String,
    /// Subdirectory of each app that gets diffed.
    pub subdir: String,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            source_root: "exercise".to_string(),
            target_root: "final".to_string(),
            subdir: "app".to_string(),
        }
    }
}

impl Default for WorkshopConfig {
    fn default() -> Self {
        Self {
            roots: vec![
                RootConfig {
                    name: "exercise".to_string(),
                    port_base: Some(4000),
                },
                RootConfig {
                    name: "final".to_string(),
                    port_base: Some(5000),
                },
            ],
            workspace_dir: "workspace".to_string(),
            app_config_file: "remix.config.js".to_string(),
            copy_exclude: vec!["node_modules".to_string()],
            dev_command: command(&["npm", "run", "dev"]),
            install_command: command(&["npm", "install"]),
            build_command: command(&["npm", "run", "build"]),
            nuke_paths: vec![
                "node_modules".to_string(),
                "package-lock.json".to_string(),
            ],
            diff: DiffConfig::default(),
        }
    }
}

fn command(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| (*part).to_string()).collect()
}

impl WorkshopConfig {
    pub fn validate(&self) -> Result<()> {
        if self.roots.is_empty() {
            return Err(anyhow!("roots must list at least one directory"));
        }
        let mut seen = HashSet::new();
        for root in &self.roots {
            if !is_single_segment(&root.name) {
                return Err(anyhow!(
                    "roots: {:?} must be a single directory name",
                    root.name
                ));
            }
            if !seen.insert(root.name.as_str()) {
                return Err(anyhow!("roots: duplicate root {:?}", root.name));
            }
        }
        if !is_single_segment(&self.workspace_dir) {
            return Err(anyhow!("workspace_dir must be a single directory name"));
        }
        if seen.contains(self.workspace_dir.as_str()) {
            return Err(anyhow!("workspace_dir must not also be a root"));
        }
        if self.app_config_file.trim().is_empty() {
            return Err(anyhow!("app_config_file must not be empty"));
        }
        if self.copy_exclude.iter().any(|name| name.trim().is_empty()) {
            return Err(anyhow!("copy_exclude entries must not be empty"));
        }
        if self.nuke_paths.iter().any(|path| path.trim().is_empty()) {
            return Err(anyhow!("nuke_paths entries must not be empty"));
        }
        for (label, cmd) in [
            ("dev_command", &self.dev_command),
            ("install_command", &self.install_command),
            ("build_command", &self.build_command),
        ] {
            if cmd.is_empty() || cmd[0].trim().is_empty() {
                return Err(anyhow!("{label} must be a non-empty array"));
            }
        }
        if self.diff.source_root.trim().is_empty() || self.diff.target_root.trim().is_empty() {
            return Err(anyhow!("diff.source_root and diff.target_root must not be empty"));
        }
        Ok(())
    }

    pub fn root_names(&self) -> impl Iterator<Item = &str> {
        self.roots.iter().map(|root| root.name.as_str())
    }

    pub fn port_bases(&self) -> Vec<PortBase<'_>> {
        self.roots
            .iter()
            .filter_map(|root| {
                root.port_base.map(|base| PortBase {
                    root: &root.name,
                    base,
                })
            })
            .collect()
    }
}

fn is_single_segment(name: &str) -> bool {
    let name = name.trim();
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `WorkshopConfig::default()`.
pub fn load_config(path: &Path) -> Result<WorkshopConfig> {
    if !path.exists() {
        let cfg = WorkshopConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: WorkshopConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid {}", path.display()))?;
    Ok(cfg)
}
