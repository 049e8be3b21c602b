//! Test-only helpers: a throwaway workshop tree and a scripted process runner.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

use crate::io::config::{CONFIG_FILE_NAME, load_config};
use crate::io::layout::WorkshopPaths;
use crate::io::process::{CommandSpec, ExitReport, ScriptRunner};
use crate::resolve::Workshop;

/// Temporary workshop root; removed on drop.
pub struct TestWorkshop {
    dir: TempDir,
}

impl TestWorkshop {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir().context("create temp workshop")?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create app directories such as `exercise/01-routing`, each with an `app/` subdir.
    pub fn apps(&self, rel_paths: &[&str]) -> Result<()> {
        for rel in rel_paths {
            let dir = self.path().join(rel).join("app");
            fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        }
        Ok(())
    }

    /// Write a file relative to the workshop root, creating parents.
    pub fn write(&self, rel_path: &str, contents: &str) -> Result<()> {
        let path = self.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))
    }

    pub fn write_config(&self, contents: &str) -> Result<()> {
        self.write(CONFIG_FILE_NAME, contents)
    }

    /// Workshop over this root, loading `workshop.toml` if one was written.
    ///
    /// Panics on an invalid config; tests that expect one should call
    /// [`Workshop::load`] directly.
    pub fn workshop(&self) -> Workshop {
        let paths = WorkshopPaths::new(self.path());
        let config = load_config(&paths.config_path).expect("load test config");
        Workshop::new(paths, config)
    }
}

/// Records every command and replays queued exit reports (success once the queue drains).
#[derive(Default)]
pub struct ScriptedRunner {
    exits: RefCell<VecDeque<ExitReport>>,
    runs: RefCell<Vec<CommandSpec>>,
    spawns: RefCell<Vec<CommandSpec>>,
    fail_spawn: bool,
}

impl ScriptedRunner {
    pub fn new(exits: Vec<ExitReport>) -> Self {
        Self {
            exits: RefCell::new(exits.into()),
            ..Self::default()
        }
    }

    /// A runner whose every spawn fails as if the program were missing.
    pub fn failing_spawn() -> Self {
        Self {
            fail_spawn: true,
            ..Self::default()
        }
    }

    pub fn runs(&self) -> Vec<CommandSpec> {
        self.runs.borrow().clone()
    }

    pub fn spawns(&self) -> Vec<CommandSpec> {
        self.spawns.borrow().clone()
    }
}

impl ScriptRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> Result<ExitReport> {
        if self.fail_spawn {
            return Err(anyhow!("spawn `{spec}`: program not found"));
        }
        self.runs.borrow_mut().push(spec.clone());
        Ok(self
            .exits
            .borrow_mut()
            .pop_front()
            .unwrap_or(ExitReport::SUCCESS))
    }

    fn spawn_detached(&self, spec: &CommandSpec) -> Result<u32> {
        if self.fail_spawn {
            return Err(anyhow!("spawn `{spec}`: program not found"));
        }
        self.spawns.borrow_mut().push(spec.clone());
        Ok(4242)
    }
}
