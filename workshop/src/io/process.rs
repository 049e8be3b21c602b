//! Child process helpers for developer commands.
//!
//! Commands inherit the terminal's stdio so the operator sees live output.
//! The runner never retries and never swallows a non-zero exit.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, instrument};

/// A command line to run inside one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub workdir: PathBuf,
    /// Variables added on top of the inherited environment.
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    /// Build from a configured argv (`["npm", "run", "dev"]`).
    pub fn from_argv(argv: &[String], workdir: impl Into<PathBuf>) -> Result<Self> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| anyhow!("command must not be empty"))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            workdir: workdir.into(),
            env: Vec::new(),
        })
    }

    pub fn with_env(mut self, env: Vec<(String, String)>) -> Self {
        self.env = env;
        self
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .current_dir(&self.workdir)
            .envs(self.env.iter().map(|(k, v)| (k, v)));
        cmd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a waited-for child exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitReport {
    /// Exit code; `None` when the child was killed by a signal.
    pub code: Option<i32>,
}

impl ExitReport {
    pub const SUCCESS: Self = Self { code: Some(0) };

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Seam between commands and the operating system, so tests can script exits.
pub trait ScriptRunner {
    /// Run to completion with inherited stdio.
    fn run(&self, spec: &CommandSpec) -> Result<ExitReport>;

    /// Start without waiting. Returns the child pid.
    fn spawn_detached(&self, spec: &CommandSpec) -> Result<u32>;
}

pub struct SystemRunner;

impl ScriptRunner for SystemRunner {
    #[instrument(skip_all, fields(command = %spec, workdir = %spec.workdir.display()))]
    fn run(&self, spec: &CommandSpec) -> Result<ExitReport> {
        debug!("running child process");
        let status = spec
            .to_command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .inspect_err(|e| error!(err = %e, "failed to spawn command"))
            .with_context(|| format!("spawn `{spec}` in {}", spec.workdir.display()))?;
        debug!(exit_code = ?status.code(), "command finished");
        Ok(ExitReport {
            code: status.code(),
        })
    }

    #[instrument(skip_all, fields(command = %spec, workdir = %spec.workdir.display()))]
    fn spawn_detached(&self, spec: &CommandSpec) -> Result<u32> {
        let child = spec
            .to_command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .inspect_err(|e| error!(err = %e, "failed to spawn command"))
            .with_context(|| format!("spawn `{spec}` in {}", spec.workdir.display()))?;
        let pid = child.id();
        // Not waited on: the dev server outlives this process.
        drop(child);
        debug!(pid, "detached child started");
        Ok(pid)
    }
}

/// Keep only the variables `lookup` reports as unset, so the parent environment wins.
pub fn missing_env<F>(vars: Vec<(String, String)>, lookup: F) -> Vec<(String, String)>
where
    F: Fn(&str) -> Option<OsString>,
{
    vars.into_iter()
        .filter(|(key, _)| lookup(key).is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| (*part).to_string()).collect()
    }

    #[test]
    fn from_argv_splits_program_and_args() {
        let spec = CommandSpec::from_argv(&argv(&["npm", "run", "dev"]), "/tmp/app").expect("spec");
        assert_eq!(spec.program, "npm");
        assert_eq!(spec.args, ["run", "dev"]);
        assert_eq!(spec.to_string(), "npm run dev");
    }

    #[test]
    fn from_argv_rejects_empty_command() {
        assert!(CommandSpec::from_argv(&[], "/tmp").is_err());
    }

    #[test]
    fn missing_env_drops_variables_already_set() {
        let vars = vec![
            ("PORT".to_string(), "4001".to_string()),
            ("DEV_SERVER_PORT".to_string(), "8002".to_string()),
        ];
        let kept = missing_env(vars, |key| {
            (key == "PORT").then(|| OsString::from("3000"))
        });
        assert_eq!(
            kept,
            vec![("DEV_SERVER_PORT".to_string(), "8002".to_string())]
        );
    }

    #[test]
    fn exit_report_success_requires_zero() {
        assert!(ExitReport::SUCCESS.success());
        assert!(!ExitReport { code: Some(1) }.success());
        assert!(!ExitReport { code: None }.success());
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_reports_exit_codes() {
        let temp = tempfile::tempdir().expect("tempdir");
        let ok = CommandSpec::from_argv(&argv(&["sh", "-c", "exit 0"]), temp.path()).expect("spec");
        let fail =
            CommandSpec::from_argv(&argv(&["sh", "-c", "exit 7"]), temp.path()).expect("spec");
        assert_eq!(SystemRunner.run(&ok).expect("run"), ExitReport::SUCCESS);
        assert_eq!(
            SystemRunner.run(&fail).expect("run"),
            ExitReport { code: Some(7) }
        );
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_applies_workdir_and_env() {
        let temp = tempfile::tempdir().expect("tempdir");
        let spec = CommandSpec::from_argv(
            &argv(&["sh", "-c", "printf %s \"$GREETING\" > out.txt"]),
            temp.path(),
        )
        .expect("spec")
        .with_env(vec![("GREETING".to_string(), "hi".to_string())]);
        assert!(SystemRunner.run(&spec).expect("run").success());
        let written = std::fs::read_to_string(temp.path().join("out.txt")).expect("read");
        assert_eq!(written, "hi");
    }

    #[test]
    fn system_runner_errors_when_program_is_missing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let spec = CommandSpec::from_argv(
            &argv(&["definitely-not-a-real-program-xyz"]),
            temp.path(),
        )
        .expect("spec");
        assert!(SystemRunner.run(&spec).is_err());
    }
}
