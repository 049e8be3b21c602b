//! `workshop diff`: compare an exercise's app sources with its final counterpart.

use anyhow::Result;
use tracing::{debug, info};

use crate::core::token::TokenForm;
use crate::core::types::DirectoryEntry;
use crate::io::config::DiffConfig;
use crate::io::process::{CommandSpec, ScriptRunner};
use crate::outcome::CommandOutcome;
use crate::resolve::Workshop;

/// `git diff --no-index` exits 1 when the trees differ.
const GIT_DIFF_DIFFERENCES: i32 = 1;

/// Expand a bare number into `./<root>/NN`; other tokens pass through.
pub fn expand_number(token: &str, root: &str) -> String {
    match TokenForm::parse(token) {
        TokenForm::Number(padded) => format!("./{root}/{padded}"),
        _ => token.to_string(),
    }
}

/// Counterpart of a resolved app: the same name under the target root.
///
/// Apps outside `source_root` are their own counterpart.
pub fn counterpart(entry: &DirectoryEntry, config: &DiffConfig) -> String {
    if entry.root == config.source_root {
        DirectoryEntry::new(&config.target_root, &entry.name).rel_path()
    } else {
        entry.rel_path()
    }
}

pub fn diff<R: ScriptRunner>(
    workshop: &Workshop,
    first: &str,
    second: Option<&str>,
    runner: &R,
) -> Result<CommandOutcome> {
    let config = &workshop.config.diff;

    let first_token = expand_number(first, &config.source_root);
    let Some(first_entry) = workshop.resolve(&first_token).into_found() else {
        return Ok(CommandOutcome::not_found(first, Some(first_token)));
    };

    let (second_label, second_token) = match second {
        Some(second) => (second.to_string(), expand_number(second, &config.target_root)),
        None => {
            let token = counterpart(&first_entry, config);
            (token.clone(), token)
        }
    };
    let Some(second_entry) = workshop.resolve(&second_token).into_found() else {
        return Ok(CommandOutcome::not_found(second_label, Some(second_token)));
    };

    let left = format!("{}/{}", first_entry.rel_path(), config.subdir);
    let right = format!("{}/{}", second_entry.rel_path(), config.subdir);
    println!("Showing diff between {left} and {right}");

    let spec = CommandSpec {
        program: "git".to_string(),
        args: vec!["diff".to_string(), "--no-index".to_string(), left, right],
        workdir: workshop.paths.root.clone(),
        env: Vec::new(),
    };
    let report = runner.run(&spec)?;
    debug!(exit_code = ?report.code, "git diff finished");
    match report.code {
        Some(code) if code == 0 || code == GIT_DIFF_DIFFERENCES => {
            info!(first = %first_entry, second = %second_entry, identical = code == 0, "diff shown");
            Ok(CommandOutcome::Done)
        }
        code => Ok(CommandOutcome::ChildFailed {
            command: spec.to_string(),
            code,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::process::ExitReport;
    use crate::test_support::{ScriptedRunner, TestWorkshop};

    fn fixture() -> TestWorkshop {
        let fixture = TestWorkshop::new().expect("fixture");
        fixture
            .apps(&[
                "exercise/01-routing",
                "exercise/03-dynamic-params",
                "final/01-routing",
                "final/03-dynamic-params",
                "final/03-dynamic-params.extra-01-marked",
            ])
            .expect("apps");
        fixture
    }

    fn diffed(runner: &ScriptedRunner) -> Vec<String> {
        let runs = runner.runs();
        assert_eq!(runs.len(), 1, "expected exactly one git invocation");
        assert_eq!(runs[0].program, "git");
        runs[0].args.clone()
    }

    #[test]
    fn expands_numbers_into_roots() {
        assert_eq!(expand_number("1", "exercise"), "./exercise/01");
        assert_eq!(expand_number("12", "final"), "./final/12");
        assert_eq!(expand_number("3.1", "final"), "3.1");
        assert_eq!(expand_number("routing", "final"), "routing");
    }

    #[test]
    fn counterpart_swaps_source_root_only() {
        let config = DiffConfig::default();
        assert_eq!(
            counterpart(&DirectoryEntry::new("exercise", "01-routing"), &config),
            "./final/01-routing"
        );
        assert_eq!(
            counterpart(&DirectoryEntry::new("final", "01-routing"), &config),
            "./final/01-routing"
        );
    }

    #[test]
    fn single_argument_diffs_against_final_counterpart() {
        let fixture = fixture();
        let runner = ScriptedRunner::new(vec![ExitReport { code: Some(1) }]);

        let outcome = diff(&fixture.workshop(), "01", None, &runner).expect("diff");

        assert_eq!(outcome, CommandOutcome::Done);
        assert_eq!(
            diffed(&runner),
            [
                "diff",
                "--no-index",
                "./exercise/01-routing/app",
                "./final/01-routing/app"
            ]
        );
        assert_eq!(runner.runs()[0].workdir, fixture.path());
    }

    #[test]
    fn explicit_second_number_expands_into_final() {
        let fixture = fixture();
        let runner = ScriptedRunner::default();

        diff(&fixture.workshop(), "1", Some("3"), &runner).expect("diff");

        assert_eq!(
            diffed(&runner)[2..],
            ["./exercise/01-routing/app", "./final/03-dynamic-params/app"]
        );
    }

    #[test]
    fn extra_credit_second_argument() {
        let fixture = fixture();
        let runner = ScriptedRunner::default();

        diff(&fixture.workshop(), "3", Some("3.1"), &runner).expect("diff");

        assert_eq!(
            diffed(&runner)[3],
            "./final/03-dynamic-params.extra-01-marked/app"
        );
    }

    #[test]
    fn missing_first_reports_expanded_token() {
        let fixture = fixture();
        let runner = ScriptedRunner::default();

        let outcome = diff(&fixture.workshop(), "9", None, &runner).expect("diff");

        assert_eq!(
            outcome,
            CommandOutcome::not_found("9", Some("./exercise/09".to_string()))
        );
        assert!(runner.runs().is_empty());
    }

    #[test]
    fn missing_counterpart_reports_second() {
        let fixture = TestWorkshop::new().expect("fixture");
        fixture.apps(&["exercise/05-forms"]).expect("apps");
        let runner = ScriptedRunner::default();

        let outcome = diff(&fixture.workshop(), "5", None, &runner).expect("diff");

        assert_eq!(
            outcome,
            CommandOutcome::not_found("./final/05-forms", Some("./final/05-forms".to_string()))
        );
        assert!(runner.runs().is_empty());
    }

    #[test]
    fn git_errors_surface_as_child_failures() {
        let fixture = fixture();
        let runner = ScriptedRunner::new(vec![ExitReport { code: Some(128) }]);

        let outcome = diff(&fixture.workshop(), "1", None, &runner).expect("diff");

        assert_eq!(
            outcome,
            CommandOutcome::ChildFailed {
                command: "git diff --no-index ./exercise/01-routing/app ./final/01-routing/app"
                    .to_string(),
                code: Some(128),
            }
        );
    }
}
