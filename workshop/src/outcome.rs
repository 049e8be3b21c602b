//! Expected, non-error results of a workshop command.

use crate::exit_codes;

/// How a command finished when it did not hit an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Done,
    /// A token did not resolve. Reported, never fatal.
    NotFound {
        /// Token as the operator typed it.
        token: String,
        /// Expanded form that was looked up, when it differs from `token`.
        attempted: Option<String>,
    },
    /// A child command exited unsuccessfully; its output already reached the terminal.
    ChildFailed { command: String, code: Option<i32> },
}

impl CommandOutcome {
    pub fn not_found(token: impl Into<String>, attempted: Option<String>) -> Self {
        Self::NotFound {
            token: token.into(),
            attempted,
        }
    }

    /// Print the operator-facing message for soft failures.
    pub fn report(&self) {
        match self {
            Self::Done => {}
            Self::NotFound {
                token,
                attempted: Some(attempted),
            } if attempted != token => eprintln!("{token} ({attempted}) does not exist"),
            Self::NotFound { token, .. } => eprintln!("{token} does not exist"),
            Self::ChildFailed {
                command,
                code: Some(code),
            } => eprintln!("`{command}` exited with code {code}"),
            Self::ChildFailed { command, code: None } => {
                eprintln!("`{command}` was terminated by a signal");
            }
        }
    }

    /// Process exit code; a failed child's own code is passed through.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Done | Self::NotFound { .. } => exit_codes::OK,
            Self::ChildFailed { code, .. } => match code {
                Some(code) if *code != exit_codes::OK => *code,
                _ => exit_codes::INVALID,
            },
        }
    }
}
