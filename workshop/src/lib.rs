//! Operator tooling for a numbered exercise/final workshop layout.
//!
//! Operators type short tokens (`3`, `3.1`, `final/02`, `routing`) that are
//! resolved to one app directory, and the tool then runs a developer command
//! there. The architecture keeps a strict split:
//!
//! - **[`core`]**: Pure, deterministic logic (token parsing, matching, port
//!   derivation). No I/O.
//! - **[`io`]**: Side-effecting operations (directory listing, config, copying,
//!   child processes).
//!
//! Command modules ([`advance`], [`dev`], [`diff`], [`bulk`], [`resolve`])
//! coordinate core logic with I/O to implement the CLI.

pub mod advance;
pub mod bulk;
pub mod core;
pub mod dev;
pub mod diff;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod outcome;
pub mod resolve;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
