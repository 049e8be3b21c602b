//! Stable exit codes for workshop CLI commands.
//!
//! A failed child command exits with the child's own code instead.

/// Command succeeded, or a token did not resolve (reported, not fatal).
pub const OK: i32 = 0;
/// Invalid config, I/O failure, or a child killed by a signal.
pub const INVALID: i32 = 1;
