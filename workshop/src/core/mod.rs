//! Deterministic, pure logic shared by workshop commands.
//!
//! Core modules must be free of I/O side effects. They operate on directory
//! listings already read from disk and return deterministic outputs.

pub mod matcher;
pub mod port;
pub mod token;
pub mod types;
