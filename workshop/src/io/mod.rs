//! I/O helpers for workshop commands.

pub mod app_config;
pub mod config;
pub mod copy;
pub mod layout;
pub mod process;
