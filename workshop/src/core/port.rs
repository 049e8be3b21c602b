//! Dev-server port derivation.

use anyhow::{Context, Result, anyhow};

use crate::core::token::leading_digits;
use crate::core::types::DirectoryEntry;

/// Base port for one root category (`exercise` -> 4000).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortBase<'a> {
    pub root: &'a str,
    pub base: u16,
}

/// `base(category) + leading number of the basename`.
pub fn derive_port(entry: &DirectoryEntry, bases: &[PortBase<'_>]) -> Result<u16> {
    let base = bases
        .iter()
        .find(|candidate| candidate.root == entry.root)
        .map(|candidate| candidate.base)
        .ok_or_else(|| anyhow!("no port base configured for root {:?}", entry.root))?;
    let digits = leading_digits(&entry.name)
        .ok_or_else(|| anyhow!("{} has no numeric prefix", entry.rel_path()))?;
    let number: u16 = digits
        .parse()
        .with_context(|| format!("parse numeric prefix of {}", entry.rel_path()))?;
    base.checked_add(number)
        .ok_or_else(|| anyhow!("port {base} + {number} is out of range"))
}
