//! Deterministic token-to-directory matching.
//!
//! Strategies are tried in order and the first that yields a candidate wins:
//!
//! 1. extra credit (`3.1`, `final/3.1`)
//! 2. bare number (`3`, `03`)
//! 3. path prefix against `root/name` (`exercise/03`, `./final/03-dyn`)
//! 4. fuzzy score against basenames, see [`fuzzy_score`]
//!
//! A plain token with a directory part (`final/routing`, `final/3`) only
//! falls back to candidates under that directory.
//!
//! Candidate order is significant: ties in strategies 1-3 go to the earliest
//! candidate, so callers pass directories in listing order.

use crate::core::token::{TokenForm, has_number};
use crate::core::types::{DirectoryEntry, ResolveOutcome};

/// Resolve `token` to one of `candidates`.
pub fn resolve(token: &str, candidates: &[DirectoryEntry]) -> ResolveOutcome {
    match best_match(token, candidates) {
        Some(entry) => ResolveOutcome::Found(entry.clone()),
        None => ResolveOutcome::NotFound {
            token: token.to_string(),
        },
    }
}

fn best_match<'a>(token: &str, candidates: &'a [DirectoryEntry]) -> Option<&'a DirectoryEntry> {
    if token.trim().is_empty() {
        return None;
    }
    match TokenForm::parse(token) {
        TokenForm::ExtraCredit {
            prefix,
            exercise,
            extra,
        } => extra_credit_match(&prefix, &exercise, &extra, candidates),
        TokenForm::Number(padded) => number_match(&padded, candidates),
        TokenForm::Plain(path) => {
            prefix_match(&path, candidates).or_else(|| scoped_match(&path, candidates))
        }
    }
}

fn extra_credit_match<'a>(
    prefix: &str,
    exercise: &str,
    extra: &str,
    candidates: &'a [DirectoryEntry],
) -> Option<&'a DirectoryEntry> {
    let marker = format!(".extra-{extra}");
    candidates.iter().find(|entry| {
        entry.path_key().starts_with(prefix)
            && has_number(&entry.name, exercise)
            && entry.name.contains(&marker)
    })
}

/// Plain variants beat extra-credit variants; otherwise listing order decides.
fn number_match<'a, I>(padded: &str, candidates: I) -> Option<&'a DirectoryEntry>
where
    I: IntoIterator<Item = &'a DirectoryEntry>,
{
    let mut numbered = candidates
        .into_iter()
        .filter(|entry| has_number(&entry.name, padded));
    let first = numbered.next()?;
    if !first.is_extra_credit() {
        return Some(first);
    }
    numbered
        .find(|entry| !entry.is_extra_credit())
        .or(Some(first))
}

fn prefix_match<'a>(path: &str, candidates: &'a [DirectoryEntry]) -> Option<&'a DirectoryEntry> {
    if path.is_empty() {
        return None;
    }
    candidates
        .iter()
        .find(|entry| entry.path_key().starts_with(path))
}

/// Number or fuzzy match on the last segment, restricted to `dir/` when one is given.
fn scoped_match<'a>(path: &str, candidates: &'a [DirectoryEntry]) -> Option<&'a DirectoryEntry> {
    let (dir, needle) = path.rsplit_once('/').unwrap_or(("", path));
    let scope = format!("{dir}/");
    let scoped = candidates
        .iter()
        .filter(move |entry| dir.is_empty() || entry.path_key().starts_with(&scope));
    match TokenForm::parse(needle) {
        TokenForm::Number(padded) => number_match(&padded, scoped),
        _ => fuzzy_match(needle, scoped),
    }
}

fn fuzzy_match<'a, I>(needle: &str, candidates: I) -> Option<&'a DirectoryEntry>
where
    I: IntoIterator<Item = &'a DirectoryEntry>,
{
    candidates
        .into_iter()
        .filter_map(|entry| fuzzy_score(needle, &entry.name).map(|score| (score, entry)))
        .min_by(|(score_a, a), (score_b, b)| {
            score_b
                .cmp(score_a)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.root.cmp(&b.root))
        })
        .map(|(_, entry)| entry)
}

/// Rank of `needle` against a directory basename, case-insensitive.
///
/// - 4: equal
/// - 3: basename starts with needle
/// - 2: basename contains needle
/// - 1: basename initials contain needle (`dynamic-params` -> `dp`)
///
/// `None` means no match.
pub fn fuzzy_score(needle: &str, name: &str) -> Option<u8> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    let name = name.to_lowercase();
    if name == needle {
        Some(4)
    } else if name.starts_with(&needle) {
        Some(3)
    } else if name.contains(&needle) {
        Some(2)
    } else if initials(&name).contains(&needle) {
        Some(1)
    } else {
        None
    }
}

/// First letter of each word; digit runs are kept whole (`03-dynamic-params` -> `03dp`).
fn initials(name: &str) -> String {
    name.split(['-', '_', '.', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let digits: String = word.chars().take_while(char::is_ascii_digit).collect();
            if digits.is_empty() {
                word.chars().take(1).collect()
            } else {
                digits
            }
        })
        .collect()
}
