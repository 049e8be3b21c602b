//! Recursive app copy used by `advance`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument};
use walkdir::WalkDir;

/// Counters reported after a copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub files: usize,
    pub dirs: usize,
    /// Entries pruned by the exclude list (a pruned directory counts once).
    pub skipped: usize,
}

/// Copy `src` into `dst`, merging with whatever `dst` already holds.
///
/// Any entry whose name appears in `exclude` is pruned along with its
/// subtree. Existing files in `dst` are overwritten; nothing is deleted.
#[instrument(skip_all, fields(src = %src.display(), dst = %dst.display()))]
pub fn copy_tree(src: &Path, dst: &Path, exclude: &[String]) -> Result<CopyStats> {
    if !src.is_dir() {
        return Err(anyhow!("missing directory {}", src.display()));
    }
    fs::create_dir_all(dst).with_context(|| format!("create {}", dst.display()))?;

    let mut stats = CopyStats::default();
    let mut skipped = 0;
    let walker = WalkDir::new(src).min_depth(1).into_iter().filter_entry(|entry| {
        let excluded = exclude
            .iter()
            .any(|name| entry.file_name().to_string_lossy() == name.as_str());
        if excluded {
            debug!(path = %entry.path().display(), "excluded from copy");
            skipped += 1;
        }
        !excluded
    });

    for entry in walker {
        let entry = entry.with_context(|| format!("walk {}", src.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("relativize {}", entry.path().display()))?;
        let target = dst.join(rel);
        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&target).with_context(|| format!("create {}", target.display()))?;
            stats.dirs += 1;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
            stats.files += 1;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!("copy {} to {}", entry.path().display(), target.display())
            })?;
            stats.files += 1;
        }
    }

    stats.skipped = skipped;
    debug!(files = stats.files, dirs = stats.dirs, skipped = stats.skipped, "copy finished");
    Ok(stats)
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    let link = fs::read_link(src).with_context(|| format!("read link {}", src.display()))?;
    if fs::symlink_metadata(dst).is_ok() {
        fs::remove_file(dst).with_context(|| format!("replace {}", dst.display()))?;
    }
    std::os::unix::fs::symlink(&link, dst)
        .with_context(|| format!("link {} to {}", dst.display(), link.display()))
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst)
        .map(|_| ())
        .with_context(|| format!("copy {} to {}", src.display(), dst.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exclude() -> Vec<String> {
        vec!["node_modules".to_string()]
    }

    #[test]
    fn copies_tree_without_excluded_dirs() {
        let temp = tempfile::tempdir().expect("tempdir");
        let src = temp.path().join("exercise/01-routing");
        fs::create_dir_all(src.join("app/routes")).expect("mkdir");
        fs::create_dir_all(src.join("node_modules/react")).expect("mkdir");
        fs::write(src.join("package.json"), "{}").expect("write");
        fs::write(src.join("app/routes/index.tsx"), "export default 1").expect("write");
        fs::write(src.join("node_modules/react/index.js"), "x").expect("write");

        let dst = temp.path().join("workspace");
        let stats = copy_tree(&src, &dst, &exclude()).expect("copy");

        assert!(dst.join("package.json").exists());
        assert_eq!(
            fs::read_to_string(dst.join("app/routes/index.tsx")).expect("read"),
            "export default 1"
        );
        assert!(!dst.join("node_modules").exists());
        assert_eq!(
            stats,
            CopyStats {
                files: 2,
                dirs: 2,
                skipped: 1
            }
        );
    }

    #[test]
    fn merges_into_existing_destination() {
        let temp = tempfile::tempdir().expect("tempdir");
        let src = temp.path().join("src");
        let dst = temp.path().join("dst");
        fs::create_dir_all(&src).expect("mkdir");
        fs::create_dir_all(dst.join("node_modules")).expect("mkdir");
        fs::write(src.join("a.txt"), "new").expect("write");
        fs::write(dst.join("a.txt"), "old").expect("write");
        fs::write(dst.join("stale.txt"), "keep").expect("write");

        copy_tree(&src, &dst, &exclude()).expect("copy");

        assert_eq!(fs::read_to_string(dst.join("a.txt")).expect("read"), "new");
        assert!(dst.join("stale.txt").exists());
        assert!(dst.join("node_modules").exists());
    }

    #[test]
    fn missing_source_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = copy_tree(&temp.path().join("nope"), &temp.path().join("dst"), &exclude())
            .expect_err("missing");
        assert!(err.to_string().contains("missing directory"));
    }
}
