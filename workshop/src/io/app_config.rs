//! Reads the live-reload port an app declares in its framework config.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow};
use regex::Regex;

static DEV_SERVER_PORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bdevServerPort["']?\s*[:=]\s*(\d+)"#).unwrap());

/// Extract `devServerPort` from a config file's source text.
pub fn parse_dev_server_port(source: &str) -> Option<u16> {
    DEV_SERVER_PORT_RE
        .captures_iter(source)
        .find_map(|caps| caps[1].parse().ok())
}

/// Read `devServerPort` from `path`.
///
/// A missing file or a file without the export is an error; the dev server
/// cannot start without a distinct live-reload port.
pub fn read_dev_server_port(path: &Path) -> Result<u16> {
    let source =
        fs::read_to_string(path).with_context(|| format!("read app config {}", path.display()))?;
    parse_dev_server_port(&source)
        .ok_or_else(|| anyhow!("{} does not export devServerPort", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_module_exports_object() {
        let source = r#"
/** @type {import('@remix-run/dev').AppConfig} */
module.exports = {
  ignoredRouteFiles: ["**/.*"],
  devServerPort: 8002,
};
"#;
        assert_eq!(parse_dev_server_port(source), Some(8002));
    }

    #[test]
    fn parses_quoted_key() {
        assert_eq!(
            parse_dev_server_port(r#"{ "devServerPort": 8103 }"#),
            Some(8103)
        );
    }

    #[test]
    fn missing_export_is_none() {
        assert_eq!(parse_dev_server_port("module.exports = {};"), None);
        assert_eq!(parse_dev_server_port("devServerPort: 999999"), None);
    }

    #[test]
    fn read_reports_missing_file_and_missing_export() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("remix.config.js");
        let err = read_dev_server_port(&path).expect_err("missing file");
        assert!(err.to_string().contains("read app config"));

        fs::write(&path, "module.exports = {};\n").expect("write");
        let err = read_dev_server_port(&path).expect_err("missing export");
        assert!(err.to_string().contains("does not export devServerPort"));

        fs::write(&path, "module.exports = { devServerPort: 8001 };\n").expect("write");
        assert_eq!(read_dev_server_port(&path).expect("port"), 8001);
    }
}
