//! Best-effort CI output channel.
//!
//! When the environment provides an output file path (GitHub Actions sets
//! `GITHUB_OUTPUT`), the report body and success flag are appended to it
//! in the platform's multi-line-safe encoding. Failures here are logged
//! and never affect the pipeline result.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::report::Report;

/// Environment variable naming the output file.
pub const OUTPUT_ENV_VAR: &str = "GITHUB_OUTPUT";

/// Emit the report to the configured output channel, if any.
pub fn emit(report: &Report) {
    let Ok(path) = std::env::var(OUTPUT_ENV_VAR) else {
        tracing::debug!("no {} configured, skipping output sink", OUTPUT_ENV_VAR);
        return;
    };

    if let Err(e) = append_outputs(Path::new(&path), report) {
        tracing::warn!("could not write {}: {}", OUTPUT_ENV_VAR, e);
    }
}

/// Append `report` and `success` entries to an output file.
pub fn append_outputs(path: &Path, report: &Report) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(encode_multiline("report", report.markdown()).as_bytes())?;
    file.write_all(format!("success={}\n", report.success()).as_bytes())?;
    Ok(())
}

/// Heredoc encoding for multi-line values.
///
/// The delimiter must not occur inside the value; it is extended with
/// underscores until it doesn't.
fn encode_multiline(key: &str, value: &str) -> String {
    let mut delimiter = String::from("MCPDIFF_EOF");
    while value.contains(&delimiter) {
        delimiter.push('_');
    }
    format!("{}<<{}\n{}\n{}\n", key, delimiter, value, delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report;
    use std::collections::{BTreeMap, BTreeSet};
    use std::fs;
    use tempfile::TempDir;

    fn sample_report() -> Report {
        report::gated_skip(
            "pkg",
            &BTreeSet::from(["API_TOKEN".to_string()]),
            &BTreeMap::new(),
        )
    }

    #[test]
    fn appends_report_and_success_flag() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("output");

        append_outputs(&path, &sample_report()).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(content.starts_with("report<<MCPDIFF_EOF\n"));
        assert!(content.contains("`API_TOKEN`"));
        assert!(content.contains("\nMCPDIFF_EOF\n"));
        assert!(content.ends_with("success=false\n"));
    }

    #[test]
    fn appends_without_truncating_existing_entries() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("output");
        fs::write(&path, "existing=1\n").unwrap();

        append_outputs(&path, &sample_report()).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(content.starts_with("existing=1\n"));
        assert!(content.contains("report<<"));
    }

    #[test]
    fn delimiter_is_extended_on_collision() {
        let encoded = encode_multiline("report", "body with MCPDIFF_EOF inside");
        assert!(encoded.starts_with("report<<MCPDIFF_EOF_\n"));
        assert!(encoded.ends_with("\nMCPDIFF_EOF_\n"));
    }

    #[test]
    fn encodes_key_value_heredoc_shape() {
        let encoded = encode_multiline("report", "line one\nline two");
        assert_eq!(
            encoded,
            "report<<MCPDIFF_EOF\nline one\nline two\nMCPDIFF_EOF\n"
        );
    }
}
