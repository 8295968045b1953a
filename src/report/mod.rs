//! Final report composition.
//!
//! Every run ends in exactly one of four terminal outcomes, each with a
//! fixed Markdown template. A report is constructed once and never
//! mutated; a failed report never carries tool data.

pub mod builder;

use std::collections::{BTreeMap, BTreeSet};

pub use builder::ReportBuilder;

use crate::diff::ToolDiff;

/// Terminal state of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Required credentials are missing; validation was skipped.
    GatedSkip,
    /// One or both introspection runs failed.
    ExecFailure,
    /// The structured-analysis collaborator produced the report.
    Analyzed,
    /// The deterministic name-level diff produced the report.
    DiffFallback,
}

impl Outcome {
    /// Short identifier for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GatedSkip => "gated-skip",
            Self::ExecFailure => "exec-failure",
            Self::Analyzed => "analyzed",
            Self::DiffFallback => "diff-fallback",
        }
    }
}

/// Final report: Markdown body plus a success flag.
#[derive(Debug, Clone)]
pub struct Report {
    markdown: String,
    success: bool,
    outcome: Outcome,
}

impl Report {
    /// The rendered Markdown body.
    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    /// Whether a full comparison was produced.
    pub fn success(&self) -> bool {
        self.success
    }

    /// Which terminal state the run reached.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }
}

/// Compose the gated-skip report: credentials are missing, nothing ran.
pub fn gated_skip(
    package: &str,
    missing: &BTreeSet<String>,
    labels: &BTreeMap<String, String>,
) -> Report {
    let items: Vec<String> = missing
        .iter()
        .map(|key| match labels.get(key) {
            Some(label) => format!("`{}` ({})", key, label),
            None => format!("`{}`", key),
        })
        .collect();

    let markdown = ReportBuilder::new("⚠️ MCP Tool Validation Skipped")
        .paragraph(format!(
            "Required environment variables for `{}` are not set:",
            package
        ))
        .bullets("Missing Variables", &items)
        .paragraph(
            "Validation was skipped. Configure these repository secrets to enable \
             tool comparison for this package.",
        )
        .render();

    Report {
        markdown,
        success: false,
        outcome: Outcome::GatedSkip,
    }
}

/// Compose the execution-failure report.
///
/// Carries no tool counts or names, even when one side succeeded.
pub fn execution_failure(
    package: &str,
    old_version: &str,
    new_version: &str,
    timeout_secs: u64,
) -> Report {
    let causes = [
        "missing or invalid credentials for the server".to_string(),
        format!("introspection timed out after {}s", timeout_secs),
        "the requested version does not exist on the registry".to_string(),
    ];

    let markdown = ReportBuilder::new("❌ MCP Tool Validation Failed")
        .paragraph(format!(
            "Could not list tools for `{}` (`{}` and/or `{}`).",
            package, old_version, new_version
        ))
        .bullets("Possible Causes", &causes)
        .paragraph("Validation could not be completed; no comparison was performed.")
        .render();

    Report {
        markdown,
        success: false,
        outcome: Outcome::ExecFailure,
    }
}

/// Wrap the structured-analysis collaborator's Markdown verbatim.
pub fn analyzed(analysis: String) -> Report {
    Report {
        markdown: analysis,
        success: true,
        outcome: Outcome::Analyzed,
    }
}

/// Compose the deterministic fallback summary from a name-level diff.
pub fn diff_fallback(
    package: &str,
    old_version: &str,
    new_version: &str,
    diff: &ToolDiff,
) -> Report {
    let net = match diff.net_change() {
        0 => "0".to_string(),
        n => format!("{:+}", n),
    };

    let added: Vec<String> = diff.added.iter().map(|n| format!("`{}`", n)).collect();
    let removed: Vec<String> = diff.removed.iter().map(|n| format!("`{}`", n)).collect();

    let mut builder = ReportBuilder::new(format!(
        "🔧 MCP Tools Comparison: {} → {}",
        old_version, new_version
    ))
    .paragraph(format!(
        "`{}` exposes {} tools in `{}` and {} tools in `{}` (net change: {}).",
        package, diff.old_count, old_version, diff.new_count, new_version, net
    ));

    if diff.is_unchanged() {
        builder = builder.paragraph("No tool changes detected.");
    } else {
        builder = builder
            .bullets("✅ Added Tools", &added)
            .bullets("❌ Removed Tools", &removed);
    }

    let markdown = builder
        .paragraph(
            "_Structured analysis was unavailable; this summary lists name-level \
             changes only._",
        )
        .render();

    Report {
        markdown,
        success: true,
        outcome: Outcome::DiffFallback,
    }
}
