//! Structured analysis of two tool listings via an external command.
//!
//! The analyzer is an opaque collaborator (typically an LLM-backed script):
//! it receives package metadata as arguments and a JSON payload on stdin,
//! and prints a Markdown analysis. Exit code 0 with non-empty output is
//! success; everything else is an [`AnalysisError`] the pipeline converts
//! into the fallback diff, never into a pipeline failure.

use std::time::Duration;

use serde_json::json;
use thiserror::Error;

use crate::introspect::ToolListing;
use crate::process::{self, Invocation, ProcessOutcome};

/// Wall-clock bound for one analysis run. More generous than introspection
/// since the collaborator usually calls out to a remote model.
const ANALYSIS_TIMEOUT: Duration = Duration::from_secs(120);

/// Listings plus metadata handed to the analyzer.
#[derive(Debug)]
pub struct AnalysisInput<'a> {
    pub package: &'a str,
    pub old_version: &'a str,
    pub new_version: &'a str,
    pub old: &'a ToolListing,
    pub new: &'a ToolListing,
}

/// Reasons an analysis run produced no usable report.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No analyzer command is configured.
    #[error("no analyzer configured")]
    NotConfigured,

    /// The configured command line is blank or could not be started.
    #[error("analyzer could not be invoked: {0}")]
    Invocation(String),

    /// The analyzer exited with a non-zero status.
    #[error("analyzer exited with code {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },

    /// The analyzer exceeded its deadline.
    #[error("analyzer timed out after {0}s")]
    TimedOut(u64),

    /// The analyzer exited cleanly but printed nothing.
    #[error("analyzer produced no output")]
    EmptyOutput,
}

/// Run the configured analyzer over both listings.
pub fn analyze(
    analyzer: Option<&str>,
    input: &AnalysisInput<'_>,
) -> Result<String, AnalysisError> {
    analyze_with_timeout(analyzer, input, ANALYSIS_TIMEOUT)
}

fn analyze_with_timeout(
    analyzer: Option<&str>,
    input: &AnalysisInput<'_>,
    timeout: Duration,
) -> Result<String, AnalysisError> {
    let analyzer = analyzer.ok_or(AnalysisError::NotConfigured)?;
    let base = Invocation::from_command_line(analyzer)
        .ok_or_else(|| AnalysisError::Invocation("analyzer command is empty".into()))?;

    let payload = json!({
        "package": input.package,
        "old_version": input.old_version,
        "new_version": input.new_version,
        "old_tools": input.old.tools,
        "new_tools": input.new.tools,
    });
    let payload = serde_json::to_string(&payload)
        .map_err(|e| AnalysisError::Invocation(e.to_string()))?;

    let invocation = base
        .args([input.package, input.old_version, input.new_version])
        .stdin(payload);

    tracing::debug!("running analyzer: {}", invocation.display());

    match process::run(&invocation, timeout) {
        Ok(ProcessOutcome::Completed(result)) if result.success => {
            let analysis = result.stdout.trim();
            if analysis.is_empty() {
                Err(AnalysisError::EmptyOutput)
            } else {
                Ok(analysis.to_string())
            }
        }
        Ok(ProcessOutcome::Completed(result)) => Err(AnalysisError::Failed {
            code: result.exit_code,
            stderr: result.stderr.lines().next().unwrap_or("").trim().to_string(),
        }),
        Ok(ProcessOutcome::TimedOut) => Err(AnalysisError::TimedOut(timeout.as_secs())),
        Err(e) => Err(AnalysisError::Invocation(e.to_string())),
    }
}
