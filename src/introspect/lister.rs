//! Tool listing via the external introspection command.
//!
//! One introspection run launches the server for a single package version
//! and asks the introspector for its tool list as JSON. Timeout expiry,
//! non-zero exit, and unparseable output all fold into [`Introspection::Failed`];
//! the distinction is logged but not surfaced further up. No retries.

use std::time::Duration;

use crate::cli::PackageType;
use crate::introspect::ToolListing;
use crate::process::{self, Invocation, ProcessOutcome};

/// Coordinate of one package version to introspect.
#[derive(Debug, Clone)]
pub struct PackageRef {
    /// Ecosystem the package is published on.
    pub package_type: PackageType,
    /// Registry package name.
    pub name: String,
    /// Version tag.
    pub version: String,
}

impl PackageRef {
    /// Create a coordinate.
    pub fn new(package_type: PackageType, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            package_type,
            name: name.into(),
            version: version.into(),
        }
    }

    /// Arguments that launch this exact version of the server.
    pub fn launch_args(&self) -> Vec<String> {
        match self.package_type {
            PackageType::Node => vec![
                "npx".into(),
                "-y".into(),
                format!("{}@{}", self.name, self.version),
            ],
            PackageType::Python => vec![
                "uvx".into(),
                format!("{}=={}", self.name, self.version),
            ],
        }
    }

    /// `name@version` form for messages.
    pub fn coordinate(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

/// Result of one introspection run.
///
/// A failed run carries no tool data; an empty listing is a listing, not
/// a failure.
#[derive(Debug)]
pub enum Introspection {
    /// The introspector produced a parseable listing.
    Listed(ToolListing),

    /// The run failed; `reason` is for logs and never for the report body.
    Failed { reason: String },
}

impl Introspection {
    /// Whether a listing was produced.
    pub fn is_listed(&self) -> bool {
        matches!(self, Self::Listed(_))
    }
}

/// List the tools one package version exposes.
///
/// `introspector` is the configured command line (program plus flags);
/// the full invocation appends `tools --format json` and the launch prefix
/// for the package.
pub fn list_tools(introspector: &str, package: &PackageRef, timeout: Duration) -> Introspection {
    let Some(base) = Invocation::from_command_line(introspector) else {
        return Introspection::Failed {
            reason: "introspector command is empty".into(),
        };
    };

    let invocation = base
        .args(["tools", "--format", "json"])
        .args(package.launch_args());

    tracing::debug!("introspecting {}: {}", package.coordinate(), invocation.display());

    match process::run(&invocation, timeout) {
        Ok(ProcessOutcome::Completed(result)) if result.success => {
            match ToolListing::parse(&result.stdout) {
                Ok(listing) => {
                    tracing::info!(
                        "{} exposes {} tools",
                        package.coordinate(),
                        listing.tools.len()
                    );
                    Introspection::Listed(listing)
                }
                Err(e) => Introspection::Failed {
                    reason: format!("unparseable introspection output: {}", e),
                },
            }
        }
        Ok(ProcessOutcome::Completed(result)) => Introspection::Failed {
            reason: format!(
                "introspector exited with code {:?}: {}",
                result.exit_code,
                first_line(&result.stderr)
            ),
        },
        Ok(ProcessOutcome::TimedOut) => Introspection::Failed {
            reason: format!("timed out after {}s", timeout.as_secs()),
        },
        Err(e) => Introspection::Failed {
            reason: e.to_string(),
        },
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim()
}
