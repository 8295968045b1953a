//! Pipeline controller.
//!
//! Sequences gate → list old → list new → analyze-or-diff → compose.
//! Every non-fatal condition is absorbed at the stage that detects it and
//! converted into one of the four terminal report shapes; `run` itself
//! cannot fail. No stage is ever retried.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::analysis::{self, AnalysisError, AnalysisInput};
use crate::cli::{Cli, PackageType};
use crate::diff;
use crate::gate::{self, EnvCheck};
use crate::introspect::{self, Introspection, PackageRef};
use crate::report::{self, Report};
use crate::ui::Status;

/// One configured comparison run.
#[derive(Debug)]
pub struct Pipeline {
    package_type: PackageType,
    package: String,
    old_version: String,
    new_version: String,
    catalog_entry: String,
    catalog_dir: PathBuf,
    introspector: String,
    analyzer: Option<String>,
    timeout: Duration,
}

impl Pipeline {
    /// Build a pipeline from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            package_type: cli.package_type,
            package: cli.package.clone(),
            old_version: cli.old_version.clone(),
            new_version: cli.new_version.clone(),
            catalog_entry: cli.catalog_entry.clone(),
            catalog_dir: cli.catalog_dir.clone(),
            introspector: cli.introspector.clone(),
            analyzer: cli.analyzer.clone(),
            timeout: Duration::from_secs(cli.timeout),
        }
    }

    /// Run the comparison to one of its four terminal outcomes.
    ///
    /// `env` is the calling environment, passed explicitly so the gate
    /// never reads global state.
    pub fn run(&self, env: &HashMap<String, String>, status: &Status) -> Report {
        status.step(&format!(
            "Checking environment requirements for '{}'",
            self.catalog_entry
        ));

        match gate::check(&self.catalog_dir, &self.catalog_entry, env) {
            EnvCheck::Ready => {
                status.success("All required environment variables are set");
            }
            EnvCheck::MissingVars { missing, labels } => {
                status.warning(&format!(
                    "Missing required environment variables: {}",
                    missing.iter().cloned().collect::<Vec<_>>().join(", ")
                ));
                return report::gated_skip(&self.package, &missing, &labels);
            }
            EnvCheck::EntryMissing => {
                status.warning(&format!(
                    "No catalog entry for '{}'; proceeding without gating",
                    self.catalog_entry
                ));
            }
            EnvCheck::Unavailable { reason } => {
                tracing::warn!("environment check unavailable: {}", reason);
                status.warning("Environment check unavailable; proceeding without gating");
            }
        }

        // Both listings must complete before any comparison runs.
        let old_ref = PackageRef::new(self.package_type, &self.package, &self.old_version);
        let new_ref = PackageRef::new(self.package_type, &self.package, &self.new_version);

        let old_listing = self.list(&old_ref, status);
        let new_listing = self.list(&new_ref, status);

        let (old_listing, new_listing) = match (old_listing, new_listing) {
            (Introspection::Listed(old), Introspection::Listed(new)) => (old, new),
            _ => {
                status.error("Tool introspection failed; comparison aborted");
                return report::execution_failure(
                    &self.package,
                    &self.old_version,
                    &self.new_version,
                    self.timeout.as_secs(),
                );
            }
        };

        let input = AnalysisInput {
            package: &self.package,
            old_version: &self.old_version,
            new_version: &self.new_version,
            old: &old_listing,
            new: &new_listing,
        };

        match analysis::analyze(self.analyzer.as_deref(), &input) {
            Ok(text) => {
                status.success("Structured analysis complete");
                report::analyzed(text)
            }
            Err(AnalysisError::NotConfigured) => {
                tracing::debug!("no analyzer configured, using name-level diff");
                self.fallback(&old_listing, &new_listing, status)
            }
            Err(e) => {
                tracing::warn!("analysis failed: {}", e);
                status.warning("Structured analysis failed; falling back to name-level diff");
                self.fallback(&old_listing, &new_listing, status)
            }
        }
    }

    fn list(&self, package: &PackageRef, status: &Status) -> Introspection {
        status.step(&format!("Listing tools for {}", package.coordinate()));
        let outcome = introspect::list_tools(&self.introspector, package, self.timeout);
        match &outcome {
            Introspection::Listed(listing) => {
                status.success(&format!(
                    "{}: {} tools",
                    package.coordinate(),
                    listing.tools.len()
                ));
            }
            Introspection::Failed { reason } => {
                tracing::warn!("introspection of {} failed: {}", package.coordinate(), reason);
            }
        }
        outcome
    }

    fn fallback(
        &self,
        old: &introspect::ToolListing,
        new: &introspect::ToolListing,
        status: &Status,
    ) -> Report {
        let diff = diff::diff_listings(old, new);
        status.success(&format!(
            "Name-level diff: {} added, {} removed",
            diff.added.len(),
            diff.removed.len()
        ));
        report::diff_fallback(&self.package, &self.old_version, &self.new_version, &diff)
    }
}
