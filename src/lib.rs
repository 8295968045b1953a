//! mcpdiff - Compare the MCP tool surface of a package across two versions.
//!
//! mcpdiff runs in a release-gating workflow: given a package and two
//! version tags, it checks that the environment carries the credentials
//! the package's catalog entry declares, lists the tools each version
//! exposes, and emits a Markdown change report: from a structured
//! analysis collaborator when one is configured, or from a deterministic
//! name-level diff otherwise.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`catalog`] - Catalog descriptor lookup and parsing
//! - [`gate`] - Environment-readiness gate
//! - [`process`] - Bounded external command execution
//! - [`introspect`] - Tool listing model and the bounded lister
//! - [`diff`] - Name-level tool-set diffing
//! - [`analysis`] - Structured analysis via an external command
//! - [`report`] - Report composition
//! - [`sink`] - Best-effort CI output channel
//! - [`pipeline`] - Pipeline controller
//! - [`error`] - Error types and result aliases
//! - [`ui`] - Terminal status output
//!
//! # Example
//!
//! ```
//! use mcpdiff::diff::diff_listings;
//! use mcpdiff::introspect::ToolListing;
//!
//! let old = ToolListing::parse(r#"{"tools": [{"name": "a"}, {"name": "b"}]}"#).unwrap();
//! let new = ToolListing::parse(r#"{"tools": [{"name": "b"}, {"name": "c"}]}"#).unwrap();
//! let diff = diff_listings(&old, &new);
//! assert_eq!(diff.added, vec!["c"]);
//! assert_eq!(diff.removed, vec!["a"]);
//! ```

pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod diff;
pub mod error;
pub mod gate;
pub mod introspect;
pub mod pipeline;
pub mod process;
pub mod report;
pub mod sink;
pub mod ui;

pub use error::{McpdiffError, Result};
