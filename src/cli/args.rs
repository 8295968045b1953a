//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

use clap::{Parser, ValueEnum};
use regex::Regex;

/// Accepted shape for version arguments.
///
/// Loose on purpose: registries allow semver, date tags, and pre-release
/// suffixes. The check only rejects values that could not be a version at
/// all (whitespace, shell metacharacters, leading punctuation).
static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._+-]*$").unwrap());

/// mcpdiff - Compare the MCP tool surface of a package across two versions.
#[derive(Debug, Parser)]
#[command(name = "mcpdiff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Package ecosystem the server is published on
    #[arg(value_enum)]
    pub package_type: PackageType,

    /// Package name (e.g. "@playwright/mcp" or "mcp-server-fetch")
    pub package: String,

    /// Currently released version tag
    #[arg(value_parser = parse_version)]
    pub old_version: String,

    /// Candidate version tag
    #[arg(value_parser = parse_version)]
    pub new_version: String,

    /// Catalog entry declaring the credentials the server needs
    pub catalog_entry: String,

    /// Directory containing catalog descriptor YAML files
    #[arg(long, env = "MCPDIFF_CATALOG_DIR", default_value = ".")]
    pub catalog_dir: PathBuf,

    /// Command used to list tools over stdio MCP
    #[arg(long, env = "MCPDIFF_INTROSPECTOR", default_value = "mcptools")]
    pub introspector: String,

    /// Structured analysis command; the name-level diff is used when unset
    #[arg(long, env = "MCPDIFF_ANALYZER")]
    pub analyzer: Option<String>,

    /// Wall-clock bound for each introspection run, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// Supported package ecosystems.
///
/// The ecosystem decides the invocation prefix used to launch the server
/// for introspection. Anything else is a configuration error that clap
/// rejects before the pipeline starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PackageType {
    /// npm package, launched via `npx -y name@version`
    Node,
    /// PyPI package, launched via `uvx name==version`
    Python,
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node => write!(f, "node"),
            Self::Python => write!(f, "python"),
        }
    }
}

/// Validate a version argument.
fn parse_version(value: &str) -> Result<String, String> {
    if VERSION_PATTERN.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(format!("'{}' is not a valid version tag", value))
    }
}
