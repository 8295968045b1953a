//! Wire model for tool listings.
//!
//! The introspection command prints `{"tools": [...]}` JSON. Parsing is
//! deliberately lenient: unknown fields are ignored and missing fields
//! default, so a server with sparse metadata still produces a listing.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One tool exposed by a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name; identity within a listing. Empty when the server omits it.
    #[serde(default)]
    pub name: String,

    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Input schema, kept opaque.
    #[serde(
        default,
        rename = "inputSchema",
        skip_serializing_if = "Option::is_none"
    )]
    pub input_schema: Option<serde_json::Value>,
}

/// Ordered listing of the tools one package version exposes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolListing {
    /// Tools as reported, in server order.
    #[serde(default)]
    pub tools: Vec<Tool>,
}

impl ToolListing {
    /// Parse introspection output.
    pub fn parse(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Deduplicated tool names, excluding entries without a name.
    pub fn names(&self) -> BTreeSet<&str> {
        self.tools
            .iter()
            .filter(|t| !t.name.is_empty())
            .map(|t| t.name.as_str())
            .collect()
    }
}
