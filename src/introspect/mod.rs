//! Tool introspection: listing model and the bounded lister.

pub mod lister;
pub mod listing;

pub use lister::{list_tools, Introspection, PackageRef};
pub use listing::{Tool, ToolListing};
