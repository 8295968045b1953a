//! Name-level tool-set diffing.
//!
//! Pure comparison of two listings by tool name. Names are deduplicated
//! and order-normalized before the set operations, so the diff does not
//! depend on the order a server reports its tools in. Entries without a
//! name are excluded, not flagged.

use crate::introspect::ToolListing;

/// Difference between two tool listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDiff {
    /// Names present only in the new listing, sorted.
    pub added: Vec<String>,

    /// Names present only in the old listing, sorted.
    pub removed: Vec<String>,

    /// Distinct named tools in the old listing.
    pub old_count: usize,

    /// Distinct named tools in the new listing.
    pub new_count: usize,
}

impl ToolDiff {
    /// Whether the two listings expose the same tool names.
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Signed change in tool count.
    pub fn net_change(&self) -> i64 {
        self.new_count as i64 - self.old_count as i64
    }
}

/// Compute the name-level diff between two listings.
pub fn diff_listings(old: &ToolListing, new: &ToolListing) -> ToolDiff {
    let old_names = old.names();
    let new_names = new.names();

    let added = new_names
        .difference(&old_names)
        .map(|n| n.to_string())
        .collect();
    let removed = old_names
        .difference(&new_names)
        .map(|n| n.to_string())
        .collect();

    ToolDiff {
        added,
        removed,
        old_count: old_names.len(),
        new_count: new_names.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(names: &[&str]) -> ToolListing {
        let tools = names
            .iter()
            .map(|n| format!(r#"{{"name": "{}"}}"#, n))
            .collect::<Vec<_>>()
            .join(",");
        ToolListing::parse(&format!(r#"{{"tools": [{}]}}"#, tools)).unwrap()
    }

    #[test]
    fn classifies_added_and_removed() {
        let diff = diff_listings(&listing(&["a", "b"]), &listing(&["b", "c"]));

        assert_eq!(diff.added, vec!["c"]);
        assert_eq!(diff.removed, vec!["a"]);
        assert_eq!(diff.old_count, 2);
        assert_eq!(diff.new_count, 2);
        assert_eq!(diff.net_change(), 0);
    }

    #[test]
    fn added_and_removed_are_disjoint() {
        let diff = diff_listings(&listing(&["a", "b", "c"]), &listing(&["b", "d", "e"]));
        for name in &diff.added {
            assert!(!diff.removed.contains(name));
        }
    }

    #[test]
    fn diff_is_order_independent() {
        let forward = diff_listings(&listing(&["a", "b", "c"]), &listing(&["c", "b", "d"]));
        let shuffled = diff_listings(&listing(&["c", "a", "b"]), &listing(&["d", "c", "b"]));
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn identical_listings_produce_empty_diff() {
        let l = listing(&["x", "y", "z", "w", "v"]);
        let diff = diff_listings(&l, &l);

        assert!(diff.is_unchanged());
        assert_eq!(diff.old_count, 5);
        assert_eq!(diff.new_count, 5);
    }

    #[test]
    fn duplicate_names_count_once() {
        let diff = diff_listings(&listing(&["a", "a", "b"]), &listing(&["b"]));
        assert_eq!(diff.old_count, 2);
        assert_eq!(diff.removed, vec!["a"]);
    }

    #[test]
    fn unnamed_tools_are_excluded() {
        let old = ToolListing::parse(r#"{"tools": [{"name": "a"}, {"description": "no name"}]}"#)
            .unwrap();
        let new = ToolListing::parse(r#"{"tools": [{"name": "a"}]}"#).unwrap();

        let diff = diff_listings(&old, &new);
        assert!(diff.is_unchanged());
        assert_eq!(diff.old_count, 1);
    }

    #[test]
    fn empty_listings_diff_cleanly() {
        let diff = diff_listings(&ToolListing::default(), &listing(&["a"]));
        assert_eq!(diff.added, vec!["a"]);
        assert_eq!(diff.old_count, 0);
        assert_eq!(diff.net_change(), 1);
    }

    #[test]
    fn results_are_sorted() {
        let diff = diff_listings(&listing(&[]), &listing(&["zebra", "apple", "mango"]));
        assert_eq!(diff.added, vec!["apple", "mango", "zebra"]);
    }
}
