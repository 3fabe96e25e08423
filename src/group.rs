//! Multi-level grouping of rows into a recursive partition tree.
//!
//! Grouping is a plain data transformation, fully decoupled from
//! rendering: [`group_rows`] partitions a row sequence by a sequence of
//! group-by keys into a [`GroupTree`], and the renderer walks the tree
//! separately. Expand/collapse state lives in [`GroupExpansion`], keyed
//! by composite path strings so it survives re-grouping of sibling
//! branches.

use crate::row::Row;
use crate::sort::Direction;
use crate::value::Value;
use std::collections::{BTreeMap, HashSet};

/// Bucket label used when a row lacks the group-by field (or it is null).
pub const UNGROUPED: &str = "Ungrouped";

/// Separator between levels of a group path ("parent|child").
pub const GROUP_PATH_SEPARATOR: char = '|';

/// A recursive partition of items.
///
/// A `Leaf` holds items directly; a `Node` holds an ordered list of
/// `(group key, subtree)` pairs. One level of grouping produces a `Node`
/// of `Leaf`s, chained group keys nest further. The tree is generic so
/// callers can partition rows that carry extra bookkeeping (the grid
/// groups `(source index, row)` pairs).
#[derive(Debug, Clone, PartialEq)]
pub enum GroupTree<T = Row> {
    /// Items with no further partitioning.
    Leaf(Vec<T>),
    /// Ordered key → subtree partitions.
    Node(Vec<(String, GroupTree<T>)>),
}

impl<T> GroupTree<T> {
    /// Counts items by recursively summing leaf lengths.
    ///
    /// This is the count shown on group headers; it stays correct at any
    /// nesting depth, unlike counting immediate children.
    pub fn count(&self) -> usize {
        match self {
            GroupTree::Leaf(items) => items.len(),
            GroupTree::Node(children) => children.iter().map(|(_, t)| t.count()).sum(),
        }
    }

    /// Returns `true` when the tree holds no items at all.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns the leaf items when the tree is a plain leaf.
    pub fn as_leaf(&self) -> Option<&[T]> {
        match self {
            GroupTree::Leaf(items) => Some(items),
            GroupTree::Node(_) => None,
        }
    }
}

/// Partitions `items` by a sequence of group-by keys, extracting each
/// item's field values through `value_of`.
///
/// This is the engine behind [`group_rows`]; see it for the partitioning
/// rules.
pub fn group_with<T, F>(
    items: Vec<T>,
    keys: &[String],
    direction: Direction,
    value_of: &F,
) -> GroupTree<T>
where
    F: Fn(&T, &str) -> Option<Value>,
{
    let Some((key, rest)) = keys.split_first() else {
        return GroupTree::Leaf(items);
    };

    let mut buckets: BTreeMap<String, Vec<T>> = BTreeMap::new();
    for item in items {
        let label = match value_of(&item, key) {
            Some(v) if !v.is_null() => v.coerce_string(),
            _ => UNGROUPED.to_string(),
        };
        buckets.entry(label).or_default().push(item);
    }

    let mut children: Vec<(String, GroupTree<T>)> = buckets
        .into_iter()
        .map(|(label, bucket)| (label, group_with(bucket, rest, direction, value_of)))
        .collect();
    if direction == Direction::Descending {
        children.reverse();
    }
    GroupTree::Node(children)
}

/// Partitions `rows` by a sequence of group-by keys.
///
/// - An empty key sequence returns the rows unmodified as a `Leaf`.
/// - One key produces a flat partition; more keys nest recursively.
/// - Rows missing the key (or holding null) fall into the
///   [`UNGROUPED`] bucket rather than being dropped.
/// - Partitions are ordered lexicographically ascending by group key;
///   pass [`Direction::Descending`] to reverse. Rows inside a partition
///   keep their incoming relative order.
///
/// # Examples
///
/// ```rust
/// use datagrid_widgets::group::{group_rows, GroupTree};
/// use datagrid_widgets::row::Row;
/// use datagrid_widgets::sort::Direction;
///
/// let rows = vec![
///     Row::new().with("city", "A"),
///     Row::new().with("city", "B"),
///     Row::new().with("city", "A"),
/// ];
/// let tree = group_rows(rows, &["city".to_string()], Direction::Ascending);
/// let GroupTree::Node(children) = &tree else { panic!() };
/// assert_eq!(children[0].0, "A");
/// assert_eq!(children[0].1.count(), 2);
/// assert_eq!(tree.count(), 3);
/// ```
pub fn group_rows(rows: Vec<Row>, keys: &[String], direction: Direction) -> GroupTree {
    group_with(rows, keys, direction, &|row, key| row.get(key).cloned())
}

/// Joins a parent path and a child key into a composite path.
pub fn group_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        let mut path = String::with_capacity(parent.len() + child.len() + 1);
        path.push_str(parent);
        path.push(GROUP_PATH_SEPARATOR);
        path.push_str(child);
        path
    }
}

/// Expand/collapse state for group headers.
///
/// State is keyed by composite path (`"parent|child"`), independent of
/// any particular [`GroupTree`], so toggles survive re-grouping of
/// sibling branches. Unknown paths default to expanded; the set tracks
/// the collapsed ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupExpansion {
    collapsed: HashSet<String>,
}

impl GroupExpansion {
    /// Creates a fully-expanded state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the group at `path` is expanded.
    pub fn is_expanded(&self, path: &str) -> bool {
        !self.collapsed.contains(path)
    }

    /// Toggles the group at `path`, returning its new expanded state.
    pub fn toggle(&mut self, path: &str) -> bool {
        if self.collapsed.remove(path) {
            true
        } else {
            self.collapsed.insert(path.to_string());
            false
        }
    }

    /// Expands every group.
    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city_rows() -> Vec<Row> {
        vec![
            Row::new().with("id", 0).with("city", "A").with("kind", "x"),
            Row::new().with("id", 1).with("city", "B").with("kind", "x"),
            Row::new().with("id", 2).with("city", "A").with("kind", "y"),
        ]
    }

    #[test]
    fn test_empty_key_sequence_is_passthrough() {
        let rows = city_rows();
        let tree = group_rows(rows.clone(), &[], Direction::Ascending);
        assert_eq!(tree.as_leaf(), Some(rows.as_slice()));
    }

    #[test]
    fn test_single_level_partition() {
        let tree = group_rows(city_rows(), &["city".into()], Direction::Ascending);
        let GroupTree::Node(children) = &tree else {
            panic!("expected a node");
        };
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].0, "A");
        assert_eq!(children[1].0, "B");
        // Rows inside a partition keep incoming order.
        let a_rows = children[0].1.as_leaf().unwrap();
        assert_eq!(a_rows[0].value_string("id"), "0");
        assert_eq!(a_rows[1].value_string("id"), "2");
    }

    #[test]
    fn test_descending_key_order() {
        let tree = group_rows(city_rows(), &["city".into()], Direction::Descending);
        let GroupTree::Node(children) = &tree else {
            panic!("expected a node");
        };
        assert_eq!(children[0].0, "B");
        assert_eq!(children[1].0, "A");
    }

    #[test]
    fn test_nested_grouping_and_recursive_count() {
        let tree = group_rows(
            city_rows(),
            &["city".into(), "kind".into()],
            Direction::Ascending,
        );
        assert_eq!(tree.count(), 3);
        let GroupTree::Node(cities) = &tree else {
            panic!("expected a node");
        };
        let GroupTree::Node(kinds) = &cities[0].1 else {
            panic!("expected nested node");
        };
        assert_eq!(kinds.len(), 2); // city A splits into kinds x and y
        assert_eq!(cities[0].1.count(), 2);
    }

    #[test]
    fn test_missing_and_null_fall_into_ungrouped() {
        let rows = vec![
            Row::new().with("id", 0).with("city", "A"),
            Row::new().with("id", 1), // no city field
            Row::new().with("id", 2).with("city", Value::Null),
        ];
        let tree = group_rows(rows, &["city".into()], Direction::Ascending);
        let GroupTree::Node(children) = &tree else {
            panic!("expected a node");
        };
        let ungrouped = children
            .iter()
            .find(|(label, _)| label == UNGROUPED)
            .expect("Ungrouped bucket present");
        assert_eq!(ungrouped.1.count(), 2);
        assert_eq!(tree.count(), 3); // nothing dropped
    }

    #[test]
    fn test_grouping_completeness() {
        let rows: Vec<Row> = (0..20)
            .map(|i| Row::new().with("id", i).with("bucket", i % 3))
            .collect();
        let tree = group_rows(rows.clone(), &["bucket".into()], Direction::Ascending);
        assert_eq!(tree.count(), rows.len());
    }

    #[test]
    fn test_group_path_composition() {
        assert_eq!(group_path("", "A"), "A");
        assert_eq!(group_path("A", "x"), "A|x");
    }

    #[test]
    fn test_expansion_survives_regrouping() {
        let mut expansion = GroupExpansion::new();
        assert!(expansion.is_expanded("A"));
        assert!(!expansion.toggle("A"));
        assert!(!expansion.is_expanded("A"));

        // Re-grouping produces a new tree, but the path-keyed state is
        // untouched: "A" stays collapsed, new siblings default expanded.
        assert!(!expansion.is_expanded("A"));
        assert!(expansion.is_expanded("B"));

        assert!(expansion.toggle("A"));
        assert!(expansion.is_expanded("A"));
    }
}
