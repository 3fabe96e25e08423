//! Value comparison and stable row ordering.
//!
//! The grid sorts by at most one column at a time. [`compare_values`]
//! applies a fixed heuristic chain — null presence, date parse, numeric
//! parse, then case-insensitive text — so that date-shaped strings,
//! numeric strings, and plain text all order the way a reader expects
//! without per-column type configuration.

use crate::row::Row;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Smallest first.
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Largest first.
    #[serde(rename = "desc")]
    Descending,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    /// Applies the direction to an ascending ordering.
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

/// The single active sort: which column, and which way.
///
/// `key: None` means no sorting is active and rows keep their incoming
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortDirective {
    /// Active sort column, if any.
    pub key: Option<String>,
    /// Direction applied to that column.
    pub direction: Direction,
}

impl SortDirective {
    /// A directive with no active sort key.
    pub fn none() -> Self {
        Self::default()
    }

    /// A directive sorting by `key` in `direction`.
    pub fn by(key: impl Into<String>, direction: Direction) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    /// Header-click behavior: toggles direction when `key` is already
    /// active, otherwise activates `key` ascending.
    pub fn toggle(&mut self, key: &str) {
        if self.key.as_deref() == Some(key) {
            self.direction = self.direction.toggled();
        } else {
            self.key = Some(key.to_string());
            self.direction = Direction::Ascending;
        }
        debug!(key, direction = ?self.direction, "sort directive changed");
    }
}

/// Compares two optional cell values in ascending terms.
///
/// Policy, evaluated strictly in order:
///
/// 1. Presence: both missing/null are equal; a missing/null side sorts
///    first.
/// 2. Dates: when both sides parse as dates, compare timestamps.
/// 3. Numbers: when both sides are numeric, compare numerically.
/// 4. Fallback: case-insensitive text comparison.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    let (a, b) = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Less,
        (Some(_), None) => return Ordering::Greater,
        (Some(a), Some(b)) => (a, b),
    };

    if let (Some(ta), Some(tb)) = (a.as_timestamp(), b.as_timestamp()) {
        return ta.cmp(&tb);
    }
    if let (Some(na), Some(nb)) = (a.as_number(), b.as_number()) {
        return na.partial_cmp(&nb).unwrap_or(Ordering::Equal);
    }
    a.coerce_string()
        .to_lowercase()
        .cmp(&b.coerce_string().to_lowercase())
}

/// Sorts `rows` in place by `key`, stably.
///
/// Ties keep their original relative order (`slice::sort_by` is stable),
/// which is what makes repeated re-sorting round-trip cleanly.
pub fn sort_rows(rows: &mut [Row], key: &str, direction: Direction) {
    rows.sort_by(|a, b| direction.apply(compare_values(a.get(key), b.get(key))));
}

/// Applies a [`SortDirective`] to `rows`; a directive without a key
/// leaves the order untouched.
pub fn apply_sort(rows: &mut [Row], directive: &SortDirective) {
    if let Some(key) = &directive.key {
        sort_rows(rows, key, directive.direction);
    }
}
