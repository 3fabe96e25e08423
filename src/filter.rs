//! Rule-based filtering: rules, AND/OR groups, and saved filter sets.
//!
//! Filtering narrows the visible row set with plain data, not closures: a
//! [`FilterRule`] is one predicate over one field, a [`FilterGroup`]
//! combines rules with AND or OR, and the full filter state is a list of
//! groups where every group holding at least one rule must independently
//! match ("AND of groups"). A [`SavedFilter`] is a named snapshot of a
//! group list the host can persist and restore.
//!
//! # Examples
//!
//! ```rust
//! use datagrid_widgets::filter::{FilterGroup, FilterOperator, FilterRule, Logic};
//! use datagrid_widgets::row::Row;
//!
//! let group = FilterGroup {
//!     logic: Logic::And,
//!     rules: vec![FilterRule::new("status", FilterOperator::Equals, "complete")],
//! };
//! let row = Row::new().with("status", "complete");
//! assert!(group.matches(&row));
//! ```

use crate::row::Row;
use crate::value::Value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Comparison applied by a single filter rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    /// Case-insensitive substring test.
    Contains,
    /// Case-sensitive string equality after coercion.
    Equals,
    /// Numeric greater-than; false when either side is non-numeric.
    GreaterThan,
    /// Numeric less-than; false when either side is non-numeric.
    LessThan,
}

impl FilterOperator {
    /// Short display form for operator pickers.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Contains => "contains",
            FilterOperator::Equals => "=",
            FilterOperator::GreaterThan => ">",
            FilterOperator::LessThan => "<",
        }
    }

    /// Iterates over all operators in picker order.
    pub fn iterator() -> impl Iterator<Item = FilterOperator> {
        [
            FilterOperator::Contains,
            FilterOperator::Equals,
            FilterOperator::GreaterThan,
            FilterOperator::LessThan,
        ]
        .iter()
        .copied()
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the rules inside one group combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Logic {
    /// Every rule must match.
    And,
    /// At least one rule must match.
    Or,
}

impl Logic {
    /// Display form ("AND" / "OR").
    pub fn as_str(&self) -> &'static str {
        match self {
            Logic::And => "AND",
            Logic::Or => "OR",
        }
    }

    /// Iterates over both logic modes.
    pub fn iterator() -> impl Iterator<Item = Logic> {
        [Logic::And, Logic::Or].iter().copied()
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single predicate over one field.
///
/// Rule values are always strings; numeric operators coerce both sides
/// at evaluation time. An empty value still participates: `contains ""`
/// matches every row, which is the intended pass-through behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRule {
    /// Column key the rule targets.
    pub field: String,
    /// Comparison to apply.
    pub operator: FilterOperator,
    /// Right-hand side of the comparison, as typed by the user.
    pub value: String,
}

impl FilterRule {
    /// Creates a rule.
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Evaluates the rule against a row.
    ///
    /// Missing fields coerce to the empty string; a malformed numeric
    /// comparison evaluates to `false` rather than erroring.
    pub fn matches(&self, row: &Row) -> bool {
        let cell = row.get(&self.field).cloned().unwrap_or(Value::Null);
        match self.operator {
            FilterOperator::Contains => cell
                .coerce_string()
                .to_lowercase()
                .contains(&self.value.to_lowercase()),
            FilterOperator::Equals => cell.coerce_string() == self.value,
            FilterOperator::GreaterThan => match (cell.as_number(), parse_number(&self.value)) {
                (Some(a), Some(b)) => a > b,
                _ => false,
            },
            FilterOperator::LessThan => match (cell.as_number(), parse_number(&self.value)) {
                (Some(a), Some(b)) => a < b,
                _ => false,
            },
        }
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// An AND/OR-combined set of rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterGroup {
    /// The rules in this group.
    pub rules: Vec<FilterRule>,
    /// How the rules combine.
    pub logic: Logic,
}

impl FilterGroup {
    /// Creates an empty group with the given logic.
    pub fn new(logic: Logic) -> Self {
        Self {
            rules: Vec::new(),
            logic,
        }
    }

    /// Builder-style rule append.
    pub fn with_rule(mut self, rule: FilterRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Evaluates the group against a row.
    ///
    /// A group with no rules is vacuously true.
    pub fn matches(&self, row: &Row) -> bool {
        if self.rules.is_empty() {
            return true;
        }
        match self.logic {
            Logic::And => self.rules.iter().all(|r| r.matches(row)),
            Logic::Or => self.rules.iter().any(|r| r.matches(row)),
        }
    }
}

impl Default for FilterGroup {
    fn default() -> Self {
        Self::new(Logic::And)
    }
}

/// Returns `true` when every group holding at least one rule matches.
///
/// Groups with zero rules are ignored; an empty group list matches
/// everything.
pub fn matches_all_groups(row: &Row, groups: &[FilterGroup]) -> bool {
    groups
        .iter()
        .filter(|g| !g.rules.is_empty())
        .all(|g| g.matches(row))
}

/// Filters `rows`, preserving relative order.
pub fn apply_filters<'a>(rows: &'a [Row], groups: &[FilterGroup]) -> Vec<&'a Row> {
    rows.iter()
        .filter(|row| matches_all_groups(row, groups))
        .collect()
}

/// A named, persisted snapshot of a filter-group set.
///
/// Serializes with the camelCase field names of the persisted layout:
/// `{id, name, filterGroups, createdAt}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFilter {
    /// Store-assigned identity.
    pub id: u64,
    /// Unique, user-chosen name.
    pub name: String,
    /// The snapshotted group set.
    pub filter_groups: Vec<FilterGroup>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Errors from [`SavedFilterStore`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SavedFilterError {
    /// A saved filter with the same name already exists.
    #[error("a saved filter named {0:?} already exists")]
    DuplicateName(String),
    /// No saved filter carries the given id.
    #[error("no saved filter with id {0}")]
    NotFound(u64),
}

/// In-memory collection of saved filters.
///
/// Filters are created on an explicit save and removed on an explicit
/// delete; nothing expires on its own. Persistence of the collection is
/// the host's job — the store (de)serializes cleanly for that purpose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedFilterStore {
    filters: Vec<SavedFilter>,
    next_id: u64,
}

impl SavedFilterStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a named snapshot of `groups`.
    ///
    /// Names are unique; saving under an existing name is rejected and
    /// the store is left untouched.
    pub fn save(
        &mut self,
        name: impl Into<String>,
        groups: Vec<FilterGroup>,
    ) -> Result<&SavedFilter, SavedFilterError> {
        let name = name.into();
        if self.filters.iter().any(|f| f.name == name) {
            return Err(SavedFilterError::DuplicateName(name));
        }
        self.next_id += 1;
        debug!(name = %name, id = self.next_id, "saved filter created");
        self.filters.push(SavedFilter {
            id: self.next_id,
            name,
            filter_groups: groups,
            created_at: Utc::now(),
        });
        Ok(self.filters.last().unwrap())
    }

    /// Deletes the filter with the given id.
    pub fn delete(&mut self, id: u64) -> Result<SavedFilter, SavedFilterError> {
        let pos = self
            .filters
            .iter()
            .position(|f| f.id == id)
            .ok_or(SavedFilterError::NotFound(id))?;
        debug!(id, "saved filter deleted");
        Ok(self.filters.remove(pos))
    }

    /// Looks a filter up by name.
    pub fn get_by_name(&self, name: &str) -> Option<&SavedFilter> {
        self.filters.iter().find(|f| f.name == name)
    }

    /// All saved filters, oldest first.
    pub fn all(&self) -> &[SavedFilter] {
        &self.filters
    }

    /// Number of saved filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns `true` when nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
