//! Column layout: visual order, widths, and the frozen boundary.
//!
//! [`ColumnLayout`] is the grid-owned half of column state. The host owns
//! the column *definitions*; the layout owns their left-to-right order, a
//! per-column width in logical units, and an optional frozen (pinned)
//! boundary, from which it derives cumulative left offsets for the
//! pinned columns.
//!
//! Widths are logical units — the host's notion of pixels. The terminal
//! renderer divides them down to character cells; the layout itself never
//! cares about the unit.

use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Width assigned to a column that has never been resized.
pub const DEFAULT_COLUMN_WIDTH: u32 = 150;

/// Smallest width a resize may produce, unless reconfigured.
pub const DEFAULT_MIN_WIDTH: u32 = 80;

/// Errors from layout mutations that would break its invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// `set_order` was called with something other than a permutation of
    /// the known column keys.
    #[error("new order is not a permutation of the current column keys")]
    NotAPermutation,
}

/// Grid-owned column geometry.
///
/// Invariant: `order` is always a permutation of the known column key
/// set. Mutations that would break that are rejected outright; host
/// schema changes are absorbed through [`ColumnLayout::reconcile`].
///
/// # Examples
///
/// ```rust
/// use datagrid_widgets::layout::ColumnLayout;
///
/// let mut layout = ColumnLayout::new(["a", "b", "c"]);
/// layout.set_width("a", 40); // clamps up to the minimum (80)
/// assert_eq!(layout.width("a"), 80);
///
/// layout.set_frozen(Some("b"));
/// let offsets = layout.left_offsets();
/// assert_eq!(offsets["a"], 0);
/// assert_eq!(offsets["b"], 80);
/// assert!(!offsets.contains_key("c"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    order: Vec<String>,
    widths: HashMap<String, u32>,
    frozen_key: Option<String>,
    min_width: u32,
    default_width: u32,
}

impl ColumnLayout {
    /// Creates a layout over the given column keys, in the given order.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            order: keys.into_iter().map(Into::into).collect(),
            widths: HashMap::new(),
            frozen_key: None,
            min_width: DEFAULT_MIN_WIDTH,
            default_width: DEFAULT_COLUMN_WIDTH,
        }
    }

    /// Sets the resize floor.
    pub fn with_min_width(mut self, min_width: u32) -> Self {
        self.min_width = min_width;
        self
    }

    /// Sets the width used by columns that were never resized.
    pub fn with_default_width(mut self, default_width: u32) -> Self {
        self.default_width = default_width;
        self
    }

    /// Current visual order, leftmost first.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// The configured resize floor.
    pub fn min_width(&self) -> u32 {
        self.min_width
    }

    /// Replaces the order wholesale.
    ///
    /// The new order must be a permutation of the current key set;
    /// otherwise the call is rejected and the prior order is retained —
    /// no partial application.
    pub fn set_order(&mut self, new_order: Vec<String>) -> Result<(), LayoutError> {
        if !is_permutation(&self.order, &new_order) {
            return Err(LayoutError::NotAPermutation);
        }
        debug!(?new_order, "column order committed");
        self.order = new_order;
        Ok(())
    }

    /// Swaps the columns at two positions in the order.
    ///
    /// Out-of-range positions are ignored. Swapping two valid positions
    /// cannot break the permutation invariant, so this is infallible.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a < self.order.len() && b < self.order.len() && a != b {
            self.order.swap(a, b);
        }
    }

    /// Position of `key` in the current order.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.order.iter().position(|k| k == key)
    }

    /// Width of `key`, falling back to the default width.
    pub fn width(&self, key: &str) -> u32 {
        self.widths.get(key).copied().unwrap_or(self.default_width)
    }

    /// Stores a width for `key`, clamped to the resize floor.
    ///
    /// Keys outside the current order are ignored.
    pub fn set_width(&mut self, key: &str, width: u32) {
        if self.position(key).is_none() {
            return;
        }
        let clamped = width.max(self.min_width);
        debug!(key, width = clamped, "column width committed");
        self.widths.insert(key.to_string(), clamped);
    }

    /// The frozen boundary column, if any.
    pub fn frozen_key(&self) -> Option<&str> {
        self.frozen_key.as_deref()
    }

    /// Pins every column at or before `key` in the order to the left
    /// edge. `None` unfreezes. A key not present in the order is kept
    /// but degrades to "nothing frozen" rather than erroring.
    pub fn set_frozen(&mut self, key: Option<&str>) {
        self.frozen_key = key.map(str::to_string);
    }

    /// Returns `true` when `key` sits at or before the frozen boundary.
    pub fn is_frozen(&self, key: &str) -> bool {
        let Some(boundary) = self.frozen_boundary() else {
            return false;
        };
        self.position(key).is_some_and(|pos| pos <= boundary)
    }

    /// Cumulative left offsets for the frozen columns.
    ///
    /// Walks the order accumulating prior widths; only columns at or
    /// before the frozen boundary appear in the map — everything after
    /// it flows normally and is not offset. With no (or an unknown)
    /// frozen key the map is empty.
    pub fn left_offsets(&self) -> HashMap<String, u32> {
        let mut offsets = HashMap::new();
        let Some(boundary) = self.frozen_boundary() else {
            return offsets;
        };
        let mut left = 0u32;
        for key in self.order.iter().take(boundary + 1) {
            offsets.insert(key.clone(), left);
            left += self.width(key);
        }
        offsets
    }

    /// Reconciles the layout with a changed host column set.
    ///
    /// Surviving keys keep their relative order and widths; new keys are
    /// appended; removed keys are dropped (and their widths forgotten).
    pub fn reconcile<'a, I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let keys: Vec<&str> = keys.into_iter().collect();
        self.order.retain(|k| keys.contains(&k.as_str()));
        for key in &keys {
            if self.position(key).is_none() {
                self.order.push(key.to_string());
            }
        }
        self.widths.retain(|k, _| keys.contains(&k.as_str()));
    }

    fn frozen_boundary(&self) -> Option<usize> {
        self.frozen_key
            .as_deref()
            .and_then(|key| self.position(key))
    }
}

fn is_permutation(current: &[String], candidate: &[String]) -> bool {
    if current.len() != candidate.len() {
        return false;
    }
    let mut sorted_current: Vec<&String> = current.iter().collect();
    let mut sorted_candidate: Vec<&String> = candidate.iter().collect();
    sorted_current.sort();
    sorted_candidate.sort();
    sorted_current == sorted_candidate
}
