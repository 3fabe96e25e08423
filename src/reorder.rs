//! Drag-to-reorder gesture state machine for column headers.
//!
//! The machine is headless: it knows nothing about terminals or events,
//! only about a drag position and the geometry of the header the pointer
//! is over. The embedding widget feeds it hover updates and applies the
//! swaps it emits to the [`crate::layout::ColumnLayout`].
//!
//! ## Swap policy
//!
//! A hover over another header swaps source and target the moment the
//! pointer crosses the hovered header's horizontal midpoint *in the drag
//! direction*: dragging rightward must cross past the midpoint, dragging
//! leftward must cross before it. The asymmetry keeps the order from
//! flickering while the pointer sits near a boundary.
//!
//! Every swap is committed to the live order immediately — this is a
//! live-reorder-while-dragging gesture, not drop-to-commit, and there is
//! deliberately no rollback path: releasing the drag (anywhere) simply
//! ends the gesture with the last swapped order in place.

use tracing::debug;

/// A single position exchange emitted by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swap {
    /// Position the dragged column moves from.
    pub from: usize,
    /// Position the dragged column moves to.
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DragState {
    Idle,
    Dragging { key: String, index: usize },
}

/// Pointer-driven column reordering gesture.
///
/// # Examples
///
/// ```rust
/// use datagrid_widgets::reorder::{DragReorder, Swap};
///
/// let mut drag = DragReorder::new();
/// drag.begin("a", 0);
/// // Hovering header at position 1 whose midpoint is x=22, pointer at x=30:
/// // rightward drag past the midpoint, so the columns swap.
/// assert_eq!(drag.hover(1, 22, 30), Some(Swap { from: 0, to: 1 }));
/// assert_eq!(drag.dragged_index(), Some(1));
/// drag.release();
/// assert!(!drag.is_dragging());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragReorder {
    state: DragState,
}

impl Default for DragState {
    fn default() -> Self {
        DragState::Idle
    }
}

impl DragReorder {
    /// Creates an idle gesture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a drag on the column `key` currently at `index`.
    ///
    /// Starting while a drag is active restarts the gesture on the new
    /// source column.
    pub fn begin(&mut self, key: impl Into<String>, index: usize) {
        let key = key.into();
        debug!(key = %key, index, "column drag started");
        self.state = DragState::Dragging { key, index };
    }

    /// Feeds a hover over the header at `target_index`.
    ///
    /// `target_mid_x` is the horizontal midpoint of the hovered header
    /// and `pointer_x` the current pointer position, in any consistent
    /// unit. Returns the swap to apply when the midpoint-crossing rule
    /// is satisfied, updating the tracked index; otherwise `None`.
    pub fn hover(&mut self, target_index: usize, target_mid_x: i32, pointer_x: i32) -> Option<Swap> {
        let DragState::Dragging { index, .. } = &mut self.state else {
            return None;
        };
        if target_index == *index {
            return None;
        }
        let crossed = if target_index > *index {
            pointer_x > target_mid_x
        } else {
            pointer_x < target_mid_x
        };
        if !crossed {
            return None;
        }
        let swap = Swap {
            from: *index,
            to: target_index,
        };
        *index = target_index;
        debug!(from = swap.from, to = swap.to, "column drag swap");
        Some(swap)
    }

    /// Ends the gesture, returning the dragged key.
    ///
    /// The last live swap already committed; release performs no further
    /// transformation.
    pub fn release(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging { key, .. } => {
                debug!(key = %key, "column drag released");
                Some(key)
            }
        }
    }

    /// Returns `true` while a drag is in flight.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Key of the column being dragged, if any.
    pub fn dragged_key(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { key, .. } => Some(key),
            DragState::Idle => None,
        }
    }

    /// Current tracked position of the dragged column, if any.
    pub fn dragged_index(&self) -> Option<usize> {
        match &self.state {
            DragState::Dragging { index, .. } => Some(*index),
            DragState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ColumnLayout;

    #[test]
    fn test_rightward_swap_requires_crossing_past_midpoint() {
        let mut drag = DragReorder::new();
        drag.begin("a", 0);
        // Short of the midpoint: no swap yet.
        assert_eq!(drag.hover(1, 22, 20), None);
        // Past it: swap fires and the tracked index follows.
        assert_eq!(drag.hover(1, 22, 23), Some(Swap { from: 0, to: 1 }));
        assert_eq!(drag.dragged_index(), Some(1));
    }

    #[test]
    fn test_leftward_swap_requires_crossing_before_midpoint() {
        let mut drag = DragReorder::new();
        drag.begin("c", 2);
        assert_eq!(drag.hover(1, 22, 25), None);
        assert_eq!(drag.hover(1, 22, 21), Some(Swap { from: 2, to: 1 }));
        assert_eq!(drag.dragged_index(), Some(1));
    }

    #[test]
    fn test_hover_over_own_position_is_inert() {
        let mut drag = DragReorder::new();
        drag.begin("a", 0);
        assert_eq!(drag.hover(0, 10, 100), None);
    }

    #[test]
    fn test_hover_while_idle_is_inert() {
        let mut drag = DragReorder::new();
        assert_eq!(drag.hover(1, 22, 30), None);
    }

    #[test]
    fn test_release_ends_gesture_and_keeps_last_order() {
        // Scenario: order [a, b, c], drag `a` right past `b`'s midpoint.
        let mut layout = ColumnLayout::new(["a", "b", "c"]);
        let mut drag = DragReorder::new();
        drag.begin("a", 0);
        if let Some(swap) = drag.hover(1, 22, 30) {
            layout.swap(swap.from, swap.to);
        }
        assert_eq!(layout.order(), ["b", "a", "c"]);
        assert_eq!(drag.release(), Some("a".to_string()));
        assert!(!drag.is_dragging());
        // Immediate-commit policy: release changed nothing further.
        assert_eq!(layout.order(), ["b", "a", "c"]);
    }

    #[test]
    fn test_multi_swap_drag_remains_permutation() {
        let mut layout = ColumnLayout::new(["a", "b", "c", "d"]);
        let mut drag = DragReorder::new();
        drag.begin("a", 0);
        for (target, mid, x) in [(1, 15, 20), (2, 25, 30), (3, 35, 40)] {
            if let Some(swap) = drag.hover(target, mid, x) {
                layout.swap(swap.from, swap.to);
            }
        }
        assert_eq!(layout.order(), ["b", "c", "d", "a"]);
        let mut sorted = layout.order().to_vec();
        sorted.sort();
        assert_eq!(sorted, ["a", "b", "c", "d"]);
    }
}
