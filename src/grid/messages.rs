//! Message vocabulary of the grid: inbound gestures and outbound events.
//!
//! The grid stays headless by speaking typed messages on both sides.
//! The host translates whatever pointer machinery it has into the
//! inbound structs below and feeds them through
//! [`Model::update`](super::Model); the grid answers by returning
//! commands that deliver the outbound structs back through the
//! bubbletea-rs runtime, where the host `downcast_ref`s them like any
//! other message.
//!
//! Horizontal coordinates (`x` fields) are in the same logical units as
//! column widths (see [`crate::layout`]); any consistent unit works as
//! long as gesture coordinates and widths agree.

use crate::edit::EditCommit;
use crate::row::Row;
use crate::sort::Direction;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::time::Duration;

// ---------------------------------------------------------------------
// Inbound: pointer gestures, host → grid
// ---------------------------------------------------------------------

/// Single click on a body row. `row_index` addresses the host's row set.
///
/// Selection is debounced: the grid waits ~250 ms for a potential
/// double-click before emitting [`RowSelectedMsg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowClickMsg {
    /// Index of the clicked row in the host-supplied rows.
    pub row_index: usize,
}

/// Double click on a cell; enters editing when the column allows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellDoubleClickMsg {
    /// Index of the clicked row in the host-supplied rows.
    pub row_index: usize,
    /// Key of the clicked column.
    pub column_key: String,
}

/// Click on a column header; toggles or activates sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderClickMsg {
    /// Key of the clicked column.
    pub column_key: String,
}

/// Click on a group header; toggles that group's expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupHeaderClickMsg {
    /// Composite path of the group ("parent|child").
    pub path: String,
}

/// Drag started on a column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDragStartMsg {
    /// Key of the dragged column.
    pub column_key: String,
}

/// Pointer moved during a header drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDragMoveMsg {
    /// Pointer x in logical units from the grid's left edge.
    pub x: i32,
}

/// Header drag released (anywhere — swaps are already committed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDragReleaseMsg;

/// Drag started on a column's resize handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeStartMsg {
    /// Key of the column being resized.
    pub column_key: String,
    /// Pointer x at gesture start, logical units.
    pub x: i32,
}

/// Pointer moved during a resize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeMoveMsg {
    /// Current pointer x, logical units.
    pub x: i32,
}

/// Resize released; the last computed width is final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeReleaseMsg;

/// Internal: fires when the single-click debounce window elapses.
///
/// Carried generation numbers let a double-click invalidate a pending
/// single click. Hosts never construct this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickTimeoutMsg {
    pub(super) generation: u64,
}

impl ClickTimeoutMsg {
    pub(super) fn new(generation: u64) -> Self {
        Self { generation }
    }
}

// ---------------------------------------------------------------------
// Outbound: grid → host
// ---------------------------------------------------------------------

/// A row was selected (click debounce elapsed, or keyboard select).
#[derive(Debug, Clone, PartialEq)]
pub struct RowSelectedMsg {
    /// Index of the selected row in the host-supplied rows.
    pub row_index: usize,
    /// The full selected row.
    pub row: Row,
}

/// The sort directive changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortChangedMsg {
    /// The newly active sort column.
    pub key: String,
    /// The new direction.
    pub direction: Direction,
}

/// The column order changed (one drag swap committed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOrderChangedMsg {
    /// The full committed order, leftmost first.
    pub order: Vec<String>,
}

/// A column's width was committed at the end of a resize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnWidthChangedMsg {
    /// Key of the resized column.
    pub column_key: String,
    /// Final width, logical units.
    pub width: u32,
}

/// A group header was toggled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupToggledMsg {
    /// Composite path of the toggled group.
    pub path: String,
    /// Its new expansion state.
    pub expanded: bool,
}

/// A cell edit was committed; the host owns applying it to its rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellCommittedMsg {
    /// The committed edit, uncoerced and unvalidated.
    pub commit: EditCommit,
}

/// Wraps an outbound message in a command that delivers it on the next
/// runtime turn.
pub(super) fn emit<M: Clone + Send + 'static>(msg: M) -> Cmd {
    bubbletea_tick(Duration::from_nanos(1), move |_| Box::new(msg.clone()) as Msg)
}
