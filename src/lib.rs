#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/datagrid-widgets/")]

//! # datagrid-widgets
//!
//! An embeddable, host-agnostic data-grid engine for
//! [bubbletea-rs](https://github.com/whit3rabbit/bubbletea-rs)
//! applications: filtering, multi-level grouping, sorting, column
//! layout (reorder, resize, freeze), single-cell editing, and a
//! terminal renderer, all following the Elm Architecture pattern with
//! `init()`, `update()`, and `view()` methods.
//!
//! ## Overview
//!
//! The host owns the data: it supplies [`row::Row`]s (loose string-keyed
//! maps of [`value::Value`]s) and [`column::Column`] definitions, and
//! applies committed edits itself. The grid owns presentation state —
//! visual column order, widths, the frozen boundary, the active sort,
//! group-by keys, filter groups, expansion, selection, and the in-flight
//! edit — and reports every user intent back out as a typed message.
//!
//! Each engine piece is usable on its own:
//!
//! - [`filter`] — rule/group evaluation over rows, plus named snapshots
//! - [`sort`] — the null → date → number → text comparison ladder
//! - [`group`] — recursive partitioning into a [`group::GroupTree`]
//! - [`layout`] — order, widths, and frozen-column offsets
//! - [`reorder`] / [`resize`] — headless pointer-gesture state machines
//! - [`edit`] — the at-most-one cell edit session
//! - [`grid`] — the composed interactive widget
//!
//! ## Quick start
//!
//! ```rust
//! use datagrid_widgets::prelude::*;
//!
//! let columns = vec![
//!     Column::new("year", "Year"),
//!     Column::new("city", "City"),
//!     Column::new("name", "Name").with_editable(true),
//! ];
//! let rows = vec![
//!     Row::new().with("year", 2020).with("city", "A").with("name", "one"),
//!     Row::new().with("year", 2019).with("city", "B").with("name", "two"),
//! ];
//!
//! let mut grid = Grid::new(columns, rows);
//! grid.set_group_by(vec!["city".into()]);
//! grid.layout.set_frozen(Some("year"));
//!
//! let frame = grid.view();
//! assert!(frame.contains("Year"));
//! ```
//!
//! ## Messages
//!
//! Pointer gestures enter as typed messages ([`grid::RowClickMsg`],
//! [`grid::HeaderDragMoveMsg`], ...) fed through `update()`; the grid
//! answers with commands that deliver outbound events
//! ([`grid::RowSelectedMsg`], [`grid::SortChangedMsg`],
//! [`grid::CellCommittedMsg`], ...) back through the runtime, where the
//! host `downcast_ref`s them like any other message. See
//! [`grid::messages`] for the full vocabulary.
//!
//! ## Key bindings
//!
//! Keyboard interaction uses the type-safe binding system from the
//! [`key`] module:
//!
//! ```rust
//! use datagrid_widgets::key::Binding;
//! use crossterm::event::KeyCode;
//!
//! let confirm = Binding::new(vec![KeyCode::Enter]).with_help("enter", "select");
//! ```

use bubbletea_rs::Cmd;

pub mod column;
pub mod edit;
pub mod filter;
pub mod grid;
pub mod group;
pub mod key;
pub mod layout;
pub mod reorder;
pub mod resize;
pub mod row;
pub mod sort;
pub mod value;

/// Standardized focus management for embeddable components.
///
/// A focused component receives keyboard input; a blurred one ignores it
/// (pointer messages still apply — a click can be what restores focus).
///
/// # Examples
///
/// ```rust
/// use datagrid_widgets::prelude::*;
///
/// let mut grid = Grid::new(vec![], vec![]);
/// grid.blur();
/// assert!(!grid.focused());
/// grid.focus();
/// assert!(grid.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// May return a command for initialization tasks like starting
    /// timers or triggering redraws.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use column::Column;
pub use edit::{EditCommit, EditSession};
pub use filter::{
    apply_filters, FilterGroup, FilterOperator, FilterRule, Logic, SavedFilter, SavedFilterStore,
};
pub use grid::Model as Grid;
pub use group::{group_rows, GroupExpansion, GroupTree};
pub use key::{Binding, KeyMap};
pub use layout::ColumnLayout;
pub use reorder::DragReorder;
pub use resize::ResizeGesture;
pub use row::Row;
pub use sort::{apply_sort, Direction, SortDirective};
pub use value::Value;

/// Convenient re-exports for typical hosts.
///
/// ```rust
/// use datagrid_widgets::prelude::*;
///
/// let grid = Grid::new(
///     vec![Column::new("id", "ID")],
///     vec![Row::new().with("id", 1)],
/// );
/// assert_eq!(grid.rows().len(), 1);
/// ```
pub mod prelude {
    pub use crate::column::Column;
    pub use crate::edit::EditCommit;
    pub use crate::filter::{FilterGroup, FilterOperator, FilterRule, Logic};
    pub use crate::grid::{
        CellCommittedMsg, CellDoubleClickMsg, ColumnOrderChangedMsg, ColumnWidthChangedMsg,
        GridKeyMap, GridStyles, GroupHeaderClickMsg, GroupToggledMsg, HeaderClickMsg,
        HeaderDragMoveMsg, HeaderDragReleaseMsg, HeaderDragStartMsg, Model as Grid, ResizeMoveMsg,
        ResizeReleaseMsg, ResizeStartMsg, RowClickMsg, RowSelectedMsg, SortChangedMsg,
    };
    pub use crate::group::GroupTree;
    pub use crate::key::{Binding, KeyMap};
    pub use crate::layout::ColumnLayout;
    pub use crate::row::Row;
    pub use crate::sort::Direction;
    pub use crate::value::Value;
    pub use crate::Component;
}
