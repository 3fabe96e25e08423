//! The grid composer: an interactive data-grid widget.
//!
//! `grid::Model` ties the engine pieces together — filtering
//! ([`crate::filter`]), stable sorting ([`crate::sort`]), recursive
//! grouping ([`crate::group`]), column geometry ([`crate::layout`]), and
//! the drag/resize/edit gesture machines — behind one Elm-architecture
//! component: feed it messages through [`Model::update`], read the frame
//! from [`Model::view`].
//!
//! The host owns the data (rows and column definitions) and pushes new
//! snapshots in; the grid owns presentation state (order, widths, frozen
//! boundary, sort/group/filter directives, selection, expansion, the
//! in-flight edit) and reports every user intent back out as a typed
//! message (see [`messages`]).
//!
//! # Examples
//!
//! ```rust
//! use datagrid_widgets::column::Column;
//! use datagrid_widgets::grid;
//! use datagrid_widgets::row::Row;
//!
//! let columns = vec![
//!     Column::new("id", "ID"),
//!     Column::new("city", "City"),
//!     Column::new("name", "Name").with_editable(true),
//! ];
//! let rows = vec![
//!     Row::new().with("id", 1).with("city", "A").with("name", "one"),
//!     Row::new().with("id", 2).with("city", "B").with("name", "two"),
//! ];
//! let mut grid = grid::Model::new(columns, rows);
//! grid.set_group_by(vec!["city".into()]);
//! let frame = grid.view();
//! assert!(frame.contains("City"));
//! ```

pub mod keys;
pub mod messages;
pub mod style;

mod rendering;
#[cfg(test)]
mod tests;

pub use keys::GridKeyMap;
pub use messages::{
    CellCommittedMsg, CellDoubleClickMsg, ColumnOrderChangedMsg, ColumnWidthChangedMsg,
    GroupHeaderClickMsg, GroupToggledMsg, HeaderClickMsg, HeaderDragMoveMsg, HeaderDragReleaseMsg,
    HeaderDragStartMsg, ResizeMoveMsg, ResizeReleaseMsg, ResizeStartMsg, RowClickMsg,
    RowSelectedMsg, SortChangedMsg,
};
pub use style::GridStyles;

use crate::column::Column;
use crate::edit::EditSession;
use crate::filter::{matches_all_groups, FilterGroup, SavedFilterStore};
use crate::group::{group_path, group_with, GroupExpansion, GroupTree};
use crate::layout::ColumnLayout;
use crate::reorder::DragReorder;
use crate::resize::ResizeGesture;
use crate::row::{Row, DEFAULT_ID_KEY};
use crate::sort::{compare_values, Direction, SortDirective};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::KeyCode;
use messages::{emit, ClickTimeoutMsg};
use std::time::Duration;

/// How long a row click waits for a potential double-click before it is
/// treated as a plain select.
pub const CLICK_DEBOUNCE: Duration = Duration::from_millis(250);

/// Default number of logical width units per rendered character cell.
pub const DEFAULT_CELL_DIVISOR: u32 = 10;

/// A row paired with its index in the host-supplied row set.
///
/// The pipeline reorders and partitions rows freely; carrying the source
/// index keeps selection and edit commits addressed in the host's terms.
pub type IndexedRow = (usize, Row);

/// The interactive data-grid component.
pub struct Model {
    columns: Vec<Column>,
    rows: Vec<Row>,
    id_key: String,

    /// Grid-owned column geometry: order, widths, frozen boundary.
    pub layout: ColumnLayout,
    /// The single active sort.
    pub sort: SortDirective,
    group_keys: Vec<String>,
    group_direction: Direction,
    filter_groups: Vec<FilterGroup>,
    /// Named filter snapshots.
    pub saved_filters: SavedFilterStore,

    expansion: GroupExpansion,
    edit: EditSession,
    drag: DragReorder,
    resize: ResizeGesture,

    cursor: usize,
    col_cursor: usize,
    focus: bool,

    /// Visual styling.
    pub styles: GridStyles,
    /// Key bindings.
    pub keymap: GridKeyMap,
    cell_divisor: u32,

    pending_click: Option<(usize, u64)>,
    click_generation: u64,
}

impl Model {
    /// Creates a grid over the given columns and rows.
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        let layout = ColumnLayout::new(columns.iter().map(|c| c.key.clone()));
        Self {
            columns,
            rows,
            id_key: DEFAULT_ID_KEY.to_string(),
            layout,
            sort: SortDirective::none(),
            group_keys: Vec::new(),
            group_direction: Direction::Ascending,
            filter_groups: Vec::new(),
            saved_filters: SavedFilterStore::new(),
            expansion: GroupExpansion::new(),
            edit: EditSession::new(),
            drag: DragReorder::new(),
            resize: ResizeGesture::new(),
            cursor: 0,
            col_cursor: 0,
            focus: true,
            styles: GridStyles::default(),
            keymap: GridKeyMap::default(),
            cell_divisor: DEFAULT_CELL_DIVISOR,
            pending_click: None,
            click_generation: 0,
        }
    }

    /// Overrides the identity field (default `"id"`).
    pub fn with_id_key(mut self, id_key: impl Into<String>) -> Self {
        self.id_key = id_key.into();
        self
    }

    /// Overrides the styles.
    pub fn with_styles(mut self, styles: GridStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Overrides the logical-units-per-character divisor used when
    /// rendering column widths.
    pub fn with_cell_divisor(mut self, divisor: u32) -> Self {
        self.cell_divisor = divisor.max(1);
        self
    }

    // -- host data ----------------------------------------------------

    /// Replaces the row set.
    ///
    /// Presentation state survives; the row cursor is clamped to the new
    /// visible extent and any in-flight edit is cancelled (its row may
    /// no longer exist).
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.edit.cancel();
        self.pending_click = None;
        self.clamp_cursor();
    }

    /// Replaces the column definitions, reconciling layout state: new
    /// keys are appended to the order, removed keys are dropped, and
    /// surviving keys keep their relative order and widths.
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.columns = columns;
        let keys: Vec<&str> = self.columns.iter().map(|c| c.key.as_str()).collect();
        self.layout.reconcile(keys.iter().copied());
        self.col_cursor = self.col_cursor.min(self.layout.order().len().saturating_sub(1));
    }

    /// The host-supplied rows, unfiltered and unsorted.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The host-supplied column definitions.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The configured identity field.
    pub fn id_key(&self) -> &str {
        &self.id_key
    }

    /// Looks up a column definition by key.
    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    // -- directives ---------------------------------------------------

    /// Sets the group-by key sequence (empty disables grouping).
    pub fn set_group_by(&mut self, keys: Vec<String>) {
        self.group_keys = keys;
        self.clamp_cursor();
    }

    /// The active group-by key sequence.
    pub fn group_by(&self) -> &[String] {
        &self.group_keys
    }

    /// Sets the group key iteration direction.
    pub fn set_group_direction(&mut self, direction: Direction) {
        self.group_direction = direction;
    }

    /// Replaces the active filter-group set.
    pub fn set_filter_groups(&mut self, groups: Vec<FilterGroup>) {
        self.filter_groups = groups;
        self.clamp_cursor();
    }

    /// The active filter-group set.
    pub fn filter_groups(&self) -> &[FilterGroup] {
        &self.filter_groups
    }

    /// Snapshots the active filter groups under a name.
    pub fn save_current_filters(
        &mut self,
        name: impl Into<String>,
    ) -> Result<(), crate::filter::SavedFilterError> {
        let groups = self.filter_groups.clone();
        self.saved_filters.save(name, groups).map(|_| ())
    }

    /// Restores a named filter snapshot; `false` when no such name.
    pub fn apply_saved_filter(&mut self, name: &str) -> bool {
        let Some(saved) = self.saved_filters.get_by_name(name) else {
            return false;
        };
        self.filter_groups = saved.filter_groups.clone();
        self.clamp_cursor();
        true
    }

    /// Toggles expansion of the group at `path`, returning the new
    /// state.
    pub fn toggle_group(&mut self, path: &str) -> bool {
        self.expansion.toggle(path)
    }

    /// Returns `true` when the group at `path` is expanded.
    pub fn is_group_expanded(&self, path: &str) -> bool {
        self.expansion.is_expanded(path)
    }

    // -- pipeline -----------------------------------------------------

    /// Filtered and sorted rows, paired with their source indices.
    pub fn visible_rows(&self) -> Vec<IndexedRow> {
        let mut rows: Vec<IndexedRow> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| matches_all_groups(row, &self.filter_groups))
            .map(|(i, row)| (i, row.clone()))
            .collect();
        if let Some(key) = &self.sort.key {
            rows.sort_by(|a, b| {
                self.sort
                    .direction
                    .apply(compare_values(a.1.get(key), b.1.get(key)))
            });
        }
        rows
    }

    /// The visible rows partitioned by the active group-by keys.
    pub fn visible_tree(&self) -> GroupTree<IndexedRow> {
        group_with(
            self.visible_rows(),
            &self.group_keys,
            self.group_direction,
            &|(_, row), key| row.get(key).cloned(),
        )
    }

    /// Rows in display order: filtered, sorted, grouped, with collapsed
    /// groups' rows omitted. This is what the row cursor addresses.
    pub fn flattened_rows(&self) -> Vec<IndexedRow> {
        let mut out = Vec::new();
        flatten_into(&self.visible_tree(), "", &self.expansion, &mut out);
        out
    }

    /// The display-order position of the row cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The position of the column cursor within the layout order.
    pub fn column_cursor(&self) -> usize {
        self.col_cursor
    }

    /// Returns `true` while a cell edit is in flight.
    pub fn is_editing(&self) -> bool {
        self.edit.is_editing()
    }

    /// The edit session (read access for hosts that render their own
    /// chrome around the pending value).
    pub fn edit_session(&self) -> &EditSession {
        &self.edit
    }

    fn clamp_cursor(&mut self) {
        let len = self.flattened_rows().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    // -- update -------------------------------------------------------

    /// Processes one message, returning a command when the grid has an
    /// outbound event (or internal timer) to run.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.update_key(key_msg);
        }
        if let Some(click) = msg.downcast_ref::<RowClickMsg>() {
            return self.on_row_click(click.row_index);
        }
        if let Some(timeout) = msg.downcast_ref::<ClickTimeoutMsg>() {
            return self.on_click_timeout(*timeout);
        }
        if let Some(dbl) = msg.downcast_ref::<CellDoubleClickMsg>() {
            return self.on_cell_double_click(dbl.row_index, &dbl.column_key);
        }
        if let Some(header) = msg.downcast_ref::<HeaderClickMsg>() {
            return self.on_header_click(&header.column_key);
        }
        if let Some(group) = msg.downcast_ref::<GroupHeaderClickMsg>() {
            let expanded = self.expansion.toggle(&group.path);
            self.clamp_cursor();
            return Some(emit(GroupToggledMsg {
                path: group.path.clone(),
                expanded,
            }));
        }
        if let Some(start) = msg.downcast_ref::<HeaderDragStartMsg>() {
            if let Some(index) = self.layout.position(&start.column_key) {
                self.drag.begin(start.column_key.clone(), index);
            }
            return None;
        }
        if let Some(mv) = msg.downcast_ref::<HeaderDragMoveMsg>() {
            return self.on_drag_move(mv.x);
        }
        if msg.downcast_ref::<HeaderDragReleaseMsg>().is_some() {
            self.drag.release();
            return None;
        }
        if let Some(start) = msg.downcast_ref::<ResizeStartMsg>() {
            let width = self.layout.width(&start.column_key);
            self.resize.begin(start.column_key.clone(), width, start.x);
            return None;
        }
        if let Some(mv) = msg.downcast_ref::<ResizeMoveMsg>() {
            if let Some(width) = self.resize.update(mv.x, self.layout.min_width()) {
                if let Some(key) = self.resize.resizing_key().map(str::to_string) {
                    // Live feedback: widths track the pointer while the
                    // gesture is in flight; the event fires on release.
                    self.layout.set_width(&key, width);
                }
            }
            return None;
        }
        if msg.downcast_ref::<ResizeReleaseMsg>().is_some() {
            if let Some((key, width)) = self.resize.release() {
                self.layout.set_width(&key, width);
                return Some(emit(ColumnWidthChangedMsg {
                    column_key: key,
                    width,
                }));
            }
            return None;
        }
        None
    }

    fn update_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if !self.focus {
            return None;
        }
        if self.edit.is_editing() {
            if self.keymap.commit_edit.matches(key_msg) {
                return self.commit_edit();
            }
            if self.keymap.cancel_edit.matches(key_msg) {
                self.edit.cancel();
                return None;
            }
            match key_msg.key {
                KeyCode::Char(c) => self.edit.push(c),
                KeyCode::Backspace => self.edit.backspace(),
                _ => {}
            }
            return None;
        }

        if self.keymap.cursor_up.matches(key_msg) {
            self.cursor = self.cursor.saturating_sub(1);
        } else if self.keymap.cursor_down.matches(key_msg) {
            let len = self.flattened_rows().len();
            if self.cursor + 1 < len {
                self.cursor += 1;
            }
        } else if self.keymap.cursor_left.matches(key_msg) {
            self.col_cursor = self.col_cursor.saturating_sub(1);
        } else if self.keymap.cursor_right.matches(key_msg) {
            if self.col_cursor + 1 < self.layout.order().len() {
                self.col_cursor += 1;
            }
        } else if self.keymap.toggle_sort.matches(key_msg) {
            let key = self.layout.order().get(self.col_cursor)?.clone();
            return self.toggle_sort(&key);
        } else if self.keymap.start_edit.matches(key_msg) {
            let key = self.layout.order().get(self.col_cursor)?.clone();
            let (row_index, row) = self.flattened_rows().get(self.cursor)?.clone();
            let column = self.column(&key)?.clone();
            self.edit.begin(row_index, &column, row.value_string(&key));
        } else if self.keymap.select.matches(key_msg) {
            // Keyboard select is immediate; only pointer clicks need the
            // double-click debounce.
            let (row_index, row) = self.flattened_rows().get(self.cursor)?.clone();
            return Some(emit(RowSelectedMsg { row_index, row }));
        }
        None
    }

    fn on_row_click(&mut self, row_index: usize) -> Option<Cmd> {
        if self.edit.is_editing() {
            // Clicking elsewhere blurs the edited cell; the click itself
            // is consumed by the blur.
            return self.commit_edit();
        }
        if row_index >= self.rows.len() {
            return None;
        }
        self.click_generation += 1;
        let generation = self.click_generation;
        self.pending_click = Some((row_index, generation));
        Some(bubbletea_tick(CLICK_DEBOUNCE, move |_| {
            Box::new(ClickTimeoutMsg::new(generation)) as Msg
        }))
    }

    fn on_click_timeout(&mut self, timeout: ClickTimeoutMsg) -> Option<Cmd> {
        let (row_index, generation) = self.pending_click?;
        if ClickTimeoutMsg::new(generation) != timeout {
            return None;
        }
        self.pending_click = None;
        let row = self.rows.get(row_index)?.clone();
        if let Some(pos) = self
            .flattened_rows()
            .iter()
            .position(|(index, _)| *index == row_index)
        {
            self.cursor = pos;
        }
        Some(emit(RowSelectedMsg { row_index, row }))
    }

    fn on_cell_double_click(&mut self, row_index: usize, column_key: &str) -> Option<Cmd> {
        // A double-click supersedes the pending single click.
        self.click_generation += 1;
        self.pending_click = None;
        let column = self.column(column_key)?.clone();
        let initial = self.rows.get(row_index)?.value_string(column_key);
        // Non-editable columns: no-op, no event. A prior uncommitted
        // edit is silently abandoned by a successful begin.
        self.edit.begin(row_index, &column, initial);
        None
    }

    fn on_header_click(&mut self, column_key: &str) -> Option<Cmd> {
        if self.edit.is_editing() {
            return self.commit_edit();
        }
        self.toggle_sort(column_key)
    }

    fn toggle_sort(&mut self, column_key: &str) -> Option<Cmd> {
        if !self.column(column_key).is_some_and(|c| c.sortable) {
            return None;
        }
        self.sort.toggle(column_key);
        Some(emit(SortChangedMsg {
            key: column_key.to_string(),
            direction: self.sort.direction,
        }))
    }

    fn on_drag_move(&mut self, x: i32) -> Option<Cmd> {
        if !self.drag.is_dragging() {
            return None;
        }
        let (target_index, target_mid_x) = self.header_hit(x)?;
        let swap = self.drag.hover(target_index, target_mid_x, x)?;
        self.layout.swap(swap.from, swap.to);
        Some(emit(ColumnOrderChangedMsg {
            order: self.layout.order().to_vec(),
        }))
    }

    fn commit_edit(&mut self) -> Option<Cmd> {
        let commit = self.edit.commit()?;
        Some(emit(CellCommittedMsg { commit }))
    }

    /// Finds the header under `x` (logical units): its position in the
    /// order and its horizontal midpoint.
    fn header_hit(&self, x: i32) -> Option<(usize, i32)> {
        let mut left: i64 = 0;
        for (index, key) in self.layout.order().iter().enumerate() {
            let width = self.layout.width(key) as i64;
            if (x as i64) < left + width {
                return Some((index, (left + width / 2) as i32));
            }
            left += width;
        }
        None
    }
}

fn flatten_into(
    tree: &GroupTree<IndexedRow>,
    parent_path: &str,
    expansion: &GroupExpansion,
    out: &mut Vec<IndexedRow>,
) {
    match tree {
        GroupTree::Leaf(items) => out.extend(items.iter().cloned()),
        GroupTree::Node(children) => {
            for (label, subtree) in children {
                let path = group_path(parent_path, label);
                if expansion.is_expanded(&path) {
                    flatten_into(subtree, &path, expansion, out);
                }
            }
        }
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (Model::new(Vec::new(), Vec::new()), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        Model::update(self, &msg)
    }

    fn view(&self) -> String {
        Model::view(self)
    }
}

impl crate::Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    /// Removes keyboard focus.
    ///
    /// Widget-level blur does not touch the edit session: cell blur is
    /// the concern of the pointer messages (clicking another row or a
    /// header commits the in-flight edit).
    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
