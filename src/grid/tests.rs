//! Tests for the grid component.

use super::messages::ClickTimeoutMsg;
use super::*;
use crate::column::Column;
use crate::filter::{FilterGroup, FilterOperator, FilterRule, Logic};
use crate::row::Row;
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss::strip_ansi;

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

fn columns() -> Vec<Column> {
    vec![
        Column::new("id", "ID"),
        Column::new("year", "Year"),
        Column::new("city", "City").with_sortable(false),
        Column::new("name", "Name").with_editable(true),
    ]
}

fn rows() -> Vec<Row> {
    vec![
        Row::new()
            .with("id", 1)
            .with("year", 2020)
            .with("city", "B")
            .with("name", "one"),
        Row::new()
            .with("id", 2)
            .with("year", 2019)
            .with("city", "A")
            .with("name", "two"),
        Row::new()
            .with("id", 3)
            .with("year", 2021)
            .with("city", "A")
            .with("name", "three"),
    ]
}

fn grid() -> Model {
    Model::new(columns(), rows())
}

fn visible_ids(grid: &Model) -> Vec<String> {
    grid.visible_rows()
        .iter()
        .map(|(_, row)| row.value_string("id"))
        .collect()
}

// -- sorting ----------------------------------------------------------

#[test]
fn test_header_click_sorts_ascending_then_descending() {
    let mut grid = grid();
    let cmd = grid.update(&(Box::new(HeaderClickMsg {
        column_key: "year".into(),
    }) as Msg));
    assert!(cmd.is_some());
    assert_eq!(grid.sort.key.as_deref(), Some("year"));
    assert_eq!(visible_ids(&grid), ["2", "1", "3"]);

    grid.update(&(Box::new(HeaderClickMsg {
        column_key: "year".into(),
    }) as Msg));
    assert_eq!(visible_ids(&grid), ["3", "1", "2"]);
}

#[test]
fn test_header_click_on_unsortable_column_is_ignored() {
    let mut grid = grid();
    let cmd = grid.update(&(Box::new(HeaderClickMsg {
        column_key: "city".into(),
    }) as Msg));
    assert!(cmd.is_none());
    assert_eq!(grid.sort.key, None);
}

#[test]
fn test_keyboard_sort_uses_column_cursor() {
    let mut grid = grid();
    grid.update(&key(KeyCode::Right)); // column cursor onto "year"
    let cmd = grid.update(&key(KeyCode::Char('s')));
    assert!(cmd.is_some());
    assert_eq!(grid.sort.key.as_deref(), Some("year"));
}

// -- filtering --------------------------------------------------------

#[test]
fn test_filter_groups_narrow_visible_rows() {
    let mut grid = grid();
    grid.set_filter_groups(vec![FilterGroup::new(Logic::And)
        .with_rule(FilterRule::new("city", FilterOperator::Equals, "A"))]);
    assert_eq!(visible_ids(&grid), ["2", "3"]);

    grid.set_filter_groups(Vec::new());
    assert_eq!(visible_ids(&grid).len(), 3);
}

#[test]
fn test_saved_filter_round_trip() {
    let mut grid = grid();
    grid.set_filter_groups(vec![FilterGroup::new(Logic::And).with_rule(FilterRule::new(
        "year",
        FilterOperator::GreaterThan,
        "2019",
    ))]);
    grid.save_current_filters("recent").unwrap();

    grid.set_filter_groups(Vec::new());
    assert_eq!(visible_ids(&grid).len(), 3);

    assert!(grid.apply_saved_filter("recent"));
    assert_eq!(visible_ids(&grid), ["1", "3"]);
    assert!(!grid.apply_saved_filter("missing"));
}

// -- grouping ---------------------------------------------------------

#[test]
fn test_group_toggle_collapses_rows() {
    let mut grid = grid();
    grid.set_group_by(vec!["city".into()]);
    assert_eq!(grid.flattened_rows().len(), 3);

    let cmd = grid.update(&(Box::new(GroupHeaderClickMsg { path: "A".into() }) as Msg));
    assert!(cmd.is_some());
    assert!(!grid.is_group_expanded("A"));
    // City A holds rows 2 and 3; collapsed, only row 1 remains visible.
    assert_eq!(grid.flattened_rows().len(), 1);

    grid.update(&(Box::new(GroupHeaderClickMsg { path: "A".into() }) as Msg));
    assert_eq!(grid.flattened_rows().len(), 3);
}

// -- selection and the click debounce ---------------------------------

#[test]
fn test_click_selects_after_debounce() {
    let mut grid = grid();
    let cmd = grid.update(&(Box::new(RowClickMsg { row_index: 1 }) as Msg));
    assert!(cmd.is_some()); // debounce timer scheduled

    let timeout = ClickTimeoutMsg::new(grid.click_generation);
    let cmd = grid.update(&(Box::new(timeout) as Msg));
    assert!(cmd.is_some()); // selection emitted
    assert_eq!(grid.cursor(), 1);
}

#[test]
fn test_double_click_invalidates_pending_click() {
    let mut grid = grid();
    grid.update(&(Box::new(RowClickMsg { row_index: 0 }) as Msg));
    let stale = ClickTimeoutMsg::new(grid.click_generation);

    grid.update(&(Box::new(CellDoubleClickMsg {
        row_index: 0,
        column_key: "name".into(),
    }) as Msg));

    // The first click's timer fires late; its generation no longer
    // matches, so no selection happens.
    let cmd = grid.update(&(Box::new(stale) as Msg));
    assert!(cmd.is_none());
}

#[test]
fn test_keyboard_select_is_immediate() {
    let mut grid = grid();
    grid.update(&key(KeyCode::Down));
    let cmd = grid.update(&key(KeyCode::Enter));
    assert!(cmd.is_some());
    assert_eq!(grid.cursor(), 1);
}

// -- editing ----------------------------------------------------------

#[test]
fn test_double_click_starts_edit_seeded_with_current_value() {
    let mut grid = grid();
    grid.update(&(Box::new(CellDoubleClickMsg {
        row_index: 2,
        column_key: "name".into(),
    }) as Msg));
    assert!(grid.is_editing());
    assert_eq!(grid.edit_session().pending(), Some("three"));
}

#[test]
fn test_double_click_on_non_editable_column_is_noop() {
    let mut grid = grid();
    let cmd = grid.update(&(Box::new(CellDoubleClickMsg {
        row_index: 0,
        column_key: "year".into(),
    }) as Msg));
    assert!(cmd.is_none());
    assert!(!grid.is_editing());
}

#[test]
fn test_typing_then_enter_commits() {
    let mut grid = grid();
    grid.update(&(Box::new(CellDoubleClickMsg {
        row_index: 0,
        column_key: "name".into(),
    }) as Msg));
    grid.update(&key(KeyCode::Backspace));
    grid.update(&key(KeyCode::Backspace));
    grid.update(&key(KeyCode::Backspace));
    grid.update(&key(KeyCode::Char('x')));
    assert_eq!(grid.edit_session().pending(), Some("x"));

    let cmd = grid.update(&key(KeyCode::Enter));
    assert!(cmd.is_some()); // commit emitted
    assert!(!grid.is_editing());
}

#[test]
fn test_esc_cancels_edit() {
    let mut grid = grid();
    grid.update(&(Box::new(CellDoubleClickMsg {
        row_index: 0,
        column_key: "name".into(),
    }) as Msg));
    grid.update(&key(KeyCode::Char('!')));
    let cmd = grid.update(&key(KeyCode::Esc));
    assert!(cmd.is_none());
    assert!(!grid.is_editing());
}

#[test]
fn test_click_elsewhere_commits_edit_and_swallows_click() {
    let mut grid = grid();
    grid.update(&(Box::new(CellDoubleClickMsg {
        row_index: 0,
        column_key: "name".into(),
    }) as Msg));

    let cmd = grid.update(&(Box::new(RowClickMsg { row_index: 2 }) as Msg));
    assert!(cmd.is_some()); // the commit, not a selection timer
    assert!(!grid.is_editing());
    assert_eq!(grid.pending_click, None);
}

#[test]
fn test_keyboard_edit_entry() {
    let mut grid = grid();
    for _ in 0..3 {
        grid.update(&key(KeyCode::Right)); // column cursor onto "name"
    }
    grid.update(&key(KeyCode::Char('e')));
    assert!(grid.is_editing());
    assert!(grid.edit_session().is_editing_cell(0, "name"));
}

// -- drag reorder -----------------------------------------------------

#[test]
fn test_drag_past_midpoint_swaps_columns() {
    let mut grid = grid();
    // Default widths: 150 each, so column 1 spans [150, 300) with
    // midpoint 225.
    grid.update(&(Box::new(HeaderDragStartMsg {
        column_key: "id".into(),
    }) as Msg));
    let cmd = grid.update(&(Box::new(HeaderDragMoveMsg { x: 230 }) as Msg));
    assert!(cmd.is_some());
    assert_eq!(grid.layout.order(), ["year", "id", "city", "name"]);

    // Release commits nothing further; swaps are already applied.
    let cmd = grid.update(&(Box::new(HeaderDragReleaseMsg) as Msg));
    assert!(cmd.is_none());
    assert_eq!(grid.layout.order(), ["year", "id", "city", "name"]);
}

#[test]
fn test_drag_short_of_midpoint_does_not_swap() {
    let mut grid = grid();
    grid.update(&(Box::new(HeaderDragStartMsg {
        column_key: "id".into(),
    }) as Msg));
    let cmd = grid.update(&(Box::new(HeaderDragMoveMsg { x: 200 }) as Msg));
    assert!(cmd.is_none());
    assert_eq!(grid.layout.order(), ["id", "year", "city", "name"]);
}

#[test]
fn test_drag_move_without_start_is_ignored() {
    let mut grid = grid();
    let cmd = grid.update(&(Box::new(HeaderDragMoveMsg { x: 230 }) as Msg));
    assert!(cmd.is_none());
    assert_eq!(grid.layout.order(), ["id", "year", "city", "name"]);
}

// -- resize -----------------------------------------------------------

#[test]
fn test_resize_clamps_to_floor_and_commits_on_release() {
    let mut grid = grid();
    grid.update(&(Box::new(ResizeStartMsg {
        column_key: "year".into(),
        x: 500,
    }) as Msg));

    // Dragging 200 units left of a 150-wide column hits the floor.
    let cmd = grid.update(&(Box::new(ResizeMoveMsg { x: 300 }) as Msg));
    assert!(cmd.is_none()); // live feedback only
    assert_eq!(grid.layout.width("year"), 80);

    let cmd = grid.update(&(Box::new(ResizeReleaseMsg) as Msg));
    assert!(cmd.is_some());
    assert_eq!(grid.layout.width("year"), 80);
}

#[test]
fn test_resize_widens() {
    let mut grid = grid();
    grid.update(&(Box::new(ResizeStartMsg {
        column_key: "year".into(),
        x: 0,
    }) as Msg));
    grid.update(&(Box::new(ResizeMoveMsg { x: 70 }) as Msg));
    grid.update(&(Box::new(ResizeReleaseMsg) as Msg));
    assert_eq!(grid.layout.width("year"), 220);
}

// -- host data changes ------------------------------------------------

#[test]
fn test_set_rows_cancels_edit_and_clamps_cursor() {
    let mut grid = grid();
    grid.update(&key(KeyCode::Down));
    grid.update(&key(KeyCode::Down));
    assert_eq!(grid.cursor(), 2);
    grid.update(&(Box::new(CellDoubleClickMsg {
        row_index: 0,
        column_key: "name".into(),
    }) as Msg));

    grid.set_rows(vec![Row::new().with("id", 9).with("name", "only")]);
    assert!(!grid.is_editing());
    assert_eq!(grid.cursor(), 0);
}

#[test]
fn test_set_columns_reconciles_layout() {
    let mut grid = grid();
    grid.layout.set_width("year", 200);
    grid.set_columns(vec![
        Column::new("year", "Year"),
        Column::new("id", "ID"),
        Column::new("score", "Score"),
    ]);
    // Surviving keys keep relative order and widths; new key appended.
    assert_eq!(grid.layout.order(), ["id", "year", "score"]);
    assert_eq!(grid.layout.width("year"), 200);
}

// -- focus ------------------------------------------------------------

#[test]
fn test_blurred_grid_ignores_keys() {
    use crate::Component;

    let mut grid = grid();
    grid.blur();
    let cmd = grid.update(&key(KeyCode::Enter));
    assert!(cmd.is_none());
    assert_eq!(grid.cursor(), 0);

    grid.focus();
    assert!(grid.update(&key(KeyCode::Enter)).is_some());
}

// -- rendering --------------------------------------------------------

#[test]
fn test_view_shows_headers_and_rows() {
    let grid = grid();
    let frame = strip_ansi(&grid.view());
    assert!(frame.contains("ID"));
    assert!(frame.contains("Year"));
    assert!(frame.contains("one"));
    assert_eq!(frame.lines().count(), 4); // header + 3 rows
}

#[test]
fn test_view_shows_sort_indicator() {
    let mut grid = grid();
    grid.update(&(Box::new(HeaderClickMsg {
        column_key: "year".into(),
    }) as Msg));
    let frame = strip_ansi(&grid.view());
    assert!(frame.contains(&format!("Year {}", style::SORT_ASC_INDICATOR)));

    grid.update(&(Box::new(HeaderClickMsg {
        column_key: "year".into(),
    }) as Msg));
    let frame = strip_ansi(&grid.view());
    assert!(frame.contains(&format!("Year {}", style::SORT_DESC_INDICATOR)));
}

#[test]
fn test_view_group_headers_show_arrow_and_count() {
    let mut grid = grid();
    grid.set_group_by(vec!["city".into()]);
    let frame = strip_ansi(&grid.view());
    assert!(frame.contains(&format!("{} A (2)", style::EXPANDED_ARROW)));
    assert!(frame.contains(&format!("{} B (1)", style::EXPANDED_ARROW)));
    // Two group headers, a nested column header per expanded partition,
    // and three body rows.
    assert_eq!(frame.lines().count(), 7);

    grid.toggle_group("A");
    let frame = strip_ansi(&grid.view());
    assert!(frame.contains(&format!("{} A (2)", style::COLLAPSED_ARROW)));
    assert!(!frame.contains("two")); // collapsed rows hidden
    assert_eq!(frame.lines().count(), 4);
}

#[test]
fn test_view_no_results_message() {
    let mut grid = grid();
    grid.set_filter_groups(vec![FilterGroup::new(Logic::And).with_rule(FilterRule::new(
        "city",
        FilterOperator::Equals,
        "nowhere",
    ))]);
    let frame = strip_ansi(&grid.view());
    assert!(frame.contains("No results."));
}

#[test]
fn test_view_frozen_divider() {
    let mut grid = grid();
    grid.layout.set_frozen(Some("id"));
    let frame = strip_ansi(&grid.view());
    assert!(frame.contains(style::FROZEN_DIVIDER));
}

#[test]
fn test_view_editing_cell_shows_cursor() {
    let mut grid = grid();
    grid.update(&(Box::new(CellDoubleClickMsg {
        row_index: 0,
        column_key: "name".into(),
    }) as Msg));
    let frame = strip_ansi(&grid.view());
    assert!(frame.contains(&format!("one{}", style::EDIT_CURSOR)));
}
