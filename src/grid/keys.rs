//! Key bindings for grid navigation and editing.
//!
//! Navigation follows the usual arrow/vim pairs; `enter` doubles as
//! "select row" while viewing and "commit" while editing, and `esc`
//! cancels an in-flight edit. Pointer-only interactions (drag reorder,
//! resize, group toggling) have no key bindings here.

use crate::key::{self, KeyMap as KeyMapTrait};
use crossterm::event::KeyCode;

/// Key bindings for the grid component.
#[derive(Debug, Clone)]
pub struct GridKeyMap {
    /// Move the row cursor up. Default: `↑`, `k`.
    pub cursor_up: key::Binding,
    /// Move the row cursor down. Default: `↓`, `j`.
    pub cursor_down: key::Binding,
    /// Move the column cursor left. Default: `←`, `h`.
    pub cursor_left: key::Binding,
    /// Move the column cursor right. Default: `→`, `l`.
    pub cursor_right: key::Binding,
    /// Select the row under the cursor. Default: `enter`.
    pub select: key::Binding,
    /// Toggle sorting on the column under the cursor. Default: `s`.
    pub toggle_sort: key::Binding,
    /// Start editing the cell under the cursor. Default: `e`, `F2`.
    pub start_edit: key::Binding,
    /// Commit the in-flight edit. Default: `enter`.
    pub commit_edit: key::Binding,
    /// Cancel the in-flight edit. Default: `esc`.
    pub cancel_edit: key::Binding,
}

impl Default for GridKeyMap {
    fn default() -> Self {
        Self {
            cursor_up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
                .with_help("↑/k", "up"),
            cursor_down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            cursor_left: key::Binding::new(vec![KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "column left"),
            cursor_right: key::Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
                .with_help("→/l", "column right"),
            select: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "select row"),
            toggle_sort: key::Binding::new(vec![KeyCode::Char('s')]).with_help("s", "sort"),
            start_edit: key::Binding::new(vec![KeyCode::Char('e'), KeyCode::F(2)])
                .with_help("e/F2", "edit cell"),
            commit_edit: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "commit"),
            cancel_edit: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "cancel"),
        }
    }
}

impl KeyMapTrait for GridKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.cursor_up,
            &self.cursor_down,
            &self.toggle_sort,
            &self.start_edit,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![
                &self.cursor_up,
                &self.cursor_down,
                &self.cursor_left,
                &self.cursor_right,
            ],
            vec![&self.select, &self.toggle_sort],
            vec![&self.start_edit, &self.commit_edit, &self.cancel_edit],
        ]
    }
}
