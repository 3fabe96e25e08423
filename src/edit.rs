//! The single-cell edit session.
//!
//! At most one cell is ever mid-edit. The session tracks which cell
//! (row index + column key) and the candidate text; committing hands the
//! uncoerced text back to the host and cancelling discards it. Opening
//! an edit on a new cell while another is mid-edit silently abandons the
//! prior candidate — a deliberate simplification, there is no "unsaved
//! changes" guard at this layer.

use crate::column::Column;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

/// Payload of a committed edit, handed to the host unvalidated.
///
/// The grid performs no coercion: `value` is exactly the pending text,
/// and validation is the host's responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommit {
    /// Index of the edited row in the host's row set.
    pub row_index: usize,
    /// Key of the edited column.
    pub column_key: String,
    /// The candidate text as typed.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveEdit {
    row_index: usize,
    column_key: String,
    pending: String,
}

/// Tracks the at-most-one in-flight cell edit.
///
/// # Examples
///
/// ```rust
/// use datagrid_widgets::column::Column;
/// use datagrid_widgets::edit::EditSession;
///
/// let name = Column::new("name", "Name").with_editable(true);
/// let mut session = EditSession::new();
/// assert!(session.begin(0, &name, ""));
/// session.push('X');
/// let commit = session.commit().unwrap();
/// assert_eq!((commit.row_index, commit.value.as_str()), (0, "X"));
/// assert!(!session.is_editing());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    active: Option<ActiveEdit>,
}

impl EditSession {
    /// Creates a session in the viewing state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters editing on a cell, seeding the candidate with `initial`.
    ///
    /// Requires the column to be editable; otherwise this is a no-op and
    /// returns `false` (no event, no state change). Any prior
    /// uncommitted edit is discarded.
    pub fn begin(&mut self, row_index: usize, column: &Column, initial: impl Into<String>) -> bool {
        if !column.editable {
            return false;
        }
        if let Some(prior) = &self.active {
            debug!(
                row = prior.row_index,
                column = %prior.column_key,
                "abandoning uncommitted edit"
            );
        }
        debug!(row = row_index, column = %column.key, "edit started");
        self.active = Some(ActiveEdit {
            row_index,
            column_key: column.key.clone(),
            pending: initial.into(),
        });
        true
    }

    /// Returns `true` while a cell is mid-edit.
    pub fn is_editing(&self) -> bool {
        self.active.is_some()
    }

    /// Returns `true` when exactly this cell is mid-edit.
    pub fn is_editing_cell(&self, row_index: usize, column_key: &str) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.row_index == row_index && a.column_key == column_key)
    }

    /// The candidate text, while editing.
    pub fn pending(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.pending.as_str())
    }

    /// Replaces the candidate text wholesale.
    pub fn set_pending(&mut self, value: impl Into<String>) {
        if let Some(active) = &mut self.active {
            active.pending = value.into();
        }
    }

    /// Appends a typed character to the candidate.
    pub fn push(&mut self, ch: char) {
        if let Some(active) = &mut self.active {
            active.pending.push(ch);
        }
    }

    /// Removes the last grapheme from the candidate.
    pub fn backspace(&mut self) {
        if let Some(active) = &mut self.active {
            if let Some((offset, _)) = active.pending.grapheme_indices(true).next_back() {
                active.pending.truncate(offset);
            }
        }
    }

    /// Commits the edit, returning the payload for the host.
    ///
    /// The session returns to viewing either way; `None` when nothing
    /// was being edited.
    pub fn commit(&mut self) -> Option<EditCommit> {
        let active = self.active.take()?;
        debug!(
            row = active.row_index,
            column = %active.column_key,
            value = %active.pending,
            "edit committed"
        );
        Some(EditCommit {
            row_index: active.row_index,
            column_key: active.column_key,
            value: active.pending,
        })
    }

    /// Discards the edit and returns to viewing.
    pub fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            debug!(
                row = active.row_index,
                column = %active.column_key,
                "edit cancelled"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editable(key: &str) -> Column {
        Column::new(key, key).with_editable(true)
    }

    #[test]
    fn test_begin_rejects_non_editable_column() {
        let col = Column::new("name", "Name"); // editable defaults to false
        let mut session = EditSession::new();
        assert!(!session.begin(0, &col, "x"));
        assert!(!session.is_editing());
    }

    #[test]
    fn test_typing_and_commit() {
        let mut session = EditSession::new();
        session.begin(0, &editable("name"), "");
        session.push('X');
        let commit = session.commit().unwrap();
        assert_eq!(
            commit,
            EditCommit {
                row_index: 0,
                column_key: "name".into(),
                value: "X".into()
            }
        );
        assert!(!session.is_editing());
    }

    #[test]
    fn test_cancel_discards_candidate() {
        let mut session = EditSession::new();
        session.begin(2, &editable("name"), "old");
        session.push('!');
        session.cancel();
        assert!(!session.is_editing());
        assert_eq!(session.commit(), None);
    }

    #[test]
    fn test_new_begin_abandons_prior_edit() {
        let mut session = EditSession::new();
        session.begin(0, &editable("a"), "first");
        session.begin(1, &editable("b"), "second");
        assert!(!session.is_editing_cell(0, "a"));
        assert!(session.is_editing_cell(1, "b"));
        assert_eq!(session.commit().unwrap().value, "second");
    }

    #[test]
    fn test_backspace_removes_whole_grapheme() {
        let mut session = EditSession::new();
        session.begin(0, &editable("a"), "ae\u{301}"); // "a" + e-acute
        session.backspace();
        assert_eq!(session.pending(), Some("a"));
        session.backspace();
        assert_eq!(session.pending(), Some(""));
        session.backspace(); // empty: no-op
        assert_eq!(session.pending(), Some(""));
    }
}
