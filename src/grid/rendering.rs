//! Frame composition for the grid.
//!
//! The renderer is a pure function of the model: it walks the grouped
//! row tree produced by the pipeline and emits styled lines. Column
//! widths arrive in logical units and are divided down to character
//! cells here; cell text is padded and truncated by display width so
//! double-width glyphs line up.

use super::style::{
    COLLAPSED_ARROW, EDIT_CURSOR, EXPANDED_ARROW, FROZEN_DIVIDER, SORT_ASC_INDICATOR,
    SORT_DESC_INDICATOR,
};
use super::{IndexedRow, Model};
use crate::group::{group_path, GroupTree};
use crate::sort::Direction;
use unicode_width::UnicodeWidthStr;

/// Narrowest a column renders, in character cells, regardless of divisor.
const MIN_CELL_CHARS: usize = 3;

const GROUP_INDENT: &str = "  ";

impl Model {
    /// Renders the grid.
    ///
    /// Ungrouped: one header line followed by one line per visible row.
    /// Grouped: a collapsible header per partition with its recursive
    /// count; expanded partitions render a nested column header and
    /// their rows, collapsed ones only their group header line.
    pub fn view(&self) -> String {
        let tree = self.visible_tree();
        if tree.is_empty() {
            return format!(
                "{}\n{}",
                self.header_line(0),
                self.styles.no_results.clone().render("No results.")
            );
        }

        let mut lines = Vec::new();
        if tree.as_leaf().is_some() {
            lines.push(self.header_line(0));
        }
        let mut display_pos = 0usize;
        self.render_tree(&tree, "", 0, &mut display_pos, &mut lines);
        lines.join("\n")
    }

    fn render_tree(
        &self,
        tree: &GroupTree<IndexedRow>,
        parent_path: &str,
        depth: usize,
        display_pos: &mut usize,
        lines: &mut Vec<String>,
    ) {
        match tree {
            GroupTree::Leaf(items) => {
                // Each expanded partition carries its own column header.
                if depth > 0 {
                    lines.push(self.header_line(depth));
                }
                for (row_index, row) in items {
                    lines.push(self.row_line(*display_pos, *row_index, row, depth));
                    *display_pos += 1;
                }
            }
            GroupTree::Node(children) => {
                for (label, subtree) in children {
                    let path = group_path(parent_path, label);
                    let expanded = self.is_group_expanded(&path);
                    lines.push(self.group_header_line(label, subtree.count(), expanded, depth));
                    if expanded {
                        self.render_tree(subtree, &path, depth + 1, display_pos, lines);
                    }
                }
            }
        }
    }

    fn group_header_line(&self, label: &str, count: usize, expanded: bool, depth: usize) -> String {
        let arrow = if expanded {
            EXPANDED_ARROW
        } else {
            COLLAPSED_ARROW
        };
        format!(
            "{}{} {} {}",
            GROUP_INDENT.repeat(depth),
            self.styles.group_header.clone().render(arrow),
            self.styles.group_header.clone().render(label),
            self.styles.group_count.clone().render(&format!("({count})")),
        )
    }

    fn header_line(&self, depth: usize) -> String {
        let mut pieces = Vec::with_capacity(self.layout.order().len());
        for (index, key) in self.layout.order().iter().enumerate() {
            let label = self
                .column(key)
                .map(|c| c.label.clone())
                .unwrap_or_else(|| key.clone());
            let text = match (&self.sort.key, self.sort.direction) {
                (Some(sorted), Direction::Ascending) if sorted == key => {
                    format!("{label} {SORT_ASC_INDICATOR}")
                }
                (Some(sorted), Direction::Descending) if sorted == key => {
                    format!("{label} {SORT_DESC_INDICATOR}")
                }
                _ => label,
            };
            let padded = pad_cell(&text, self.char_width(key));
            let style = if index == self.column_cursor() && self.focus {
                &self.styles.header_cursor
            } else if self.layout.is_frozen(key) {
                &self.styles.frozen_header
            } else {
                &self.styles.header
            };
            pieces.push(style.clone().render(&padded));
        }
        format!("{}{}", GROUP_INDENT.repeat(depth), self.join_cells(pieces))
    }

    fn row_line(&self, display_pos: usize, row_index: usize, row: &crate::row::Row, depth: usize) -> String {
        let selected = display_pos == self.cursor() && self.focus;
        let mut pieces = Vec::with_capacity(self.layout.order().len());
        for key in self.layout.order() {
            let width = self.char_width(key);
            let piece = if self.edit_session().is_editing_cell(row_index, key) {
                let pending = self.edit_session().pending().unwrap_or_default();
                let text = fit_tail(&format!("{pending}{EDIT_CURSOR}"), width);
                self.styles.editing_cell.clone().render(&text)
            } else {
                let text = self
                    .column(key)
                    .map(|c| c.display_value(row))
                    .unwrap_or_else(|| row.value_string(key));
                let padded = pad_cell(&text, width);
                if selected {
                    self.styles.selected_row.clone().render(&padded)
                } else {
                    self.styles.cell.clone().render(&padded)
                }
            };
            pieces.push(piece);
        }
        format!("{}{}", GROUP_INDENT.repeat(depth), self.join_cells(pieces))
    }

    /// Joins rendered cells, placing the frozen divider after the last
    /// pinned column.
    fn join_cells(&self, pieces: Vec<String>) -> String {
        let divider_after = self
            .layout
            .frozen_key()
            .and_then(|key| self.layout.position(key));
        let mut out = String::new();
        for (index, piece) in pieces.iter().enumerate() {
            if index > 0 {
                if divider_after == Some(index - 1) {
                    out.push(' ');
                    out.push_str(&self.styles.frozen_divider.clone().render(FROZEN_DIVIDER));
                    out.push(' ');
                } else {
                    out.push(' ');
                }
            }
            out.push_str(piece);
        }
        out
    }

    /// A column's rendered width in character cells.
    pub(super) fn char_width(&self, key: &str) -> usize {
        let divisor = self.cell_divisor.max(1);
        ((self.layout.width(key) / divisor) as usize).max(MIN_CELL_CHARS)
    }
}

/// Pads or truncates to an exact display width, measuring by terminal
/// cells rather than chars.
fn pad_cell(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = UnicodeWidthStr::width(ch.encode_utf8(&mut [0u8; 4]) as &str);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    while used < width {
        out.push(' ');
        used += 1;
    }
    out
}

/// Like [`pad_cell`] but keeps the tail when truncating, so the edit
/// cursor at the end of long pending text stays visible.
fn fit_tail(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return pad_cell(text, width);
    }
    let mut kept: Vec<char> = Vec::new();
    let mut used = 0usize;
    for ch in text.chars().rev() {
        let w = UnicodeWidthStr::width(ch.encode_utf8(&mut [0u8; 4]) as &str);
        if used + w > width {
            break;
        }
        kept.push(ch);
        used += w;
    }
    kept.reverse();
    pad_cell(&kept.into_iter().collect::<String>(), width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_cell_pads_and_truncates_by_display_width() {
        assert_eq!(pad_cell("ab", 4), "ab  ");
        assert_eq!(pad_cell("abcdef", 4), "abcd");
        // Double-width glyphs count as two cells.
        assert_eq!(pad_cell("日本語", 4), "日本");
        assert_eq!(pad_cell("日", 4), "日  ");
    }

    #[test]
    fn test_fit_tail_keeps_the_end() {
        assert_eq!(fit_tail("abcdef", 4), "cdef");
        assert_eq!(fit_tail("ab", 4), "ab  ");
    }
}
