//! Styling for the grid's header, body, and group chrome.
//!
//! All defaults use `AdaptiveColor` so the grid reads well on light and
//! dark terminals alike. The glyph constants are what the renderer uses
//! for sort indicators, group arrows, and the frozen-column divider;
//! they are plain `&str`s so hosts can reuse them when building their
//! own chrome.

use lipgloss_extras::prelude::*;

/// Indicator appended to the active sort column's header, ascending.
pub const SORT_ASC_INDICATOR: &str = "↑";

/// Indicator appended to the active sort column's header, descending.
pub const SORT_DESC_INDICATOR: &str = "↓";

/// Arrow shown on an expanded group header.
pub const EXPANDED_ARROW: &str = "▼";

/// Arrow shown on a collapsed group header.
pub const COLLAPSED_ARROW: &str = "▶";

/// Divider drawn after the last frozen column.
pub const FROZEN_DIVIDER: &str = "┃";

/// Block cursor drawn after the pending text of a cell mid-edit.
pub const EDIT_CURSOR: &str = "█";

/// Styling configuration for every visual element of the grid.
#[derive(Debug, Clone)]
pub struct GridStyles {
    /// Style for header cells.
    pub header: Style,
    /// Style for header cells at or before the frozen boundary.
    pub frozen_header: Style,
    /// Style for the header cell under the column cursor.
    pub header_cursor: Style,
    /// Style for ordinary body cells.
    pub cell: Style,
    /// Style for the row under the row cursor.
    pub selected_row: Style,
    /// Style for the cell currently being edited.
    pub editing_cell: Style,
    /// Style for group header lines.
    pub group_header: Style,
    /// Style for the recursive item count on group headers.
    pub group_count: Style,
    /// Style for the frozen-column divider glyph.
    pub frozen_divider: Style,
    /// Style for the "No results." message.
    pub no_results: Style,
}

impl Default for GridStyles {
    fn default() -> Self {
        let subdued_color = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };

        Self {
            header: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#1a1a1a",
                    Dark: "#dddddd",
                })
                .bold(true),
            frozen_header: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#1a1a1a",
                    Dark: "#dddddd",
                })
                .background(AdaptiveColor {
                    Light: "#EFEFEF",
                    Dark: "#2A2A2A",
                })
                .bold(true),
            header_cursor: Style::new()
                .foreground(Color::from("230"))
                .background(Color::from("62"))
                .bold(true),
            cell: Style::new(),
            selected_row: Style::new()
                .foreground(Color::from("230"))
                .background(Color::from("62")),
            editing_cell: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#04B575",
                    Dark: "#ECFD65",
                })
                .underline(true),
            group_header: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#043B86",
                    Dark: "#75A9F9",
                })
                .bold(true),
            group_count: Style::new().foreground(subdued_color.clone()),
            frozen_divider: Style::new().foreground(subdued_color.clone()),
            no_results: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
        }
    }
}
