//! Column definitions supplied by the host.
//!
//! A [`Column`] describes one field shared by every row: its stable key,
//! display label, and behavior flags. Columns are read-only configuration
//! during a render pass; the grid only owns their *order* and *width*
//! (see [`crate::layout`]).

use crate::row::Row;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Custom cell renderer: receives the cell value and the full row and
/// returns the text to display.
pub type RenderFn = Arc<dyn Fn(&Value, &Row) -> String + Send + Sync>;

/// A named, typed field definition plus display/behavior flags.
///
/// # Examples
///
/// ```rust
/// use datagrid_widgets::column::Column;
///
/// let col = Column::new("status", "Status")
///     .with_editable(true)
///     .with_render(|value, _row| format!("[{}]", value));
/// assert_eq!(col.key, "status");
/// assert!(col.editable);
/// ```
#[derive(Clone)]
pub struct Column {
    /// Unique, stable identity of the field.
    pub key: String,
    /// Display name shown in the header.
    pub label: String,
    /// Whether clicking the header may sort by this column.
    pub sortable: bool,
    /// Whether filter rules may target this column.
    pub filterable: bool,
    /// Whether cells in this column accept in-place edits.
    pub editable: bool,
    render: Option<RenderFn>,
}

impl Column {
    /// Creates a column with the given key and label.
    ///
    /// Columns default to sortable and filterable but not editable.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: true,
            filterable: true,
            editable: false,
            render: None,
        }
    }

    /// Sets whether the column is sortable.
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Sets whether the column is filterable.
    pub fn with_filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Sets whether the column's cells accept edits.
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Installs a custom cell renderer.
    pub fn with_render<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Row) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(f));
        self
    }

    /// Returns the display text for this column's cell on `row`.
    ///
    /// Uses the custom renderer when one is installed, otherwise the
    /// plain string coercion of the cell value.
    pub fn display_value(&self, row: &Row) -> String {
        match &self.render {
            Some(render) => {
                let value = row.get(&self.key).cloned().unwrap_or(Value::Null);
                render(&value, row)
            }
            None => row.value_string(&self.key),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("editable", &self.editable)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
