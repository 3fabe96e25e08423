//! Drag-to-resize gesture state machine for a single column.
//!
//! Resizing is per-column and independent: widening one column never
//! redistributes space to its neighbors. The machine captures the
//! pointer x and the column width at gesture start, then derives every
//! subsequent width as `start_width + (x - start_x)`, floored at the
//! layout's minimum. The width on release is final — no snapping.

use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
struct ResizeState {
    key: String,
    start_x: i32,
    start_width: u32,
    last_width: u32,
}

/// Pointer-driven column resize gesture.
///
/// # Examples
///
/// ```rust
/// use datagrid_widgets::resize::ResizeGesture;
///
/// let mut resize = ResizeGesture::new();
/// resize.begin("name", 150, 400);
/// assert_eq!(resize.update(430, 80), Some(180)); // +30
/// assert_eq!(resize.update(100, 80), Some(80));  // floored
/// let (key, width) = resize.release().unwrap();
/// assert_eq!((key.as_str(), width), ("name", 80));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResizeGesture {
    state: Option<ResizeState>,
}

impl ResizeGesture {
    /// Creates an idle gesture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts resizing column `key`, capturing its current `width` and
    /// the pointer position `x`.
    pub fn begin(&mut self, key: impl Into<String>, width: u32, x: i32) {
        let key = key.into();
        debug!(key = %key, width, x, "column resize started");
        self.state = Some(ResizeState {
            key,
            start_x: x,
            start_width: width,
            last_width: width,
        });
    }

    /// Feeds a pointer move, returning the new width.
    ///
    /// The width tracks the pointer's total travel since gesture start
    /// and never drops below `min_width`, however far past the left edge
    /// the pointer goes. Returns `None` while idle.
    pub fn update(&mut self, x: i32, min_width: u32) -> Option<u32> {
        let state = self.state.as_mut()?;
        let delta = x - state.start_x;
        let proposed = state.start_width as i64 + delta as i64;
        state.last_width = proposed.max(min_width as i64) as u32;
        Some(state.last_width)
    }

    /// Ends the gesture, returning the column key and its final width.
    ///
    /// The last computed width is final; releasing without any movement
    /// finalizes the starting width.
    pub fn release(&mut self) -> Option<(String, u32)> {
        let state = self.state.take()?;
        debug!(key = %state.key, width = state.last_width, "column resize released");
        Some((state.key, state.last_width))
    }

    /// Returns `true` while a resize is in flight.
    pub fn is_resizing(&self) -> bool {
        self.state.is_some()
    }

    /// Key of the column being resized, if any.
    pub fn resizing_key(&self) -> Option<&str> {
        self.state.as_ref().map(|s| s.key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_follows_pointer_travel() {
        let mut resize = ResizeGesture::new();
        resize.begin("name", 150, 400);
        assert_eq!(resize.update(410, 80), Some(160));
        assert_eq!(resize.update(390, 80), Some(140));
    }

    #[test]
    fn test_width_floors_at_minimum() {
        // Scenario: 150 wide, pointer dragged 200 units left.
        let mut resize = ResizeGesture::new();
        resize.begin("name", 150, 400);
        assert_eq!(resize.update(200, 80), Some(80));
        // And with a different configured floor:
        assert_eq!(resize.update(200, 50), Some(50));
    }

    #[test]
    fn test_update_while_idle_is_inert() {
        let mut resize = ResizeGesture::new();
        assert_eq!(resize.update(100, 80), None);
    }

    #[test]
    fn test_release_returns_last_computed_width() {
        let mut resize = ResizeGesture::new();
        resize.begin("a", 100, 0);
        resize.update(25, 80);
        assert_eq!(resize.release(), Some(("a".to_string(), 125)));
    }

    #[test]
    fn test_release_clears_state() {
        let mut resize = ResizeGesture::new();
        resize.begin("a", 100, 0);
        assert!(resize.is_resizing());
        assert_eq!(resize.resizing_key(), Some("a"));
        assert_eq!(resize.release(), Some(("a".to_string(), 100)));
        assert!(!resize.is_resizing());
        assert_eq!(resize.release(), None);
    }
}
