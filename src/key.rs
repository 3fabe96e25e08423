//! Type-safe key bindings with built-in help metadata.
//!
//! A [`Binding`] couples the key codes that trigger an action with the
//! help text describing it, so keymaps double as the source of truth for
//! help views. Components declare a keymap struct of bindings and
//! implement [`KeyMap`] to expose them.

use bubbletea_rs::KeyMsg;
use crossterm::event::KeyCode;

/// Help metadata for one binding: the key legend and what it does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Display form of the keys, e.g. `"↑/k"`.
    pub key: String,
    /// Short action description, e.g. `"move up"`.
    pub desc: String,
}

/// A set of key codes bound to one action.
///
/// # Examples
///
/// ```rust
/// use datagrid_widgets::key::Binding;
/// use crossterm::event::KeyCode;
///
/// let up = Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up");
/// assert_eq!(up.help.key, "↑/k");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding {
    /// Key codes that trigger this binding.
    pub keys: Vec<KeyCode>,
    /// Help metadata for display.
    pub help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding over the given key codes.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys,
            help: Help::default(),
            disabled: false,
        }
    }

    /// Attaches help metadata.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Enables or disables the binding; disabled bindings never match.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Returns `true` when the binding participates in matching.
    pub fn enabled(&self) -> bool {
        !self.disabled
    }

    /// Returns `true` when `key_msg` triggers this binding.
    pub fn matches(&self, key_msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.contains(&key_msg.key)
    }
}

/// Exposes a component's bindings to help views.
pub trait KeyMap {
    /// Bindings for the compact, single-line help view.
    fn short_help(&self) -> Vec<&Binding>;

    /// Bindings for the expanded help view, grouped into columns.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_matches_any_bound_code() {
        let binding = Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]);
        assert!(binding.matches(&key(KeyCode::Up)));
        assert!(binding.matches(&key(KeyCode::Char('k'))));
        assert!(!binding.matches(&key(KeyCode::Down)));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut binding = Binding::new(vec![KeyCode::Enter]);
        binding.set_enabled(false);
        assert!(!binding.matches(&key(KeyCode::Enter)));
        binding.set_enabled(true);
        assert!(binding.matches(&key(KeyCode::Enter)));
    }
}
