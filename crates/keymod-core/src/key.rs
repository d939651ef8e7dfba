// Keymod Key Value
// Immutable description of one key: identity, payload, display form and flags

use std::fmt;

use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::registry::KeyRegistry;
use crate::Flags;

/// Errors raised when building keys from the registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("unknown key name: {0:?}")]
    UnknownKeyName(String),
}

/// Editor-level actions a key can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum EditorAction {
    Config,
    SwitchText,
    SwitchNumeric,
    SwitchEmoji,
    SwitchBackEmoji,
    /// Placeholder for the action requested by the focused editor (send, go, search...)
    Action,
}

/// Named control keys that do not emit text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ControlKey {
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

/// What activating a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// Emit the key's character
    Char,
    /// Perform a named editor action
    Editor(EditorAction),
    /// Ask the host to switch to the next input method
    SwitchInputMethod,
    /// Emit a named control key
    Control(ControlKey),
    /// Contributes the key's flags to the active modifier set
    Modifier,
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEvent::Char => write!(f, "char"),
            KeyEvent::Editor(action) => write!(f, "editor:{}", action),
            KeyEvent::SwitchInputMethod => write!(f, "switch_input_method"),
            KeyEvent::Control(key) => write!(f, "control:{}", key),
            KeyEvent::Modifier => write!(f, "modifier"),
        }
    }
}

/// Immutable key description.
///
/// Every change produces a new value; nothing mutates an existing key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyValue {
    name: String,
    character: Option<char>,
    symbol: String,
    event: KeyEvent,
    flags: Flags,
}

impl KeyValue {
    /// Create a key from all of its parts
    pub fn new(
        name: impl Into<String>,
        character: Option<char>,
        symbol: impl Into<String>,
        event: KeyEvent,
        flags: Flags,
    ) -> Self {
        Self {
            name: name.into(),
            character,
            symbol: symbol.into(),
            event,
            flags,
        }
    }

    /// A key emitting `c`, named and labelled by the character itself
    pub fn char_key(c: char) -> Self {
        let text = c.to_string();
        Self::new(text.clone(), Some(c), text, KeyEvent::Char, Flags::empty())
    }

    /// Canonical key for `name` from the global registry
    pub fn by_name(name: &str) -> Result<Self, KeyError> {
        KeyRegistry::global().lookup(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Character payload, `None` for keys that trigger actions
    pub fn character(&self) -> Option<char> {
        self.character
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn event(&self) -> KeyEvent {
        self.event
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Same key emitting `c`, with `c` as its label
    pub fn with_char_and_symbol(&self, c: char) -> Self {
        Self {
            character: Some(c),
            symbol: c.to_string(),
            ..self.clone()
        }
    }

    /// Same key with a different flag set
    pub fn with_flags(&self, flags: Flags) -> Self {
        Self {
            flags,
            ..self.clone()
        }
    }

    /// Same key under another name and label
    pub fn with_name_and_symbol(&self, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_key() {
        let k = KeyValue::char_key('a');
        assert_eq!(k.name(), "a");
        assert_eq!(k.character(), Some('a'));
        assert_eq!(k.symbol(), "a");
        assert_eq!(k.event(), KeyEvent::Char);
        assert!(k.flags().is_empty());
    }

    #[test]
    fn test_derive_operations_leave_original_untouched() {
        let k = KeyValue::char_key('a');
        let upper = k.with_char_and_symbol('A');
        let flagged = k.with_flags(Flags::LOCALIZED);
        let renamed = k.with_name_and_symbol("Send", "Send");

        assert_eq!(k, KeyValue::char_key('a'));
        assert_eq!(upper.name(), "a");
        assert_eq!(upper.character(), Some('A'));
        assert_eq!(upper.symbol(), "A");
        assert_eq!(flagged.flags(), Flags::LOCALIZED);
        assert_eq!(flagged.character(), Some('a'));
        assert_eq!(renamed.name(), "Send");
        assert_eq!(renamed.symbol(), "Send");
        assert_eq!(renamed.character(), Some('a'));
    }

    #[test]
    fn test_by_name_unknown() {
        assert_eq!(
            KeyValue::by_name("no_such_key"),
            Err(KeyError::UnknownKeyName("no_such_key".to_string()))
        );
    }

    #[test]
    fn test_event_names() {
        assert_eq!(ControlKey::PageUp.to_string(), "page_up");
        assert_eq!(ControlKey::F11.to_string(), "f11");
        assert_eq!("switch_emoji".parse::<EditorAction>(), Ok(EditorAction::SwitchEmoji));
        assert_eq!(KeyEvent::Control(ControlKey::Enter).to_string(), "control:enter");
    }
}
