// Keymod Key Registry
// Symbol table mapping key names to their canonical KeyValue

use std::sync::{Arc, LazyLock};

use indexmap::IndexMap;

use crate::key::{ControlKey, EditorAction, KeyError, KeyEvent, KeyValue};
use crate::Flags;

/// Global registry, built on first access
static GLOBAL_REGISTRY: LazyLock<Arc<KeyRegistry>> =
    LazyLock::new(|| Arc::new(KeyRegistry::with_defaults()));

/// Typographic characters reachable through the Fn layer
const TYPOGRAPHIC_CHARS: &str = "«»‹›‘’“”‚„–—¬‰≈€£°…·¡¿";

/// Letters used by non-English layouts, filtered by the extra keys setting
const LOCALIZED_CHARS: &str = "àáâãäåæçèéêëìíîïñòóôõöœßùúûüÿµ";

/// Name to key symbol table.
///
/// Iteration follows insertion order. Inserting an existing name replaces
/// the previous key.
#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    keys: IndexMap<String, KeyValue>,
}

impl KeyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            keys: IndexMap::new(),
        }
    }

    /// Create a registry holding every built-in key
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        for c in '!'..='~' {
            registry.insert(KeyValue::char_key(c));
        }
        registry.insert(KeyValue::new("space", Some(' '), "␣", KeyEvent::Char, Flags::empty()));
        registry.insert(KeyValue::new("\\t", Some('\t'), "\\t", KeyEvent::Char, Flags::empty()));
        for c in TYPOGRAPHIC_CHARS.chars() {
            registry.insert(KeyValue::char_key(c));
        }
        for c in LOCALIZED_CHARS.chars() {
            registry.insert(KeyValue::char_key(c).with_flags(Flags::LOCALIZED));
        }

        registry.add_control("enter", "⏎", ControlKey::Enter);
        registry.add_control("esc", "Esc", ControlKey::Escape);
        registry.add_control("tab", "⇥", ControlKey::Tab);
        registry.add_control("backspace", "⌫", ControlKey::Backspace);
        registry.add_control("delete", "⌦", ControlKey::Delete);
        registry.add_control("insert", "Ins", ControlKey::Insert);
        registry.add_control("up", "↑", ControlKey::Up);
        registry.add_control("down", "↓", ControlKey::Down);
        registry.add_control("left", "←", ControlKey::Left);
        registry.add_control("right", "→", ControlKey::Right);
        registry.add_control("page_up", "⇞", ControlKey::PageUp);
        registry.add_control("page_down", "⇟", ControlKey::PageDown);
        registry.add_control("home", "↖", ControlKey::Home);
        registry.add_control("end", "↘", ControlKey::End);
        let function_keys = [
            ControlKey::F1,
            ControlKey::F2,
            ControlKey::F3,
            ControlKey::F4,
            ControlKey::F5,
            ControlKey::F6,
            ControlKey::F7,
            ControlKey::F8,
            ControlKey::F9,
            ControlKey::F10,
            ControlKey::F11,
            ControlKey::F12,
        ];
        for (i, key) in function_keys.into_iter().enumerate() {
            let label = format!("F{}", i + 1);
            registry.add_control(&key.to_string(), &label, key);
        }
        // Only shown while Fn is active
        registry.add_control("f11_placeholder", "F11", ControlKey::F11);
        registry.add_control("f12_placeholder", "F12", ControlKey::F12);

        registry.add_editor("config", "⚙", EditorAction::Config);
        registry.add_editor("switch_text", "ABC", EditorAction::SwitchText);
        registry.add_editor("switch_numeric", "123+", EditorAction::SwitchNumeric);
        registry.add_editor("switch_emoji", "☺", EditorAction::SwitchEmoji);
        registry.add_editor("switch_back_emoji", "ABC", EditorAction::SwitchBackEmoji);
        registry.add_editor("action", "Action", EditorAction::Action);
        registry.insert(KeyValue::new(
            "change_method",
            None,
            "⌨",
            KeyEvent::SwitchInputMethod,
            Flags::empty(),
        ));

        registry.add_modifier("shift", "⇧", Flags::SHIFT);
        registry.add_modifier("ctrl", "Ctrl", Flags::CTRL);
        registry.add_modifier("alt", "Alt", Flags::ALT);
        registry.add_modifier("fn", "Fn", Flags::FN);
        registry.add_modifier("meta", "◆", Flags::META);
        registry.add_modifier("accent_grave", "`", Flags::ACCENT1);
        registry.add_modifier("accent_aigu", "´", Flags::ACCENT2);
        registry.add_modifier("accent_circonflexe", "ˆ", Flags::ACCENT3);
        registry.add_modifier("accent_tilde", "˜", Flags::ACCENT4);
        registry.add_modifier("accent_cedille", "¸", Flags::ACCENT5);
        registry.add_modifier("accent_trema", "¨", Flags::ACCENT6);
        registry.add_modifier("accent_caron", "ˇ", Flags::ACCENT_CARON);
        registry.add_modifier("accent_ring", "˚", Flags::ACCENT_RING);
        registry.add_modifier("accent_macron", "¯", Flags::ACCENT_MACRON);
        registry.add_modifier("accent_ordinal", "º", Flags::ACCENT_ORDINAL);
        registry.add_modifier("superscript", "Sup", Flags::ACCENT_SUPERSCRIPT);
        registry.add_modifier("subscript", "Sub", Flags::ACCENT_SUBSCRIPT);
        registry.add_modifier("box", "Box", Flags::ACCENT_BOX);

        registry
    }

    /// The process-wide default registry
    pub fn global() -> &'static KeyRegistry {
        &GLOBAL_REGISTRY
    }

    /// Shared handle to the default registry
    pub fn shared() -> Arc<KeyRegistry> {
        Arc::clone(&GLOBAL_REGISTRY)
    }

    /// Add a key under its own name, replacing any previous entry
    pub fn insert(&mut self, key: KeyValue) {
        self.keys.insert(key.name().to_string(), key);
    }

    /// Canonical key for `name`
    pub fn lookup(&self, name: &str) -> Result<KeyValue, KeyError> {
        self.keys
            .get(name)
            .cloned()
            .ok_or_else(|| KeyError::UnknownKeyName(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// All keys in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &KeyValue> {
        self.keys.values()
    }

    fn add_control(&mut self, name: &str, symbol: &str, key: ControlKey) {
        self.insert(KeyValue::new(name, None, symbol, KeyEvent::Control(key), Flags::empty()));
    }

    fn add_editor(&mut self, name: &str, symbol: &str, action: EditorAction) {
        self.insert(KeyValue::new(name, None, symbol, KeyEvent::Editor(action), Flags::empty()));
    }

    fn add_modifier(&mut self, name: &str, symbol: &str, flags: Flags) {
        self.insert(KeyValue::new(name, None, symbol, KeyEvent::Modifier, flags));
    }
}
