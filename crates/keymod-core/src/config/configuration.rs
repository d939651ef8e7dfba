// Keymod Configuration
// Runtime configuration consumed by layout adaptation

use std::collections::HashSet;

use crate::Flags;

/// Editor-provided action replacing the generic action key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomAction {
    /// Label shown on the key, also used as its name
    pub label: String,
    /// Editor action id dispatched when the key is activated
    pub id: u32,
}

impl CustomAction {
    pub fn new(label: impl Into<String>, id: u32) -> Self {
        Self {
            label: label.into(),
            id,
        }
    }
}

/// Finished configuration value.
///
/// Built by the host from persisted settings and the current editor session.
/// Read-only for the core.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Configuration {
    /// Show the "switch to next input method" key
    pub should_offer_switch_to_next_input_method: bool,
    pub custom_action: Option<CustomAction>,
    /// Put the custom action on the enter key and enter on the action key
    pub swap_enter_and_action: bool,
    /// Localized keys to keep. `None` keeps every localized key.
    pub extra_keys: Option<HashSet<String>>,
    /// Modifier flags that behave as sticky locks
    pub lockable_modifier_mask: Flags,
}

impl Configuration {
    /// Create a configuration with every option off
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_switch_input_method(mut self, offer: bool) -> Self {
        self.should_offer_switch_to_next_input_method = offer;
        self
    }

    pub fn with_custom_action(mut self, action: Option<CustomAction>) -> Self {
        self.custom_action = action;
        self
    }

    pub fn with_swap_enter_and_action(mut self, swap: bool) -> Self {
        self.swap_enter_and_action = swap;
        self
    }

    pub fn with_extra_keys<I, S>(mut self, keys: Option<I>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_keys = keys.map(|keys| keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_lockable_modifiers(mut self, mask: Flags) -> Self {
        self.lockable_modifier_mask = mask;
        self
    }

    /// Whether a localized key named `name` is allowed on the layout
    pub fn allows_localized(&self, name: &str) -> bool {
        self.extra_keys
            .as_ref()
            .map_or(true, |keys| keys.contains(name))
    }
}
