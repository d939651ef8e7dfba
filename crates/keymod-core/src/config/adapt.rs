// Keymod Layout Adaptation
// Rewrites a layout template according to the runtime configuration

use crate::config::Configuration;
use crate::key::{ControlKey, EditorAction, KeyEvent};
use crate::layout::Layout;
use crate::registry::KeyRegistry;
use crate::{Flags, KeyError, KeyValue};

/// Adapt `template` to `config` using the global registry.
///
/// - Remove the input method switching key unless it should be offered
/// - Remove localized keys not listed in the extra keys
/// - Show the custom action on the action key, or swap it with enter
/// - Mark lockable modifiers with [`Flags::LOCK`]
pub fn adapt(template: &Layout, config: &Configuration) -> Result<Layout, KeyError> {
    adapt_with(template, config, KeyRegistry::global())
}

/// Adapt `template` to `config`, synthesizing keys from `registry`
pub fn adapt_with(
    template: &Layout,
    config: &Configuration,
    registry: &KeyRegistry,
) -> Result<Layout, KeyError> {
    // Named after its label so resolutions cached for an older label are never reused
    let action_key = match &config.custom_action {
        Some(action) => Some(
            registry
                .lookup("action")?
                .with_name_and_symbol(action.label.as_str(), action.label.as_str()),
        ),
        None => None,
    };
    let enter_key = if config.swap_enter_and_action && action_key.is_some() {
        Some(registry.lookup("enter")?)
    } else {
        None
    };

    let rules = Rules {
        config,
        action_key,
        enter_key,
    };
    log::debug!(
        "adapting layout {:?} (swap: {}, custom action: {})",
        template.name(),
        rules.swapped(),
        rules.action_key.is_some()
    );
    Ok(template.map_keys(|key| rules.rewrite(key)))
}

struct Rules<'a> {
    config: &'a Configuration,
    action_key: Option<KeyValue>,
    /// Set only when enter and action are swapped
    enter_key: Option<KeyValue>,
}

impl Rules<'_> {
    fn swapped(&self) -> bool {
        self.enter_key.is_some()
    }

    fn rewrite(&self, key: &KeyValue) -> Option<KeyValue> {
        match key.event() {
            KeyEvent::SwitchInputMethod => self
                .config
                .should_offer_switch_to_next_input_method
                .then(|| key.clone()),
            KeyEvent::Control(ControlKey::Enter) => match (&self.enter_key, &self.action_key) {
                (Some(_), Some(action)) => Some(action.clone()),
                _ => Some(key.clone()),
            },
            KeyEvent::Editor(EditorAction::Action) => match &self.enter_key {
                Some(enter) => Some(enter.clone()),
                None => self.action_key.clone(),
            },
            _ => self.rewrite_flagged(key),
        }
    }

    fn rewrite_flagged(&self, key: &KeyValue) -> Option<KeyValue> {
        let flags = key.flags();
        if flags.is_empty() {
            return Some(key.clone());
        }
        if flags.contains(Flags::LOCALIZED) && !self.config.allows_localized(key.name()) {
            return None;
        }
        if flags.intersects(self.config.lockable_modifier_mask) {
            return Some(key.with_flags(flags | Flags::LOCK));
        }
        Some(key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CustomAction;
    use crate::layout::{KeyCap, Row};

    fn key(name: &str) -> KeyValue {
        KeyRegistry::global().lookup(name).unwrap()
    }

    fn bottom_row() -> Layout {
        let caps = ["ctrl", "change_method", "space", "action", "enter"]
            .into_iter()
            .map(|n| KeyCap::single(key(n)))
            .collect();
        Layout::new("bottom", vec![Row::new(caps, 1.0)])
    }

    fn names(layout: &Layout) -> Vec<String> {
        layout.keys().map(|k| k.name().to_string()).collect()
    }

    #[test]
    fn test_default_config() {
        let adapted = adapt(&bottom_row(), &Configuration::new()).unwrap();
        // No switch offer, no custom action
        assert_eq!(names(&adapted), vec!["ctrl", "space", "enter"]);
    }

    #[test]
    fn test_custom_action_replaces_placeholder() {
        let config = Configuration::new().with_custom_action(Some(CustomAction::new("Send", 4)));
        let adapted = adapt(&bottom_row(), &config).unwrap();
        let send = adapted.find("Send").unwrap();
        assert_eq!(send.symbol(), "Send");
        assert_eq!(send.event(), KeyEvent::Editor(EditorAction::Action));
        assert_eq!(names(&adapted), vec!["ctrl", "space", "Send", "enter"]);
    }

    #[test]
    fn test_swap_enter_and_action() {
        let config = Configuration::new()
            .with_custom_action(Some(CustomAction::new("Go", 2)))
            .with_swap_enter_and_action(true);
        let adapted = adapt(&bottom_row(), &config).unwrap();
        assert_eq!(names(&adapted), vec!["ctrl", "space", "enter", "Go"]);
    }

    #[test]
    fn test_swap_without_custom_action_is_ignored() {
        let config = Configuration::new().with_swap_enter_and_action(true);
        let adapted = adapt(&bottom_row(), &config).unwrap();
        assert_eq!(names(&adapted), vec!["ctrl", "space", "enter"]);
    }

    #[test]
    fn test_lock_injection() {
        let config = Configuration::new().with_lockable_modifiers(Flags::CTRL);
        let adapted = adapt(&bottom_row(), &config).unwrap();
        assert_eq!(adapted.find("ctrl").unwrap().flags(), Flags::CTRL | Flags::LOCK);
        assert_eq!(adapted.find("space").unwrap(), &key("space"));
    }

    #[test]
    fn test_missing_action_key_in_registry() {
        let config = Configuration::new().with_custom_action(Some(CustomAction::new("Send", 4)));
        let registry = KeyRegistry::new();
        assert_eq!(
            adapt_with(&bottom_row(), &config, &registry),
            Err(KeyError::UnknownKeyName("action".to_string()))
        );
    }
}
