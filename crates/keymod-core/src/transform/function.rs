// Keymod Function Layer
// Renaming table applied to keys while Fn is active

use std::collections::HashMap;

use crate::registry::KeyRegistry;
use crate::transform::cache::Resolved;
use crate::{Flags, KeyError, KeyValue};

/// What the Fn layer does to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FnTarget {
    /// Replace by the registry key with this name
    Rename(&'static str),
    /// Hide the key
    Remove,
}

/// Keys hidden unless Fn is active
pub const FN_ONLY_KEYS: &[&str] = &["f11_placeholder", "f12_placeholder"];

/// Fn layer table. Names not listed are left unchanged.
pub const FN_TABLE: &[(&str, FnTarget)] = &[
    ("1", FnTarget::Rename("f1")),
    ("2", FnTarget::Rename("f2")),
    ("3", FnTarget::Rename("f3")),
    ("4", FnTarget::Rename("f4")),
    ("5", FnTarget::Rename("f5")),
    ("6", FnTarget::Rename("f6")),
    ("7", FnTarget::Rename("f7")),
    ("8", FnTarget::Rename("f8")),
    ("9", FnTarget::Rename("f9")),
    ("0", FnTarget::Rename("f10")),
    ("f11_placeholder", FnTarget::Rename("f11")),
    ("f12_placeholder", FnTarget::Rename("f12")),
    ("up", FnTarget::Rename("page_up")),
    ("down", FnTarget::Rename("page_down")),
    ("left", FnTarget::Rename("home")),
    ("right", FnTarget::Rename("end")),
    ("<", FnTarget::Rename("«")),
    (">", FnTarget::Rename("»")),
    ("{", FnTarget::Rename("‹")),
    ("}", FnTarget::Rename("›")),
    ("[", FnTarget::Rename("‘")),
    ("]", FnTarget::Rename("’")),
    ("(", FnTarget::Rename("“")),
    (")", FnTarget::Rename("”")),
    ("'", FnTarget::Rename("‚")),
    ("\"", FnTarget::Rename("„")),
    ("-", FnTarget::Rename("–")),
    ("_", FnTarget::Rename("—")),
    ("^", FnTarget::Rename("¬")),
    ("%", FnTarget::Rename("‰")),
    ("=", FnTarget::Rename("≈")),
    ("esc", FnTarget::Rename("insert")),
    ("$", FnTarget::Rename("€")),
    ("#", FnTarget::Rename("£")),
    ("*", FnTarget::Rename("°")),
    (".", FnTarget::Rename("…")),
    (",", FnTarget::Rename("·")),
    ("!", FnTarget::Rename("¡")),
    ("?", FnTarget::Rename("¿")),
    ("tab", FnTarget::Rename("\\t")),
    // Already reachable through `$` and `#`
    ("€", FnTarget::Remove),
    ("£", FnTarget::Remove),
];

/// Fn layer with every rename target looked up once
#[derive(Debug, Clone)]
pub struct FunctionLayer {
    targets: HashMap<&'static str, Resolved>,
}

impl FunctionLayer {
    /// Resolve every table target against `registry`.
    ///
    /// Fails on the first target the registry does not know.
    pub fn build(registry: &KeyRegistry) -> Result<Self, KeyError> {
        let mut targets = HashMap::with_capacity(FN_TABLE.len());
        for &(name, target) in FN_TABLE {
            let resolved = match target {
                FnTarget::Rename(to) => Resolved::Present(registry.lookup(to)?),
                FnTarget::Remove => Resolved::Absent,
            };
            targets.insert(name, resolved);
        }
        Ok(Self { targets })
    }

    /// Apply the Fn stage to `key` under `flags`
    pub fn apply(&self, key: KeyValue, flags: Flags) -> Resolved {
        if !flags.contains(Flags::FN) {
            if FN_ONLY_KEYS.contains(&key.name()) {
                return Resolved::Absent;
            }
            return Resolved::Present(key);
        }
        match self.targets.get(key.name()) {
            Some(target) => {
                log::trace!("fn layer: {} -> {:?}", key.name(), target);
                target.clone()
            }
            None => Resolved::Present(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> FunctionLayer {
        FunctionLayer::build(KeyRegistry::global()).unwrap()
    }

    fn key(name: &str) -> KeyValue {
        KeyRegistry::global().lookup(name).unwrap()
    }

    #[test]
    fn test_table_names_are_unique() {
        let mut names: Vec<&str> = FN_TABLE.iter().map(|(n, _)| *n).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), FN_TABLE.len());
    }

    #[test]
    fn test_placeholders_removed_without_fn() {
        assert_eq!(layer().apply(key("f11_placeholder"), Flags::empty()), Resolved::Absent);
        assert_eq!(layer().apply(key("f12_placeholder"), Flags::SHIFT), Resolved::Absent);
    }

    #[test]
    fn test_passthrough_without_fn() {
        assert_eq!(
            layer().apply(key("1"), Flags::empty()),
            Resolved::Present(key("1"))
        );
    }

    #[test]
    fn test_renames_with_fn() {
        let l = layer();
        assert_eq!(l.apply(key("1"), Flags::FN), Resolved::Present(key("f1")));
        assert_eq!(l.apply(key("0"), Flags::FN), Resolved::Present(key("f10")));
        assert_eq!(l.apply(key("up"), Flags::FN), Resolved::Present(key("page_up")));
        assert_eq!(l.apply(key("<"), Flags::FN), Resolved::Present(key("«")));
        assert_eq!(l.apply(key("tab"), Flags::FN), Resolved::Present(key("\\t")));
    }

    #[test]
    fn test_currency_removed_with_fn() {
        assert_eq!(layer().apply(key("€"), Flags::FN), Resolved::Absent);
        assert_eq!(layer().apply(key("£"), Flags::FN), Resolved::Absent);
    }

    #[test]
    fn test_build_fails_on_missing_target() {
        let mut registry = KeyRegistry::new();
        registry.insert(KeyValue::char_key('1'));
        assert!(matches!(
            FunctionLayer::build(&registry),
            Err(KeyError::UnknownKeyName(_))
        ));
    }
}
