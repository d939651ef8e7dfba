// Keymod Modifier Resolution Engine
// Turns a base key and the active flag set into the effective key
//
// Stages run in a fixed order:
// - Fn layer (renames, hides placeholders)
// - Shift (upper-cases the character)
// - Accent (composes with the pending dead key)
//
// Results are memoized per (key name, flags).

use std::sync::Arc;

use crate::registry::KeyRegistry;
use crate::transform::accent;
use crate::transform::cache::{ResolutionCache, Resolved};
use crate::transform::function::FunctionLayer;
use crate::{Flags, KeyError, KeyValue};

/// Modifier resolution engine owning its cache
#[derive(Debug)]
pub struct Resolver {
    registry: Arc<KeyRegistry>,
    function_layer: FunctionLayer,
    cache: ResolutionCache,
}

impl Resolver {
    /// Create a resolver over the global registry
    pub fn new() -> Result<Self, KeyError> {
        Self::with_registry(KeyRegistry::shared())
    }

    /// Create a resolver over `registry`.
    ///
    /// Fails if the registry lacks a key the Fn layer maps to.
    pub fn with_registry(registry: Arc<KeyRegistry>) -> Result<Self, KeyError> {
        let function_layer = FunctionLayer::build(&registry)?;
        Ok(Self {
            registry,
            function_layer,
            cache: ResolutionCache::new(),
        })
    }

    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// Drop every memoized resolution
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Resolve `key` under the active `flags`.
    ///
    /// `None` in gives `None` out without touching the cache. A key hidden by
    /// the active flags also resolves to `None`.
    pub fn resolve(&self, key: Option<&KeyValue>, flags: Flags) -> Option<KeyValue> {
        let key = key?;
        if let Some(hit) = self.cache.get(key.name(), flags) {
            return hit.into_option();
        }
        log::debug!("resolve miss: {} [{}]", key.name(), flags);
        let computed = self.compute(key.clone(), flags);
        self.cache.insert(key.name(), flags, computed).into_option()
    }

    /// Look `name` up in the registry, then resolve it
    pub fn resolve_name(&self, name: &str, flags: Flags) -> Result<Option<KeyValue>, KeyError> {
        let key = self.registry.lookup(name)?;
        Ok(self.resolve(Some(&key), flags))
    }

    fn compute(&self, key: KeyValue, flags: Flags) -> Resolved {
        let key = match self.function_layer.apply(key, flags) {
            Resolved::Present(key) => key,
            Resolved::Absent => return Resolved::Absent,
        };
        let key = apply_shift(key, flags);
        let key = apply_accent(key, flags);
        Resolved::Present(key)
    }
}

/// Upper-case the character when Shift is active.
///
/// Characters whose upper case is several chars (`ß`) are left alone.
fn apply_shift(key: KeyValue, flags: Flags) -> KeyValue {
    if !flags.contains(Flags::SHIFT) {
        return key;
    }
    let Some(c) = key.character() else {
        return key;
    };
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if u != c => {
            log::trace!("shift: {} -> {}", c, u);
            key.with_char_and_symbol(u)
        }
        _ => key,
    }
}

/// Compose the character with the single active accent selector
fn apply_accent(key: KeyValue, flags: Flags) -> KeyValue {
    let Some(c) = key.character() else {
        return key;
    };
    if !flags.has_accent() {
        return key;
    }
    let Some(selected) = flags.accent() else {
        log::warn!(
            "several accent selectors active ({}), leaving {:?} as is",
            flags.accent_bits(),
            key.name()
        );
        return key;
    };
    match accent::compose(c, selected) {
        Some(composed) if composed != c => {
            log::trace!("accent {}: {} -> {}", selected, c, composed);
            key.with_char_and_symbol(composed)
        }
        _ => key,
    }
}
