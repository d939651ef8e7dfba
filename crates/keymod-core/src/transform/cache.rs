// Keymod Resolution Cache
// Memoized resolutions partitioned by key name, then by flag bits

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::{Flags, KeyValue};

/// Outcome of resolving a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Present(KeyValue),
    /// The key is hidden under these flags
    Absent,
}

impl Resolved {
    pub fn into_option(self) -> Option<KeyValue> {
        match self {
            Resolved::Present(key) => Some(key),
            Resolved::Absent => None,
        }
    }

    pub fn as_option(&self) -> Option<&KeyValue> {
        match self {
            Resolved::Present(key) => Some(key),
            Resolved::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Resolved::Absent)
    }
}

impl From<Option<KeyValue>> for Resolved {
    fn from(key: Option<KeyValue>) -> Self {
        match key {
            Some(key) => Resolved::Present(key),
            None => Resolved::Absent,
        }
    }
}

/// Two-level cache: key name -> flag bits -> resolution.
///
/// Entries are written once and never replaced. Resolution is a pure
/// function of (name, flags), so nothing is ever invalidated.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: RwLock<HashMap<String, HashMap<u32, Resolved>>>,
}

impl ResolutionCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a resolution
    pub fn get(&self, name: &str, flags: Flags) -> Option<Resolved> {
        self.entries
            .read()
            .get(name)
            .and_then(|inner| inner.get(&flags.bits()))
            .cloned()
    }

    /// Store a resolution unless one is already present.
    ///
    /// Returns the stored value, so concurrent callers computing the same
    /// entry all observe the first write.
    pub fn insert(&self, name: &str, flags: Flags, resolved: Resolved) -> Resolved {
        let mut entries = self.entries.write();
        entries
            .entry(name.to_string())
            .or_default()
            .entry(flags.bits())
            .or_insert(resolved)
            .clone()
    }

    /// Whether a resolution for (name, flags) is cached
    pub fn contains(&self, name: &str, flags: Flags) -> bool {
        self.entries
            .read()
            .get(name)
            .is_some_and(|inner| inner.contains_key(&flags.bits()))
    }

    /// Number of cached (name, flags) pairs
    pub fn len(&self) -> usize {
        self.entries.read().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct key names
    pub fn partitions(&self) -> usize {
        self.entries.read().len()
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
