// Keymod Layout Tree
// Rows of key caps, each cap holding up to five key slots

use crate::KeyValue;

/// Number of slots on a key cap: the centre plus four corners
pub const SLOTS: usize = 5;

/// One key on the grid.
///
/// Slot 0 is the centre, slots 1 to 4 the corners reached by swiping.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyCap {
    slots: [Option<KeyValue>; SLOTS],
    width: f32,
    shift: f32,
}

impl KeyCap {
    pub fn new(slots: [Option<KeyValue>; SLOTS], width: f32, shift: f32) -> Self {
        Self { slots, width, shift }
    }

    /// A unit-width cap with only a centre key
    pub fn single(key: KeyValue) -> Self {
        Self::new([Some(key), None, None, None, None], 1.0, 0.0)
    }

    pub fn slots(&self) -> &[Option<KeyValue>; SLOTS] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&KeyValue> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Horizontal offset before the cap, in key widths
    pub fn shift(&self) -> f32 {
        self.shift
    }

    fn map_keys<F>(&self, f: &mut F) -> Self
    where
        F: FnMut(&KeyValue) -> Option<KeyValue>,
    {
        let slots = self.slots.each_ref().map(|slot| slot.as_ref().and_then(&mut *f));
        Self { slots, ..*self }
    }
}

/// A horizontal row of key caps
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    keys: Vec<KeyCap>,
    height: f32,
}

impl Row {
    pub fn new(keys: Vec<KeyCap>, height: f32) -> Self {
        Self { keys, height }
    }

    pub fn keys(&self) -> &[KeyCap] {
        &self.keys
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    fn map_keys<F>(&self, f: &mut F) -> Self
    where
        F: FnMut(&KeyValue) -> Option<KeyValue>,
    {
        Self {
            keys: self.keys.iter().map(|cap| cap.map_keys(&mut *f)).collect(),
            height: self.height,
        }
    }
}

/// A complete layout template or adapted layout
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    name: String,
    rows: Vec<Row>,
}

impl Layout {
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Build a new layout by rewriting every filled slot.
    ///
    /// Empty slots stay empty; `f` returning `None` empties the slot. The
    /// receiver is left untouched.
    pub fn map_keys<F>(&self, mut f: F) -> Layout
    where
        F: FnMut(&KeyValue) -> Option<KeyValue>,
    {
        Layout {
            name: self.name.clone(),
            rows: self.rows.iter().map(|row| row.map_keys(&mut f)).collect(),
        }
    }

    /// Every filled slot, row by row
    pub fn keys(&self) -> impl Iterator<Item = &KeyValue> {
        self.rows
            .iter()
            .flat_map(|row| row.keys.iter())
            .flat_map(|cap| cap.slots.iter().flatten())
    }

    /// Find the first filled slot named `name`
    pub fn find(&self, name: &str) -> Option<&KeyValue> {
        self.keys().find(|k| k.name() == name)
    }
}
