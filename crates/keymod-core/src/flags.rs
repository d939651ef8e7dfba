// Keymod Flags
// Modifier and accent-selector bits carried by keys and by the active modifier state

use std::fmt;

use crate::transform::accent::Accent;

bitflags::bitflags! {
    /// Bit set of modifier flags and accent selectors.
    ///
    /// Modifier bits are independent. Accent selectors occupy the contiguous
    /// range [`Flags::ACCENTS`] and are mutually exclusive: a single mask test
    /// tells whether a dead key is pending and which one.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u32 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const FN = 1 << 3;
        const META = 1 << 4;
        /// The key can be locked (sticky) instead of held.
        const LOCK = 1 << 5;
        /// The key belongs to a locale and may be filtered out.
        const LOCALIZED = 1 << 6;

        const ACCENT1 = 1 << 8;
        const ACCENT2 = 1 << 9;
        const ACCENT3 = 1 << 10;
        const ACCENT4 = 1 << 11;
        const ACCENT5 = 1 << 12;
        const ACCENT6 = 1 << 13;
        const ACCENT_CARON = 1 << 14;
        const ACCENT_RING = 1 << 15;
        const ACCENT_MACRON = 1 << 16;
        const ACCENT_ORDINAL = 1 << 17;
        const ACCENT_SUPERSCRIPT = 1 << 18;
        const ACCENT_SUBSCRIPT = 1 << 19;
        const ACCENT_BOX = 1 << 20;

        /// Every accent selector.
        const ACCENTS = 0x1F_FF00;
    }
}

impl Flags {
    /// Only the accent-selector bits of this set
    pub fn accent_bits(self) -> Flags {
        self & Flags::ACCENTS
    }

    /// Whether any accent selector is active
    pub fn has_accent(self) -> bool {
        self.intersects(Flags::ACCENTS)
    }

    /// The active accent selector, if exactly one is set.
    ///
    /// Returns `None` both when no selector is active and when several are.
    pub fn accent(self) -> Option<Accent> {
        Accent::from_flags(self.accent_bits())
    }

    /// Parse a flag by name, ignoring case (`"shift"`, `"ACCENT_CARON"`)
    pub fn from_name_ignore_case(name: &str) -> Option<Flags> {
        Flags::from_name(&name.trim().to_ascii_uppercase())
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let mut first = true;
        for (name, _) in self.iter_names() {
            if name == "ACCENTS" {
                continue;
            }
            if !first {
                write!(f, "+")?;
            }
            write!(f, "{}", name.to_ascii_lowercase())?;
            first = false;
        }
        Ok(())
    }
}
