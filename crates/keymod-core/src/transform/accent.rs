// Keymod Accent Composition
// Dead-key composition of a base character with the pending accent selector

use strum_macros::{Display, EnumString};

use crate::Flags;

/// One accent selector (pending dead key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Accent {
    Grave,
    Acute,
    Circumflex,
    Tilde,
    Cedilla,
    Trema,
    Caron,
    Ring,
    Macron,
    Ordinal,
    Superscript,
    Subscript,
    Box,
}

impl Accent {
    /// Map a single accent-selector bit to its accent.
    ///
    /// Anything other than exactly one selector bit yields `None`.
    pub fn from_flags(flags: Flags) -> Option<Self> {
        let accent = match flags {
            f if f == Flags::ACCENT1 => Self::Grave,
            f if f == Flags::ACCENT2 => Self::Acute,
            f if f == Flags::ACCENT3 => Self::Circumflex,
            f if f == Flags::ACCENT4 => Self::Tilde,
            f if f == Flags::ACCENT5 => Self::Cedilla,
            f if f == Flags::ACCENT6 => Self::Trema,
            f if f == Flags::ACCENT_CARON => Self::Caron,
            f if f == Flags::ACCENT_RING => Self::Ring,
            f if f == Flags::ACCENT_MACRON => Self::Macron,
            f if f == Flags::ACCENT_ORDINAL => Self::Ordinal,
            f if f == Flags::ACCENT_SUPERSCRIPT => Self::Superscript,
            f if f == Flags::ACCENT_SUBSCRIPT => Self::Subscript,
            f if f == Flags::ACCENT_BOX => Self::Box,
            _ => return None,
        };
        Some(accent)
    }

    /// The selector bit for this accent
    pub fn flag(self) -> Flags {
        match self {
            Self::Grave => Flags::ACCENT1,
            Self::Acute => Flags::ACCENT2,
            Self::Circumflex => Flags::ACCENT3,
            Self::Tilde => Flags::ACCENT4,
            Self::Cedilla => Flags::ACCENT5,
            Self::Trema => Flags::ACCENT6,
            Self::Caron => Flags::ACCENT_CARON,
            Self::Ring => Flags::ACCENT_RING,
            Self::Macron => Flags::ACCENT_MACRON,
            Self::Ordinal => Flags::ACCENT_ORDINAL,
            Self::Superscript => Flags::ACCENT_SUPERSCRIPT,
            Self::Subscript => Flags::ACCENT_SUBSCRIPT,
            Self::Box => Flags::ACCENT_BOX,
        }
    }

    /// Spacing accent and combining mark used for generic dead-key composition
    fn dead_key(self) -> Option<(char, char)> {
        match self {
            Self::Grave => Some(('\u{02CB}', '\u{0300}')),
            Self::Acute => Some(('\u{00B4}', '\u{0301}')),
            Self::Circumflex => Some(('\u{02C6}', '\u{0302}')),
            Self::Tilde => Some(('\u{02DC}', '\u{0303}')),
            Self::Cedilla => Some(('\u{00B8}', '\u{0327}')),
            Self::Trema => Some(('\u{00A8}', '\u{0308}')),
            Self::Caron => Some(('\u{02C7}', '\u{030C}')),
            Self::Ring => Some(('\u{02DA}', '\u{030A}')),
            Self::Macron => Some(('\u{00AF}', '\u{0304}')),
            Self::Ordinal | Self::Superscript | Self::Subscript | Self::Box => None,
        }
    }
}

/// Compose `base` with `accent`.
///
/// `None` means the pair has no composition; `Some(base)` means the accent
/// leaves the character as is. Callers treat both as "no transformation".
pub fn compose(base: char, accent: Accent) -> Option<char> {
    match accent {
        Accent::Ordinal => Some(ordinal(base)),
        Accent::Superscript => Some(superscript(base)),
        Accent::Subscript => Some(subscript(base)),
        Accent::Box => Some(base),
        Accent::Cedilla => match base {
            'u' => Some('µ'),
            'a' => Some('æ'),
            'o' => Some('œ'),
            _ => dead_char(accent, base),
        },
        _ => dead_char(accent, base),
    }
}

/// Generic dead-key composition.
///
/// Striking the accent twice, or following it with a space, produces the
/// spacing accent itself. Otherwise the combining mark is canonically
/// composed with the base.
fn dead_char(accent: Accent, base: char) -> Option<char> {
    let (spacing, combining) = accent.dead_key()?;
    if base == spacing || base == ' ' {
        return Some(spacing);
    }
    unicode_normalization::char::compose(base, combining)
}

fn ordinal(c: char) -> char {
    match c {
        'a' => 'ª',
        'o' => 'º',
        '1' => 'ª',
        '2' => 'º',
        '3' => 'ⁿ',
        '4' => 'ᵈ',
        '5' => 'ᵉ',
        '6' => 'ʳ',
        '7' => 'ˢ',
        '8' => 'ᵗ',
        '9' => 'ʰ',
        '*' => '°',
        _ => c,
    }
}

fn superscript(c: char) -> char {
    match c {
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '0' => '⁰',
        'i' => 'ⁱ',
        '+' => '⁺',
        '-' => '⁻',
        '=' => '⁼',
        '(' => '⁽',
        ')' => '⁾',
        'n' => 'ⁿ',
        _ => c,
    }
}

fn subscript(c: char) -> char {
    match c {
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '0' => '₀',
        '+' => '₊',
        '-' => '₋',
        '=' => '₌',
        '(' => '₍',
        ')' => '₎',
        'e' => 'ₑ',
        'a' => 'ₐ',
        'x' => 'ₓ',
        'o' => 'ₒ',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_dead_keys() {
        assert_eq!(compose('e', Accent::Grave), Some('è'));
        assert_eq!(compose('e', Accent::Acute), Some('é'));
        assert_eq!(compose('o', Accent::Circumflex), Some('ô'));
        assert_eq!(compose('n', Accent::Tilde), Some('ñ'));
        assert_eq!(compose('c', Accent::Cedilla), Some('ç'));
        assert_eq!(compose('u', Accent::Trema), Some('ü'));
        assert_eq!(compose('s', Accent::Caron), Some('š'));
        assert_eq!(compose('a', Accent::Ring), Some('å'));
        assert_eq!(compose('a', Accent::Macron), Some('ā'));
        assert_eq!(compose('E', Accent::Acute), Some('É'));
    }

    #[test]
    fn test_cedilla_special_cases() {
        assert_eq!(compose('a', Accent::Cedilla), Some('æ'));
        assert_eq!(compose('o', Accent::Cedilla), Some('œ'));
        assert_eq!(compose('u', Accent::Cedilla), Some('µ'));
        // Only lowercase letters are special cased
        assert_eq!(compose('A', Accent::Cedilla), None);
    }

    #[test]
    fn test_undefined_composition() {
        assert_eq!(compose('q', Accent::Grave), None);
        assert_eq!(compose('1', Accent::Caron), None);
    }

    #[test]
    fn test_space_and_repeat_give_spacing_accent() {
        assert_eq!(compose(' ', Accent::Acute), Some('´'));
        assert_eq!(compose('´', Accent::Acute), Some('´'));
        assert_eq!(compose(' ', Accent::Trema), Some('¨'));
    }

    #[test]
    fn test_table_selectors() {
        assert_eq!(compose('2', Accent::Superscript), Some('²'));
        assert_eq!(compose('x', Accent::Subscript), Some('ₓ'));
        assert_eq!(compose('o', Accent::Ordinal), Some('º'));
        assert_eq!(compose('*', Accent::Ordinal), Some('°'));
        // Absent characters are returned unchanged
        assert_eq!(compose('z', Accent::Superscript), Some('z'));
        assert_eq!(compose('z', Accent::Subscript), Some('z'));
        assert_eq!(compose('z', Accent::Ordinal), Some('z'));
        assert_eq!(compose('z', Accent::Box), Some('z'));
    }

    #[test]
    fn test_flag_round_trip() {
        for accent in [Accent::Grave, Accent::Cedilla, Accent::Ring, Accent::Box] {
            assert_eq!(Accent::from_flags(accent.flag()), Some(accent));
        }
        assert_eq!(Accent::from_flags(Flags::empty()), None);
        assert_eq!(Accent::from_flags(Flags::ACCENT1 | Flags::ACCENT6), None);
    }

    #[test]
    fn test_accent_names() {
        assert_eq!("cedilla".parse::<Accent>(), Ok(Accent::Cedilla));
        assert_eq!(Accent::Superscript.to_string(), "superscript");
    }
}
