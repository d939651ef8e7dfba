// Keymod Settings Module
// Persisted user preferences and their translation into a Configuration

#![cfg(feature = "settings")]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use strum_macros::{Display, EnumString};

use crate::config::Configuration;
use crate::Flags;

/// Keyboard layout selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum LayoutName {
    /// Follow the system locale
    #[default]
    System,
    Azerty,
    #[strum(serialize = "bgph1")]
    Bgph1,
    Dvorak,
    QwertyEs,
    QwertyLv,
    QwertyPt,
    Qwerty,
    #[strum(serialize = "qwerty2")]
    Qwerty2,
    #[strum(serialize = "qwerty3")]
    Qwerty3,
    #[strum(serialize = "qwerty4")]
    Qwerty4,
    #[strum(serialize = "qwerty5")]
    Qwerty5,
    #[strum(serialize = "qwerty6")]
    Qwerty6,
    #[strum(serialize = "qwerty7")]
    Qwerty7,
    #[strum(serialize = "qwerty8")]
    Qwerty8,
    #[strum(serialize = "qwerty9")]
    Qwerty9,
    QwertySvSe,
    Qwertz,
    RuJcuken,
}

/// Numeric pane shown next to a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum NumericLayout {
    Numeric,
    #[strum(serialize = "numeric2")]
    Numeric2,
    #[strum(serialize = "numeric3")]
    Numeric3,
    #[strum(serialize = "numeric4")]
    Numeric4,
    #[strum(serialize = "numeric5")]
    Numeric5,
    #[strum(serialize = "numeric6")]
    Numeric6,
    #[strum(serialize = "numeric7")]
    Numeric7,
    #[strum(serialize = "numeric8")]
    Numeric8,
    #[strum(serialize = "numeric9")]
    Numeric9,
}

impl LayoutName {
    /// Parse a layout name, falling back to [`LayoutName::System`]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::warn!("unknown layout {:?}, using the system layout", name);
            Self::System
        })
    }

    /// Numeric pane paired with this layout; `None` for the system layout
    pub fn numeric(self) -> Option<NumericLayout> {
        let numeric = match self {
            Self::System => return None,
            Self::Qwerty2 => NumericLayout::Numeric2,
            Self::Qwerty3 => NumericLayout::Numeric3,
            Self::Qwerty4 => NumericLayout::Numeric4,
            Self::Qwerty5 => NumericLayout::Numeric5,
            Self::Qwerty6 => NumericLayout::Numeric6,
            Self::Qwerty7 => NumericLayout::Numeric7,
            Self::Qwerty8 => NumericLayout::Numeric8,
            Self::Qwerty9 => NumericLayout::Numeric9,
            Self::Azerty
            | Self::Bgph1
            | Self::Dvorak
            | Self::QwertyEs
            | Self::QwertyLv
            | Self::QwertyPt
            | Self::Qwerty
            | Self::QwertySvSe
            | Self::Qwertz
            | Self::RuJcuken => NumericLayout::Numeric,
        };
        Some(numeric)
    }
}

/// Colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    Black,
    /// Follow the system night mode
    #[default]
    System,
}

impl Theme {
    /// Parse a theme name, falling back to [`Theme::System`]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            if !name.is_empty() {
                log::warn!("unknown theme {:?}, following the system", name);
            }
            Self::System
        })
    }

    /// Concrete theme given the host's night mode
    pub fn resolve(self, night_mode: bool) -> Theme {
        match self {
            Self::System if night_mode => Self::Dark,
            Self::System => Self::Light,
            theme => theme,
        }
    }
}

/// Lockable modifier preferences and the flag each one controls
const LOCKABLE_PREFS: &[(&str, Flags)] = &[
    ("lockable_shift", Flags::SHIFT),
    ("lockable_ctrl", Flags::CTRL),
    ("lockable_alt", Flags::ALT),
    ("lockable_fn", Flags::FN),
    ("lockable_meta", Flags::META),
    ("lockable_sup", Flags::ACCENT_SUPERSCRIPT),
    ("lockable_sub", Flags::ACCENT_SUBSCRIPT),
    ("lockable_box", Flags::ACCENT_BOX),
];

/// Persisted user preferences.
///
/// Loaded from a TOML file (default: ~/.config/keymod/settings.toml).
/// Session-dependent parts of the [`Configuration`] are supplied by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    layout: LayoutName,
    theme: Theme,
    lockable_modifiers: Flags,
    /// `None` keeps every localized key
    extra_keys: Option<HashSet<String>>,
    /// Path to the settings file (for reload)
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    #[serde(default)]
    layout: Option<NamedSection>,

    #[serde(default)]
    theme: Option<NamedSection>,

    #[serde(default)]
    modifiers: Option<HashMap<String, toml::Value>>,

    #[serde(default)]
    keys: Option<KeysSection>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct NamedSection {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct KeysSection {
    #[serde(default)]
    extra: Option<Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Create settings with every default applied
    pub fn new() -> Self {
        Self {
            layout: LayoutName::System,
            theme: Theme::System,
            lockable_modifiers: Flags::SHIFT,
            extra_keys: None,
            source_path: None,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(name) = toml_settings.layout.and_then(|s| s.name) {
            settings.layout = LayoutName::from_name(&name);
        }

        if let Some(name) = toml_settings.theme.and_then(|s| s.name) {
            settings.theme = Theme::from_name(&name);
        }

        if let Some(modifiers) = toml_settings.modifiers {
            for (key, value) in modifiers {
                let Some(&(_, flag)) = LOCKABLE_PREFS.iter().find(|(pref, _)| *pref == key) else {
                    log::warn!("ignoring unknown modifier setting {:?}", key);
                    continue;
                };
                settings.lockable_modifiers.set(flag, parse_bool_value(&value)?);
            }
        }

        if let Some(keys) = toml_settings.keys {
            settings.extra_keys = keys.extra.map(|extra| extra.into_iter().collect());
        }

        log::debug!(
            "settings loaded: layout {}, theme {}, lockable {}",
            settings.layout,
            settings.theme,
            settings.lockable_modifiers
        );
        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("keymod").join("settings.toml"))
    }

    /// Load from default location (~/.config/keymod/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        // Return default settings if file doesn't exist
        Ok(Self::new())
    }

    /// Reload settings from the original file
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        if let Some(ref path) = self.source_path {
            let new_settings = Self::from_file(path)?;
            *self = new_settings;
            Ok(())
        } else {
            Err(SettingsError::InvalidValue("No source path set".to_string()))
        }
    }

    pub fn layout(&self) -> LayoutName {
        self.layout
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Mask of modifiers configured as sticky locks
    pub fn lockable_modifiers(&self) -> Flags {
        self.lockable_modifiers
    }

    pub fn extra_keys(&self) -> Option<&HashSet<String>> {
        self.extra_keys.as_ref()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Configuration carrying the persisted preferences.
    ///
    /// The session fields (switch offer, custom action, swap) are left off.
    pub fn to_configuration(&self) -> Configuration {
        Configuration {
            extra_keys: self.extra_keys.clone(),
            lockable_modifier_mask: self.lockable_modifiers,
            ..Configuration::default()
        }
    }
}

/// Parse a TOML value as a boolean
fn parse_bool_value(value: &toml::Value) -> Result<bool, SettingsError> {
    match value {
        toml::Value::Boolean(b) => Ok(*b),
        toml::Value::Integer(1) => Ok(true),
        toml::Value::Integer(0) => Ok(false),
        toml::Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(SettingsError::InvalidValue(format!(
                "Cannot convert '{}' to boolean",
                s
            ))),
        },
        _ => Err(SettingsError::InvalidValue(format!(
            "Cannot convert {:?} to boolean",
            value
        ))),
    }
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Keymod Settings
# Place this file at: ~/.config/keymod/settings.toml

[layout]
# system, azerty, bgph1, dvorak, qwerty, qwerty2 ... qwerty9,
# qwerty_es, qwerty_lv, qwerty_pt, qwerty_sv_se, qwertz, ru_jcuken
name = "system"

[theme]
# light, dark, black, system
name = "system"

[modifiers]
# Modifiers that stay active until pressed again
lockable_shift = true
lockable_ctrl = false
lockable_alt = false
lockable_fn = false
lockable_meta = false
lockable_sup = false
lockable_sub = false
lockable_box = false

[keys]
# Localized keys to show; remove to show every localized key
# extra = ["ü", "ö", "ä", "ß"]
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::new();
        assert_eq!(settings.layout(), LayoutName::System);
        assert_eq!(settings.theme(), Theme::System);
        assert_eq!(settings.lockable_modifiers(), Flags::SHIFT);
        assert!(settings.extra_keys().is_none());
    }

    #[test]
    fn test_default_content_parses_to_defaults() {
        let settings = Settings::from_toml(default_settings_content()).unwrap();
        assert_eq!(settings, Settings::new());
    }

    #[test]
    fn test_settings_from_toml() {
        let toml = r#"
[layout]
name = "qwerty_sv_se"

[theme]
name = "black"

[modifiers]
lockable_shift = false
lockable_ctrl = true
lockable_sup = "yes"

[keys]
extra = ["ü", "ß"]
"#;

        let settings = Settings::from_toml(toml).unwrap();
        assert_eq!(settings.layout(), LayoutName::QwertySvSe);
        assert_eq!(settings.theme(), Theme::Black);
        assert_eq!(
            settings.lockable_modifiers(),
            Flags::CTRL | Flags::ACCENT_SUPERSCRIPT
        );
        let extra = settings.extra_keys().unwrap();
        assert!(extra.contains("ü") && extra.contains("ß"));
    }

    #[test]
    fn test_invalid_bool() {
        let toml = r#"
[modifiers]
lockable_alt = "maybe"
"#;
        assert!(matches!(
            Settings::from_toml(toml),
            Err(SettingsError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let toml = r#"
[layout]
name = "colemak"

[theme]
name = "neon"

[modifiers]
lockable_hyper = true
"#;
        let settings = Settings::from_toml(toml).unwrap();
        assert_eq!(settings.layout(), LayoutName::System);
        assert_eq!(settings.theme(), Theme::System);
        assert_eq!(settings.lockable_modifiers(), Flags::SHIFT);
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(matches!(
            Settings::from_toml("[vibration]\nenabled = true\n"),
            Err(SettingsError::TomlParse(_))
        ));
    }

    #[test]
    fn test_layout_names() {
        assert_eq!(LayoutName::from_name("bgph1"), LayoutName::Bgph1);
        assert_eq!(LayoutName::from_name("qwerty7"), LayoutName::Qwerty7);
        assert_eq!(LayoutName::from_name("ru_jcuken"), LayoutName::RuJcuken);
        assert_eq!(LayoutName::Qwerty4.to_string(), "qwerty4");
    }

    #[test]
    fn test_numeric_companion() {
        assert_eq!(LayoutName::System.numeric(), None);
        assert_eq!(LayoutName::Azerty.numeric(), Some(NumericLayout::Numeric));
        assert_eq!(LayoutName::Qwerty3.numeric(), Some(NumericLayout::Numeric3));
        assert_eq!(NumericLayout::Numeric9.to_string(), "numeric9");
    }

    #[test]
    fn test_theme_resolve() {
        assert_eq!(Theme::System.resolve(true), Theme::Dark);
        assert_eq!(Theme::System.resolve(false), Theme::Light);
        assert_eq!(Theme::Black.resolve(false), Theme::Black);
        assert_eq!(Theme::from_name(""), Theme::System);
    }

    #[test]
    fn test_to_configuration() {
        let settings = Settings::from_toml("[keys]\nextra = [\"ö\"]\n").unwrap();
        let config = settings.to_configuration();
        assert_eq!(config.lockable_modifier_mask, Flags::SHIFT);
        assert!(config.allows_localized("ö"));
        assert!(!config.allows_localized("ü"));
        assert!(!config.should_offer_switch_to_next_input_method);
        assert!(config.custom_action.is_none());
    }

    #[test]
    fn test_reload_without_path() {
        let mut settings = Settings::new();
        assert!(matches!(
            settings.reload(),
            Err(SettingsError::InvalidValue(_))
        ));
    }
}
