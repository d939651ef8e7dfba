// Keymod Core Library
// Modifier resolution and layout adaptation for on-screen keyboards

pub mod config;
pub mod flags;
pub mod key;
pub mod layout;
pub mod registry;
pub mod transform;

#[cfg(feature = "settings")]
pub mod settings;

pub use config::{adapt, adapt_with, Configuration, CustomAction};
pub use flags::Flags;
pub use key::{ControlKey, EditorAction, KeyError, KeyEvent, KeyValue};
pub use layout::{KeyCap, Layout, Row};
pub use registry::KeyRegistry;
pub use transform::{compose, Accent, ResolutionCache, Resolved, Resolver};

#[cfg(feature = "settings")]
pub use settings::{LayoutName, NumericLayout, Settings, SettingsError, Theme};
