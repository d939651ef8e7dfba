// Keymod Config API
// Runtime configuration and the layout adaptation pass driven by it

pub mod adapt;
pub mod configuration;

pub use adapt::{adapt, adapt_with};
pub use configuration::{Configuration, CustomAction};
