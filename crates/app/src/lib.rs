//! Salon booking and stock service: settings loading and startup wiring.

pub mod settings;
pub mod startup;

pub use settings::{Settings, SettingsError, SettingsSource};
