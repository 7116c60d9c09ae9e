//! User preferences for the wizard front-end.
//!
//! Owns the [`WizardConfig`] model plus the JSON persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{AccessibilitySettings, WizardConfig};
