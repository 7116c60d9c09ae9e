use serde::{Deserialize, Serialize};

use crate::validation::CriteriaMode;

/// Stores user-configurable wizard preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardConfig {
    #[serde(default)]
    pub criteria_mode: CriteriaMode,
    #[serde(default = "WizardConfig::default_pretty_json")]
    pub pretty_json: bool,
    #[serde(default = "WizardConfig::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub accessibility: AccessibilitySettings,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            criteria_mode: CriteriaMode::default(),
            pretty_json: Self::default_pretty_json(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            accessibility: AccessibilitySettings::default(),
        }
    }
}

impl WizardConfig {
    pub fn default_pretty_json() -> bool {
        true
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilitySettings {
    #[serde(default)]
    pub plain_output: bool,
    #[serde(default)]
    pub high_contrast: bool,
}
