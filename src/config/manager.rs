use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::config::{ConfigError, WizardConfig};

/// Overrides the directory holding `config/config.json`.
pub const HOME_ENV: &str = "WIZARD_CORE_HOME";
const TMP_SUFFIX: &str = "tmp";

/// Loads and saves [`WizardConfig`] as pretty JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Manager rooted at `WIZARD_CORE_HOME`, falling back to the platform
    /// config directory.
    pub fn from_env() -> Self {
        let base = env::var_os(HOME_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_home);
        Self::with_base_dir(&base)
    }

    pub fn with_base_dir(base: &Path) -> Self {
        Self::new(base.join("config").join("config.json"))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads the config file, or returns defaults when there is none.
    pub fn load(&self) -> Result<WizardConfig, ConfigError> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(WizardConfig::default());
        }
        let data = fs::read_to_string(&self.config_path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, config: &WizardConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.config_path);
        write_all(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)?;
        Ok(())
    }
}

fn default_home() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wizard_core")
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_all(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
