// ⚙️ Settings - persisted theme preference + shell configuration
// Stored as JSON under the platform config dir, overridable from the environment

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_RATES_URL: &str = "https://api.exchangerate-api.com/v4/latest";
pub const DEFAULT_RATES_TIMEOUT_MS: u64 = 3000;
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";

pub const ENV_RATES_URL: &str = "NUMERA_RATES_URL";
pub const ENV_RATES_TIMEOUT_MS: &str = "NUMERA_RATES_TIMEOUT_MS";
pub const ENV_ADDR: &str = "NUMERA_ADDR";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => anyhow::bail!("unknown theme '{}' (expected light or dark)", other),
        }
    }
}

/// Everything the shells read at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    /// Base URL of the live rate service, called as `{url}/{BASE}`
    pub rates_api_url: String,
    pub rates_timeout_ms: u64,
    pub server_addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            theme: Theme::default(),
            rates_api_url: DEFAULT_RATES_URL.to_string(),
            rates_timeout_ms: DEFAULT_RATES_TIMEOUT_MS,
            server_addr: DEFAULT_SERVER_ADDR.to_string(),
        }
    }
}

impl Settings {
    /// `<config_dir>/numera/settings.json`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("numera").join("settings.json"))
    }

    /// Load from the default path, then apply environment overrides.
    ///
    /// A missing file (or platform without a config dir) yields defaults.
    pub fn load() -> Result<Settings> {
        let mut settings = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => Settings::default(),
        };
        settings.apply_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> Result<Settings> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::default_path().context("No configuration directory on this platform")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        tracing::debug!(path = %path.display(), theme = %self.theme, "settings saved");
        Ok(())
    }

    /// Apply `NUMERA_*` overrides; `lookup` is `std::env::var` outside tests.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_RATES_URL).filter(|v| !v.trim().is_empty()) {
            self.rates_api_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup(ENV_RATES_TIMEOUT_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.rates_timeout_ms = ms,
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid {}", ENV_RATES_TIMEOUT_MS),
            }
        }

        if let Some(addr) = lookup(ENV_ADDR).filter(|v| !v.trim().is_empty()) {
            self.server_addr = addr.trim().to_string();
        }
    }
}
