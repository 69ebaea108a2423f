//! Scanner configuration with layered resolution using figment.
//!
//! Resolution order (highest priority last):
//! 1. Built-in defaults
//! 2. User config: `~/.config/interceptor-scan/config.toml` (XDG) or platform config dir
//! 3. Project config: `.interceptor-scan.toml`
//! 4. Environment variables: `INTERCEPTOR_SCAN_*`, nested keys split on `__`
//!
//! # Example
//!
//! ```toml
//! [log]
//! scans = true
//! ```
//!
//! `INTERCEPTOR_SCAN_LOG__SCANS=true` reports every scan at info level.
//! Settings only affect diagnostics. What a scan returns does not depend on
//! them, and unknown keys are ignored.

use std::ops::Deref;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Boxed wrapper for figment::Error to reduce Result size on the stack.
#[derive(Debug)]
pub struct ConfigError(Box<figment::Error>);

impl Deref for ConfigError {
    type Target = figment::Error;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&*self.0)
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub log: LogConfig,
}

/// Diagnostic output of the scanner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Report each scan (template hit or discovery) at info level instead
    /// of debug.
    pub scans: bool,
}

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "INTERCEPTOR_SCAN_";

/// Project config file name, resolved against the working directory.
pub const PROJECT_CONFIG: &str = ".interceptor-scan.toml";

impl ScanConfig {
    /// Load config with layered resolution (defaults → user → project → env).
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment()
            .merge(Toml::file(Self::user_config_path()))
            .merge(Toml::file(PROJECT_CONFIG))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Load config from an explicit file layered over defaults and env.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::figment()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(ScanConfig::default()))
    }

    /// User config path: ~/.config/interceptor-scan/config.toml (XDG) or platform config dir.
    fn user_config_path() -> PathBuf {
        // Prefer XDG config location (~/.config) on all platforms
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home
                .join(".config")
                .join("interceptor-scan")
                .join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        // Fall back to platform-specific config dir
        dirs::config_dir()
            .map(|p| p.join("interceptor-scan").join("config.toml"))
            .unwrap_or_default()
    }
}
