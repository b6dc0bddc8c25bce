//! Configuration management for gitdesk.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::UserInfo;

/// Gitdesk configuration loaded from .git/gitdesk/config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Authorship overrides, ahead of git config in the fallback chain.
    #[serde(default)]
    pub user: UserConfig,
}

impl Config {
    /// Load config from a TOML file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if the file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to a TOML file.
    ///
    /// # Errors
    /// Returns error if serialization or write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| std::io::Error::other(e.to_string()))?;
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply the `[user]` overrides on top of git-config-resolved
    /// authorship.
    #[must_use]
    pub fn resolve_user(&self, resolved: UserInfo) -> UserInfo {
        UserInfo {
            name: self.user.name.clone().unwrap_or(resolved.name),
            email: self.user.email.clone().unwrap_or(resolved.email),
        }
    }
}

/// General gitdesk settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default remote for pull and push.
    #[serde(default = "default_remote")]
    pub default_remote: String,

    /// Default number of commits shown by the history walk.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_remote: default_remote(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_remote() -> String {
    "origin".into()
}

const fn default_history_limit() -> usize {
    50
}

/// Commit authorship overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    /// Author name override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Author email override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
