//! Console configuration.
//!
//! Resolution order, lowest to highest:
//! 1. Built-in defaults
//! 2. `~/.wfadmin/config.yaml` (or the file given with `--config`)
//! 3. Command-line flags and their environment variables
//!
//! # Example config file:
//! ```yaml
//! server_url: https://apim.example.com:9443/api/am/admin/v4
//! token: 0f3c...
//! timeout_secs: 15
//! default_type: user-signup
//! ```

use crate::workflow::types::WorkflowKind;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "https://localhost:9443/api/am/admin/v4";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The file as written on disk. Every field is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    server_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_type: Option<String>,
}

/// Values given on the command line (or via their env variables).
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub server_url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Effective configuration after all layers are applied.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub default_type: WorkflowKind,
    /// Which file contributed, if any
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_type: WorkflowKind::default(),
            source: None,
        }
    }
}

impl Config {
    /// Load configuration. An explicit path must exist; the default path may be absent.
    pub fn load(explicit_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut config = match explicit_path {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                Self::from_file(path)?
            }
            None => {
                let path = default_path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply(overrides)?;
        Ok(config)
    }

    /// Parse a YAML config file on top of the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config = Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse YAML content on top of the defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(content).context("Failed to parse YAML")?
        };

        let mut config = Self::default();
        if let Some(url) = raw.server_url {
            config.server_url = url;
        }
        config.token = raw.token.filter(|t| !t.trim().is_empty());
        if let Some(secs) = raw.timeout_secs {
            config.timeout_secs = secs;
        }
        if let Some(name) = raw.default_type {
            config.default_type = WorkflowKind::from_str_loose(&name)
                .with_context(|| format!("Unknown default_type '{}'", name))?;
        }
        config.validate()?;
        Ok(config)
    }

    fn apply(&mut self, overrides: &Overrides) -> Result<()> {
        if let Some(url) = &overrides.server_url {
            self.server_url = url.clone();
        }
        if let Some(token) = &overrides.token {
            self.token = Some(token.clone());
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout_secs = secs;
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            bail!(
                "server_url must start with http:// or https:// (got '{}')",
                self.server_url
            );
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Render a config file body holding the current values.
    /// The token is written only when `include_token` is set.
    pub fn to_yaml(&self, include_token: bool) -> Result<String> {
        let raw = RawConfig {
            server_url: Some(self.server_url.clone()),
            token: if include_token { self.token.clone() } else { None },
            timeout_secs: Some(self.timeout_secs),
            default_type: Some(self.default_type.wire_name().to_string()),
        };
        serde_yaml::to_string(&raw).context("Failed to serialize config")
    }
}

/// Get the default config file path (~/.wfadmin/config.yaml).
pub fn default_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".wfadmin").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_for_empty_file() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.default_type, WorkflowKind::UserSignup);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_file_values() {
        let yaml = r#"
server_url: http://apim.local:9763/api/am/admin/v4
token: abc
timeout_secs: 5
default_type: api-state
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.server_url, "http://apim.local:9763/api/am/admin/v4");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.default_type, WorkflowKind::ApiStateChange);
    }

    #[test]
    fn test_overrides_win() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "server_url: http://file:1\ntoken: from-file\n").unwrap();

        let overrides = Overrides {
            server_url: Some("http://flag:2".to_string()),
            token: None,
            timeout_secs: Some(7),
        };
        let config = Config::load(Some(&path), &overrides).unwrap();
        assert_eq!(config.server_url, "http://flag:2");
        assert_eq!(config.token.as_deref(), Some("from-file"));
        assert_eq!(config.timeout_secs, 7);
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::from_yaml("timeout_secs: 0").is_err());
        assert!(Config::from_yaml("server_url: ftp://nope").is_err());
        assert!(Config::from_yaml("default_type: bogus").is_err());
        assert!(Config::from_yaml("server_url: [").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.yaml");
        assert!(Config::load(Some(&missing), &Overrides::default()).is_err());
    }

    #[test]
    fn test_yaml_output_hides_token_by_default() {
        let mut config = Config::default();
        config.token = Some("secret".to_string());
        let out = config.to_yaml(false).unwrap();
        assert!(!out.contains("secret"));
        assert!(out.contains("AM_USER_SIGNUP"));
        let reparsed = Config::from_yaml(&config.to_yaml(true).unwrap()).unwrap();
        assert_eq!(reparsed.token.as_deref(), Some("secret"));
    }
}
