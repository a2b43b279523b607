//! RON configuration for the binary.
//!
//! Lookup: `--config PATH`, else `<config dir>/research-assistant/config.ron`
//! when it exists, else defaults. CLI flags override file values.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use assistant_engine::DispatchSettings;
use serde::{Deserialize, Serialize};

use super::cli::GlobalArgs;

const APP_DIR: &str = "research-assistant";
const CONFIG_FILENAME: &str = "config.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub data_dir: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let dispatch = DispatchSettings::default();
        Self {
            base_url: dispatch.base_url,
            connect_timeout_secs: dispatch.connect_timeout.as_secs(),
            request_timeout_secs: dispatch.request_timeout.as_secs(),
            data_dir: None,
            export_dir: None,
            log_to_file: true,
        }
    }
}

impl AppConfig {
    /// Loads the config file (if any) and applies the global CLI overrides.
    pub fn resolve(global: &GlobalArgs) -> Result<Self> {
        let mut config = match Self::source_path(global) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(global);
        config.validate()?;
        Ok(config)
    }

    /// The file `resolve` reads: `--config`, else the default location when it exists.
    pub fn source_path(global: &GlobalArgs) -> Option<PathBuf> {
        match &global.config {
            Some(path) => Some(path.clone()),
            None => default_config_path().filter(|path| path.is_file()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_ron(&text).with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn from_ron(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn apply_overrides(&mut self, global: &GlobalArgs) {
        if let Some(base_url) = &global.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(data_dir) = &global.data_dir {
            self.data_dir = Some(data_dir.clone());
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)
            .with_context(|| format!("invalid base_url '{}'", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("base_url must use http or https, got '{}'", url.scheme());
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from(".research-assistant"))
        })
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir().join("assistant.log")
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::from_ron(
            r#"(base_url: "http://127.0.0.1:9090", request_timeout_secs: 45)"#,
        )
        .unwrap();

        assert_eq!(
            config,
            AppConfig {
                base_url: "http://127.0.0.1:9090".to_string(),
                request_timeout_secs: 45,
                ..AppConfig::default()
            }
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.ron");
        fs::write(&path, "(base_url: ").unwrap();

        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let global = GlobalArgs {
            config: Some(PathBuf::from("/nonexistent/research-assistant.ron")),
            ..GlobalArgs::default()
        };
        assert!(AppConfig::resolve(&global).is_err());
    }

    #[test]
    fn explicit_config_is_the_source() {
        let global = GlobalArgs {
            config: Some(PathBuf::from("/etc/research-assistant/alt.ron")),
            ..GlobalArgs::default()
        };
        assert_eq!(
            AppConfig::source_path(&global),
            Some(PathBuf::from("/etc/research-assistant/alt.ron"))
        );
    }

    #[test]
    fn cli_overrides_file_values() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.ron");
        fs::write(&path, r#"(base_url: "http://file.example:8080")"#).unwrap();
        let global = GlobalArgs {
            config: Some(path),
            base_url: Some("http://cli.example:8081".to_string()),
            data_dir: Some(temp.path().join("data")),
            verbose: false,
        };

        let config = AppConfig::resolve(&global).unwrap();

        assert_eq!(config.base_url, "http://cli.example:8081");
        assert_eq!(config.data_dir(), temp.path().join("data"));
        assert_eq!(config.log_file(), temp.path().join("data").join("assistant.log"));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = AppConfig {
            base_url: "ftp://localhost".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            base_url: "localhost:8080/api".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn dispatch_settings_follow_config() {
        let settings = AppConfig::default().dispatch_settings();

        assert_eq!(settings.base_url, "http://localhost:8080");
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
    }
}
