//! Settings for docportal, read from a RON file.
//!
//! A missing file means defaults. Endpoint flags and environment variables
//! override whatever the file says.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use log::LevelFilter;
use portal_engine::{write_atomically, PortalSettings};
use portal_logging::{portal_info, LogDestination};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "docportal.ron";

/// Upper bound for either timeout setting.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search_url: String,
    pub index_url: String,
    pub result_limit: u32,
    pub content_type: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let portal = PortalSettings::default();
        Self {
            search_url: portal.search_url,
            index_url: portal.index_url,
            result_limit: portal.result_limit,
            content_type: portal.content_type,
            connect_timeout_secs: portal.connect_timeout.as_secs(),
            request_timeout_secs: portal.request_timeout.as_secs(),
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn apply_overrides(&mut self, search_url: Option<String>, index_url: Option<String>) {
        if let Some(url) = search_url {
            self.search_url = url;
        }
        if let Some(url) = index_url {
            self.index_url = url;
        }
    }

    pub fn portal_settings(&self) -> PortalSettings {
        PortalSettings {
            search_url: self.search_url.clone(),
            index_url: self.index_url.clone(),
            result_limit: self.result_limit,
            content_type: self.content_type.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    /// Upper bound on how long a one-shot command waits for its answer.
    pub fn response_deadline(&self) -> Duration {
        let secs = self
            .connect_timeout_secs
            .saturating_add(self.request_timeout_secs)
            .saturating_add(5);
        Duration::from_secs(secs)
    }

    fn validate(&self) -> Result<()> {
        for (name, secs) in [
            ("connect_timeout_secs", self.connect_timeout_secs),
            ("request_timeout_secs", self.request_timeout_secs),
        ] {
            if secs == 0 || secs > MAX_TIMEOUT_SECS {
                bail!("{name} must be between 1 and {MAX_TIMEOUT_SECS}, got {secs}");
            }
        }
        self.log.level_filter()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub destination: LogTarget,
    pub level: String,
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            destination: LogTarget::File,
            level: "info".to_string(),
            file: PathBuf::from("docportal.log"),
        }
    }
}

impl LogConfig {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.level)
            .map_err(|_| anyhow!("unknown log level {:?}", self.level))
    }

    /// `verbose` adds terminal output to a file-only setup.
    pub fn destination(&self, verbose: bool) -> LogDestination {
        match (self.destination, verbose) {
            (LogTarget::File, true) => LogDestination::Both,
            (LogTarget::File, false) => LogDestination::File,
            (LogTarget::Terminal, _) => LogDestination::Terminal,
            (LogTarget::Both, _) => LogDestination::Both,
        }
    }

    pub fn install(&self, verbose: bool) -> Result<()> {
        let level = self.level_filter()?;
        portal_logging::initialize(self.destination(verbose), level, &self.file);
        Ok(())
    }
}

pub fn load(path: &Path) -> Result<AppConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    let config: AppConfig =
        ron::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid settings in {}", path.display()))?;
    Ok(config)
}

pub fn write_default(path: &Path, force: bool) -> Result<()> {
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(&AppConfig::default(), pretty)
        .context("failed to serialize default settings")?;
    write_atomically(path, &content, force)
        .with_context(|| format!("failed to write {}", path.display()))?;
    portal_info!("Wrote default settings to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.result_limit, 20);
        assert_eq!(config.content_type, "application/pdf");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docportal.ron");
        fs::write(
            &path,
            r#"(search_url: "http://search.internal/v1/query/documents:search", log: (level: "debug"))"#,
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(
            config.search_url,
            "http://search.internal/v1/query/documents:search"
        );
        assert_eq!(config.index_url, AppConfig::default().index_url);
        assert_eq!(config.log.level_filter().unwrap(), LevelFilter::Debug);
        assert_eq!(config.log.destination, LogTarget::File);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docportal.ron");
        fs::write(&path, "(search_url: 42").unwrap();
        assert!(load(&path).is_err());
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docportal.ron");
        fs::write(&path, r#"(log: (level: "chatty"))"#).unwrap();
        assert!(load(&path).is_err());
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docportal.ron");
        for body in ["(connect_timeout_secs: 0)", "(request_timeout_secs: 0)"] {
            fs::write(&path, body).unwrap();
            assert!(load(&path).is_err(), "{body} was accepted");
        }
    }

    #[test]
    fn oversized_timeouts_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docportal.ron");
        for body in [
            "(request_timeout_secs: 18446744073709551615)",
            "(connect_timeout_secs: 3601)",
        ] {
            fs::write(&path, body).unwrap();
            assert!(load(&path).is_err(), "{body} was accepted");
        }

        fs::write(&path, "(connect_timeout_secs: 3600, request_timeout_secs: 3600)").unwrap();
        assert_eq!(
            load(&path).unwrap().response_deadline(),
            Duration::from_secs(7205)
        );
    }

    #[test]
    fn response_deadline_saturates() {
        let config = AppConfig {
            connect_timeout_secs: u64::MAX,
            request_timeout_secs: u64::MAX,
            ..AppConfig::default()
        };
        assert_eq!(config.response_deadline(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn default_file_round_trips_and_is_not_overwritten() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docportal.ron");

        write_default(&path, false).unwrap();
        assert_eq!(load(&path).unwrap(), AppConfig::default());

        fs::write(&path, r#"(result_limit: 5)"#).unwrap();
        assert!(write_default(&path, false).is_err());
        assert_eq!(load(&path).unwrap().result_limit, 5);

        write_default(&path, true).unwrap();
        assert_eq!(load(&path).unwrap().result_limit, 20);
    }

    #[test]
    fn overrides_replace_endpoints() {
        let mut config = AppConfig::default();
        config.apply_overrides(Some("http://a/search".to_string()), None);

        let settings = config.portal_settings();
        assert_eq!(settings.search_url, "http://a/search");
        assert_eq!(settings.index_url, AppConfig::default().index_url);
        assert_eq!(settings.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn verbose_mirrors_file_logging_to_terminal() {
        let log = LogConfig::default();
        assert_eq!(log.destination(false), LogDestination::File);
        assert_eq!(log.destination(true), LogDestination::Both);
    }
}
