use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context};
use serde::Deserialize;
use tracing::Level;

use crate::util::repository_address::RepositoryAddress;

/// Configuration of the resolution server, read from a JSON file. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    /// root of the repository to resolve from, e.g. "https://repo1.maven.org/maven2"
    pub repository_url: String,
    /// one of "trace", "debug", "info", "warn", "error"
    pub log_level: String,
    pub request_timeout_secs: u64,
    /// maximum number of resolutions in flight; more requests are rejected
    pub concurrency_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            repository_url: "https://repo1.maven.org/maven2".to_string(),
            log_level: "info".to_string(),
            request_timeout_secs: 30,
            concurrency_limit: 64,
        }
    }
}

impl ServerConfig {
    /// defaults if there is no config file
    pub fn load(path: Option<&Path>) -> anyhow::Result<ServerConfig> {
        match path {
            None => Ok(ServerConfig::default()),
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                ServerConfig::from_json(&json)
                    .with_context(|| format!("parsing config file {}", path.display()))
            }
        }
    }

    pub fn from_json(json: &str) -> anyhow::Result<ServerConfig> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn log_level(&self) -> anyhow::Result<Level> {
        Level::from_str(&self.log_level)
            .map_err(|_| anyhow!("invalid log level {:?}", self.log_level))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn repository_address(&self) -> anyhow::Result<RepositoryAddress> {
        RepositoryAddress::parse(&self.repository_url)
            .with_context(|| format!("invalid repository URL {:?}", self.repository_url))
    }
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(ServerConfig::from_json("{}").unwrap(), ServerConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = ServerConfig::from_json(r#"{
            "bind_address": "0.0.0.0:8080",
            "repository_url": "file:///var/maven/repository",
            "request_timeout_secs": 5
        }"#).unwrap();

        assert_eq!(config.bind_address, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(config.repository_url, "file:///var/maven/repository");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.concurrency_limit, 64);
    }

    #[rstest]
    #[case::unknown_field(r#"{"repository": "https://repo1.maven.org/maven2"}"#)]
    #[case::bad_address(r#"{"bind_address": "localhost"}"#)]
    #[case::bad_type(r#"{"concurrency_limit": "many"}"#)]
    #[case::not_json("bind_address = 1")]
    fn test_invalid_json(#[case] json: &str) {
        assert!(ServerConfig::from_json(json).is_err());
    }

    #[rstest]
    #[case::lower("debug", Level::DEBUG)]
    #[case::upper("WARN", Level::WARN)]
    #[case::trace("trace", Level::TRACE)]
    fn test_log_level(#[case] log_level: &str, #[case] expected: Level) {
        let config = ServerConfig {
            log_level: log_level.to_string(),
            ..Default::default()
        };
        assert_eq!(config.log_level().unwrap(), expected);
    }

    #[test]
    fn test_invalid_log_level() {
        let config = ServerConfig {
            log_level: "verbose".to_string(),
            ..Default::default()
        };
        assert!(config.log_level().is_err());
    }

    #[test]
    fn test_repository_address() {
        let address = ServerConfig::default().repository_address().unwrap();

        assert_eq!(address.protocol(), "https");
        assert_eq!(address.host(), "repo1.maven.org");
        assert_eq!(address.base_path(), "/maven2");
    }

    #[test]
    fn test_invalid_repository_address() {
        let config = ServerConfig {
            repository_url: "repo1.maven.org/maven2".to_string(),
            ..Default::default()
        };
        assert!(config.repository_address().is_err());
    }

    #[test]
    fn test_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"log_level": "debug"}"#).unwrap();

        let config = ServerConfig::load(Some(&path)).unwrap();

        assert_eq!(config.log_level().unwrap(), Level::DEBUG);
        assert_eq!(ServerConfig::load(None).unwrap(), ServerConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(ServerConfig::load(Some(&dir.path().join("missing.json"))).is_err());
    }
}
