//! Configuration loading (SPEC_FULL.md §P).
//!
//! Grounded on `internal/app/app.go`'s `endpointsFileConfigurationV0` in
//! `original_source`, which loads a single `local-address` field via
//! `BurntSushi/toml`. Adds `upstream-address`, `mode`, and
//! `tcp-local-address` — fields the distilled spec dropped but the
//! original source's (unused) forwarder and TCP endpoint motivate.

use std::path::Path;

use serde::Deserialize;

use crate::server::{DEFAULT_ADDR, DEFAULT_UPSTREAM};

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(rename = "local-address", default = "default_local_address")]
    pub local_address: String,

    #[serde(rename = "upstream-address", default = "default_upstream_address")]
    pub upstream_address: String,

    #[serde(default = "default_mode")]
    pub mode: Mode,

    #[serde(rename = "tcp-local-address", default)]
    pub tcp_local_address: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Iterative,
    Forward,
}

fn default_local_address() -> String {
    DEFAULT_ADDR.to_string()
}

fn default_upstream_address() -> String {
    DEFAULT_UPSTREAM.to_string()
}

fn default_mode() -> Mode {
    Mode::Iterative
}

impl Default for Config {
    fn default() -> Self {
        Self {
            local_address: default_local_address(),
            upstream_address: default_upstream_address(),
            mode: default_mode(),
            tcp_local_address: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        toml::from_str(&text).map_err(ConfigError::Parse)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Io(String, #[source] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Config::default();
        assert_eq!(cfg.mode, Mode::Iterative);
        assert_eq!(cfg.upstream_address, "1.1.1.1:53");
    }

    #[test]
    fn parses_minimal_toml() {
        let cfg: Config = toml::from_str(r#"local-address = "127.0.0.1:5300""#).unwrap();
        assert_eq!(cfg.local_address, "127.0.0.1:5300");
        assert_eq!(cfg.mode, Mode::Iterative);
    }

    #[test]
    fn parses_forward_mode_with_upstream() {
        let cfg: Config = toml::from_str(
            r#"
            local-address = "127.0.0.1:53"
            mode = "forward"
            upstream-address = "9.9.9.9:53"
            tcp-local-address = "127.0.0.1:53"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.mode, Mode::Forward);
        assert_eq!(cfg.upstream_address, "9.9.9.9:53");
        assert_eq!(cfg.tcp_local_address.as_deref(), Some("127.0.0.1:53"));
    }
}
