//! Roster configuration stored in `roster.toml`.

use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Default config file name, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "roster.toml";

/// Roster configuration (TOML).
///
/// Missing fields default to the values in [`RosterConfig::default`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RosterConfig {
    pub registry: RegistryConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Whether a second registration with an existing email is accepted.
    pub duplicate_emails: DuplicateEmailPolicy,
}

/// Registration policy for emails that are already in the store.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateEmailPolicy {
    /// Accept duplicates; login matches the earliest registration.
    #[default]
    Allow,
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// IP literal the UI server binds to (IPv4 or IPv6, no hostnames).
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

impl ServerConfig {
    /// Listen address built from `bind` and `port`.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(SocketAddr::new(parse_bind(&self.bind)?, self.port))
    }
}

/// Parse a bind address the way the server will use it.
pub fn parse_bind(bind: &str) -> Result<IpAddr> {
    bind.parse::<IpAddr>()
        .map_err(|_| anyhow!("server.bind must be an IP address, got {:?}", bind))
}

impl RosterConfig {
    pub fn validate(&self) -> Result<()> {
        parse_bind(&self.server.bind)?;
        if self.server.port == 0 {
            return Err(anyhow!("server.port must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `RosterConfig::default()`.
pub fn load_config(path: &Path) -> Result<RosterConfig> {
    if !path.exists() {
        let cfg = RosterConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RosterConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &RosterConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, RosterConfig::default());
        assert_eq!(cfg.registry.duplicate_emails, DuplicateEmailPolicy::Allow);
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("roster.toml");
        let mut cfg = RosterConfig::default();
        cfg.registry.duplicate_emails = DuplicateEmailPolicy::Reject;
        cfg.server.port = 8080;
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("roster.toml");
        fs::write(&path, "[registry]\nduplicate_emails = \"reject\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.registry.duplicate_emails, DuplicateEmailPolicy::Reject);
        assert_eq!(cfg.server, ServerConfig::default());
    }

    #[test]
    fn zero_port_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("roster.toml");
        fs::write(&path, "[server]\nport = 0\n").expect("write");
        let err = load_config(&path).expect_err("port 0");
        assert!(format!("{:#}", err).contains("server.port"));
    }

    #[test]
    fn hostname_bind_is_rejected_at_load() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("roster.toml");
        fs::write(&path, "[server]\nbind = \"localhost\"\n").expect("write");
        let err = load_config(&path).expect_err("hostname");
        assert!(format!("{:#}", err).contains("server.bind"));
    }

    #[test]
    fn ipv6_bind_produces_listen_address() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("roster.toml");
        fs::write(&path, "[server]\nbind = \"::1\"\n").expect("write");
        let cfg = load_config(&path).expect("ipv6 literal");
        let addr = cfg.server.socket_addr().expect("socket addr");
        assert_eq!(addr, SocketAddr::new("::1".parse().expect("ip"), 3001));
        assert_eq!(addr.to_string(), "[::1]:3001");
    }

    #[test]
    fn unknown_policy_fails_to_parse() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("roster.toml");
        fs::write(&path, "[registry]\nduplicate_emails = \"maybe\"\n").expect("write");
        assert!(load_config(&path).is_err());
    }
}
