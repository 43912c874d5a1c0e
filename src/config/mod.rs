//
//  vsts-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Connection defaults for the `vsts` command, stored as TOML.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/vsts/config.toml`
//! - **macOS**: `~/Library/Application Support/com.vsts.vsts/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\vsts\vsts\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! account = "fabrikam"
//! user = "alice@fabrikam.com"
//! default_project = "Fabrikam"
//! ```
//!
//! An on-premises server is configured with `server` (and usually
//! `collection`) instead of `account`. Personal access tokens never go in
//! this file; they live in the system keychain.
//!
//! ## Resolution Order
//!
//! Command-line flags take precedence over the `VSTS_*` environment
//! variables, which take precedence over the file. `account` and `server`
//! are mutually exclusive: the first layer naming either one picks the
//! target, and a layer naming both is rejected.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::session::{Scheme, Session, SessionTarget, DEFAULT_COLLECTION};

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "account",
    "server",
    "collection",
    "user",
    "scheme",
    "default_project",
];

/// Persisted connection defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Hosted account name (`{account}.visualstudio.com`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// On-premises server host, optionally with port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<Scheme>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project: Option<String>,
}

impl Config {
    /// Loads the configuration from the default location, or the empty
    /// configuration when no file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "vsts", "vsts")
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "account" => self.account.clone(),
            "server" => self.server.clone(),
            "collection" => self.collection.clone(),
            "user" => self.user.clone(),
            "scheme" => self.scheme.map(|s| s.to_string()),
            "default_project" => self.default_project.clone(),
            _ => None,
        }
    }

    /// Sets `key`; an empty value clears it.
    ///
    /// Setting `account` clears `server` and vice versa.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = Some(value.trim().to_string()).filter(|v| !v.is_empty());
        match key {
            "account" => {
                if value.is_some() {
                    self.server = None;
                }
                self.account = value;
            }
            "server" => {
                if value.is_some() {
                    self.account = None;
                }
                self.server = value;
            }
            "collection" => self.collection = value,
            "user" => self.user = value,
            "scheme" => {
                self.scheme = value.map(|v| v.parse::<Scheme>()).transpose()?;
            }
            "default_project" => self.default_project = value,
            _ => bail!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Every key with its current value, in [`CONFIG_KEYS`] order.
    pub fn entries(&self) -> Vec<(&'static str, Option<String>)> {
        CONFIG_KEYS.iter().map(|key| (*key, self.get(key))).collect()
    }

    /// Merges command-line and environment overrides over the stored values.
    pub fn connection(&self, overrides: &ConnectionOverrides) -> Result<Connection> {
        let layers = [
            ("on the command line", &overrides.account, &overrides.server),
            (
                "in the environment (VSTS_ACCOUNT, VSTS_SERVER)",
                &overrides.env_account,
                &overrides.env_server,
            ),
            ("in the config file", &self.account, &self.server),
        ];

        let mut target = None;
        for (layer, account, server) in layers {
            if let Some(found) = target_from(layer, account, server)? {
                target = Some(found);
                break;
            }
        }
        let target = target.ok_or_else(|| {
            anyhow!("No account configured. Pass --account or run 'vsts config set account <name>'")
        })?;

        let user = overrides
            .user
            .clone()
            .or_else(|| self.user.clone())
            .ok_or_else(|| {
                anyhow!("No user configured. Pass --user or run 'vsts config set user <name>'")
            })?;

        let collection = overrides
            .collection
            .clone()
            .or_else(|| self.collection.clone())
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

        let scheme = if overrides.http {
            Scheme::Http
        } else {
            self.scheme.unwrap_or_default()
        };

        Ok(Connection {
            target,
            collection,
            user,
            scheme,
            project: overrides
                .project
                .clone()
                .or_else(|| self.default_project.clone()),
        })
    }
}

/// Picks the target named by one layer, if any.
fn target_from(
    layer: &str,
    account: &Option<String>,
    server: &Option<String>,
) -> Result<Option<SessionTarget>> {
    match (account, server) {
        (Some(_), Some(_)) => bail!(
            "Both account and server are set {}. Use one or the other",
            layer
        ),
        (Some(account), None) => Ok(Some(SessionTarget::account(account))),
        (None, Some(server)) => Ok(Some(SessionTarget::server(server))),
        (None, None) => Ok(None),
    }
}

/// Connection values given on the command line or in the environment.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    /// `--account` flag.
    pub account: Option<String>,
    /// `--server` flag.
    pub server: Option<String>,
    /// `VSTS_ACCOUNT`.
    pub env_account: Option<String>,
    /// `VSTS_SERVER`.
    pub env_server: Option<String>,
    pub collection: Option<String>,
    pub user: Option<String>,
    pub http: bool,
    pub project: Option<String>,
}

/// Fully resolved connection settings, minus the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub target: SessionTarget,
    pub collection: String,
    pub user: String,
    pub scheme: Scheme,
    pub project: Option<String>,
}

impl Connection {
    /// Host name used as the keychain key.
    pub fn host(&self) -> String {
        self.target.host()
    }

    pub fn session(&self, token: impl Into<String>) -> Result<Session> {
        let session = Session::new(self.target.clone(), self.user.clone(), token.into())?
            .with_collection(self.collection.clone())
            .with_scheme(self.scheme);
        Ok(session)
    }

    /// The project to operate on, or an error naming the flag to pass.
    pub fn require_project(&self) -> Result<&str> {
        self.project.as_deref().ok_or_else(|| {
            anyhow!("No project given. Pass --project or run 'vsts config set default_project <name>'")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosted() -> Config {
        Config {
            account: Some("fabrikam".to_string()),
            user: Some("alice".to_string()),
            default_project: Some("Fabrikam".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        config.set("account", "fabrikam").unwrap();
        config.set("scheme", "http").unwrap();

        assert_eq!(config.get("account").as_deref(), Some("fabrikam"));
        assert_eq!(config.get("scheme").as_deref(), Some("http"));
        assert_eq!(config.get("nope"), None);
    }

    #[test]
    fn test_set_rejects_unknown_key_and_bad_scheme() {
        let mut config = Config::default();
        assert!(config.set("editor", "vim").is_err());
        assert!(config.set("scheme", "ftp").is_err());
    }

    #[test]
    fn test_set_empty_clears() {
        let mut config = hosted();
        config.set("default_project", "").unwrap();
        assert_eq!(config.default_project, None);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = hosted();
        config.scheme = Some(Scheme::Http);
        config.save_to(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("account = \"fabrikam\""));
        assert!(!text.contains("server"));
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_connection_from_file() {
        let connection = hosted().connection(&ConnectionOverrides::default()).unwrap();

        assert_eq!(connection.target, SessionTarget::account("fabrikam"));
        assert_eq!(connection.collection, DEFAULT_COLLECTION);
        assert_eq!(connection.scheme, Scheme::Https);
        assert_eq!(connection.require_project().unwrap(), "Fabrikam");
        assert_eq!(connection.host(), "fabrikam.visualstudio.com");
    }

    #[test]
    fn test_overrides_win() {
        let overrides = ConnectionOverrides {
            server: Some("tfs.local:8080".to_string()),
            collection: Some("Main".to_string()),
            http: true,
            project: Some("Other".to_string()),
            ..Default::default()
        };
        let mut config = hosted();
        config.account = None;

        let connection = config.connection(&overrides).unwrap();
        assert_eq!(connection.target, SessionTarget::server("tfs.local:8080"));
        assert_eq!(connection.collection, "Main");
        assert_eq!(connection.scheme, Scheme::Http);
        assert_eq!(connection.project.as_deref(), Some("Other"));

        let session = connection.session("pat").unwrap();
        assert_eq!(session.collection_url(), "http://tfs.local:8080/Main");
    }

    #[test]
    fn test_connection_requires_account_and_user() {
        let err = Config::default()
            .connection(&ConnectionOverrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("No account configured"));

        let config = Config {
            account: Some("fabrikam".to_string()),
            ..Default::default()
        };
        let err = config.connection(&ConnectionOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("No user configured"));
    }

    #[test]
    fn test_setting_one_target_clears_the_other() {
        let mut config = hosted();
        config.set("server", "tfs.local:8080").unwrap();
        assert_eq!(config.account, None);
        assert_eq!(config.server.as_deref(), Some("tfs.local:8080"));

        let connection = config.connection(&ConnectionOverrides::default()).unwrap();
        assert_eq!(connection.target, SessionTarget::server("tfs.local:8080"));

        config.set("account", "fabrikam").unwrap();
        assert_eq!(config.server, None);

        config.set("account", "").unwrap();
        assert_eq!(config.account, None);
    }

    #[test]
    fn test_command_line_server_beats_env_and_file_account() {
        let overrides = ConnectionOverrides {
            server: Some("tfs.local:8080".to_string()),
            env_account: Some("acme".to_string()),
            ..Default::default()
        };

        let connection = hosted().connection(&overrides).unwrap();
        assert_eq!(connection.target, SessionTarget::server("tfs.local:8080"));
        assert_eq!(connection.host(), "tfs.local:8080");
    }

    #[test]
    fn test_env_server_beats_file_account() {
        let overrides = ConnectionOverrides {
            env_server: Some("tfs.local".to_string()),
            ..Default::default()
        };

        let connection = hosted().connection(&overrides).unwrap();
        assert_eq!(connection.target, SessionTarget::server("tfs.local"));
    }

    #[test]
    fn test_account_and_server_in_one_layer_rejected() {
        let overrides = ConnectionOverrides {
            account: Some("acme".to_string()),
            server: Some("tfs.local".to_string()),
            ..Default::default()
        };
        let err = hosted().connection(&overrides).unwrap_err();
        assert!(err.to_string().contains("on the command line"));

        let overrides = ConnectionOverrides {
            env_account: Some("acme".to_string()),
            env_server: Some("tfs.local".to_string()),
            ..Default::default()
        };
        let err = hosted().connection(&overrides).unwrap_err();
        assert!(err.to_string().contains("in the environment"));

        let mut config = hosted();
        config.server = Some("tfs.local".to_string());
        let err = config.connection(&ConnectionOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("in the config file"));
    }
}
