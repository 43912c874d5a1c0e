//
//  vsts-client
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod auth;
mod build;
mod completion;
mod config;
mod policy;
mod project;
mod query;
mod repo;
mod workitem;

pub use api::ApiCommand;
pub use auth::AuthCommand;
pub use build::BuildCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use policy::PolicyCommand;
pub use project::ProjectCommand;
pub use query::QueryCommand;
pub use repo::RepoCommand;
pub use workitem::WorkItemCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::debug;

use crate::api::VstsClient;
use crate::auth::KeyringStore;
use crate::config::{Config, Connection, ConnectionOverrides};
use crate::output::OutputWriter;

#[derive(Parser, Debug)]
#[command(
    name = "vsts",
    version,
    about = "Work with Visual Studio Team Services from the command line",
    long_about = "vsts is a thin client for the Visual Studio Team Services REST API.\n\n\
                  It manages projects, work items, queries, repositories, policies and builds.",
    propagate_version = true,
    after_help = "Use 'vsts <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

const ACCOUNT_ENV: &str = "VSTS_ACCOUNT";
const SERVER_ENV: &str = "VSTS_SERVER";

/// Connection and output flags shared by every command.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Hosted account name ({account}.visualstudio.com) [env: VSTS_ACCOUNT]
    #[arg(long, short = 'a', global = true, conflicts_with = "server")]
    pub account: Option<String>,

    /// On-premises server host, e.g. tfs.example.com:8080 [env: VSTS_SERVER]
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Project collection [default: DefaultCollection]
    #[arg(long, global = true, env = "VSTS_COLLECTION")]
    pub collection: Option<String>,

    /// User name sent with the access token
    #[arg(long, short = 'u', global = true, env = "VSTS_USER")]
    pub user: Option<String>,

    /// Personal access token (overrides the keychain)
    #[arg(long, global = true, env = "VSTS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Use plain HTTP instead of HTTPS
    #[arg(long, global = true)]
    pub http: bool,

    /// Project to operate on
    #[arg(long, short = 'p', global = true, env = "VSTS_PROJECT")]
    pub project: Option<String>,

    /// Output JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

/// No token was supplied and none is stored for the host.
#[derive(Debug, Error)]
#[error("Not logged in to {0}. Run 'vsts auth login' or pass --token.")]
pub struct NotLoggedIn(pub String);

impl GlobalOptions {
    pub fn overrides(&self) -> ConnectionOverrides {
        self.overrides_with_env(|name| std::env::var(name).ok())
    }

    /// `VSTS_ACCOUNT` and `VSTS_SERVER` are read here rather than by clap so
    /// that a `--server` flag can outrank an exported account.
    fn overrides_with_env(&self, env: impl Fn(&str) -> Option<String>) -> ConnectionOverrides {
        let var = |name: &str| env(name).filter(|value| !value.trim().is_empty());
        ConnectionOverrides {
            account: self.account.clone(),
            server: self.server.clone(),
            env_account: var(ACCOUNT_ENV),
            env_server: var(SERVER_ENV),
            collection: self.collection.clone(),
            user: self.user.clone(),
            http: self.http,
            project: self.project.clone(),
        }
    }

    /// Resolves connection settings from flags and the config file.
    pub fn connection(&self) -> Result<Connection> {
        Config::load()?.connection(&self.overrides())
    }

    /// Builds an authenticated client, taking the token from `--token` or
    /// the keychain.
    pub fn client(&self) -> Result<(VstsClient, Connection)> {
        let connection = self.connection()?;
        let host = connection.host();

        let token = match &self.token {
            Some(token) => token.clone(),
            None => KeyringStore::new()
                .get(&host)?
                .ok_or_else(|| NotLoggedIn(host.clone()))?,
        };
        debug!(host = %host, collection = %connection.collection, "Resolved connection");

        let client = VstsClient::new(connection.session(token)?)?;
        Ok((client, connection))
    }

    pub fn output(&self) -> OutputWriter {
        OutputWriter::from_flag(self.json)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store, remove or check access tokens
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Make an authenticated REST request
    Api(ApiCommand),

    /// Manage team projects
    #[command(visible_alias = "proj")]
    Project(ProjectCommand),

    /// View, create, update and query work items
    #[command(name = "workitem", visible_alias = "wi")]
    WorkItem(WorkItemCommand),

    /// Manage saved work item queries
    Query(QueryCommand),

    /// Manage Git repositories
    #[command(visible_alias = "r")]
    Repo(RepoCommand),

    /// Manage branch policies
    Policy(PolicyCommand),

    /// Builds, definitions and artifacts
    Build(BuildCommand),

    /// Read and write configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print the version
    Version,
}

/// Parses `key=value`.
pub(crate) fn parse_key_value(pair: &str) -> Result<(String, String)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => anyhow::bail!("Invalid format: '{}'. Expected key=value", pair),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "vsts",
            "--server",
            "tfs.local:8080",
            "--http",
            "--project",
            "Fabrikam",
            "project",
            "list",
        ])
        .unwrap();

        let overrides = cli.global.overrides();
        assert_eq!(overrides.server.as_deref(), Some("tfs.local:8080"));
        assert!(overrides.http);
        assert_eq!(overrides.project.as_deref(), Some("Fabrikam"));
    }

    #[test]
    fn test_account_and_server_flags_conflict() {
        let err = Cli::try_parse_from([
            "vsts",
            "--account",
            "acme",
            "--server",
            "tfs.local:8080",
            "--user",
            "bob",
            "project",
            "list",
        ])
        .unwrap_err();

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_server_flag_beats_account_env() {
        let cli = Cli::try_parse_from([
            "vsts",
            "--server",
            "tfs.local:8080",
            "--user",
            "bob",
            "project",
            "list",
        ])
        .unwrap();

        let overrides = cli.global.overrides_with_env(|name| match name {
            "VSTS_ACCOUNT" => Some("acme".to_string()),
            _ => None,
        });
        assert_eq!(overrides.env_account.as_deref(), Some("acme"));

        let connection = Config::default().connection(&overrides).unwrap();
        assert_eq!(
            connection.target,
            crate::session::SessionTarget::server("tfs.local:8080")
        );
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("System.Title=Fix it").unwrap(),
            ("System.Title".to_string(), "Fix it".to_string())
        );
        assert_eq!(
            parse_key_value("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }
}
