//
//  vsts-client
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Commands
//!
//! Personal access tokens are kept in the system keychain, one per host.
//!
//! ```bash
//! vsts auth login --account fabrikam --user alice
//! echo "$PAT" | vsts auth login --with-token
//! vsts auth status
//! vsts auth logout
//! ```

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use dialoguer::Password;

use crate::api::VstsClient;
use crate::auth::{read_token_from_stdin, validate_token, KeyringStore};
use crate::config::{Config, Connection};
use crate::session::SessionTarget;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Store a personal access token for the configured host
    Login(LoginArgs),

    /// Remove the stored token
    Logout,

    /// Check that the stored token is accepted
    Status,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Read the token from standard input
    #[arg(long)]
    pub with_token: bool,

    /// Store the token without checking it against the server
    #[arg(long)]
    pub no_verify: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global).await,
            AuthSubcommand::Logout => logout(global),
            AuthSubcommand::Status => status(global).await,
        }
    }
}

async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let connection = global.connection()?;
    let host = connection.host();
    let out = global.output();

    let token = match &global.token {
        Some(token) => token.clone(),
        None if args.with_token => read_token_from_stdin()?,
        None => Password::new()
            .with_prompt(format!("Personal access token for {}", host))
            .interact()?,
    };

    if !validate_token(&token) {
        bail!("Invalid token format");
    }

    if !args.no_verify {
        let client = VstsClient::new(connection.session(token.clone())?)?;
        client
            .list_projects()
            .await
            .with_context(|| format!("The token was not accepted by {}", host))?;
    }

    KeyringStore::new().store(&host, &token)?;
    remember_connection(&connection)?;

    out.write_success(&format!("Logged in to {} as {}", host, connection.user));
    Ok(())
}

/// Saves the target and user used for login when the config has none.
fn remember_connection(connection: &Connection) -> Result<()> {
    let mut config = Config::load()?;
    if config.account.is_some() || config.server.is_some() {
        return Ok(());
    }

    match &connection.target {
        SessionTarget::Account(account) => config.account = Some(account.clone()),
        SessionTarget::Server(server) => config.server = Some(server.clone()),
    }
    config.user.get_or_insert_with(|| connection.user.clone());
    config.save()
}

fn logout(global: &GlobalOptions) -> Result<()> {
    let host = global.connection()?.host();
    KeyringStore::new().delete(&host)?;
    global
        .output()
        .write_success(&format!("Logged out of {}", host));
    Ok(())
}

async fn status(global: &GlobalOptions) -> Result<()> {
    let (client, connection) = global.client()?;

    let projects = client.list_projects().await?;
    let out = global.output();

    if global.json {
        let result = serde_json::json!({
            "host": connection.host(),
            "collection": connection.collection,
            "user": connection.user,
            "projects": projects.len(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        out.write_success(&format!(
            "Logged in to {} as {} ({} projects in {})",
            connection.host(),
            connection.user,
            projects.len(),
            connection.collection
        ));
    }
    Ok(())
}
