//
//  vsts-client
//  cli/repo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Repository Commands
//!
//! ```bash
//! vsts repo list --all
//! vsts repo create web -p Fabrikam
//! vsts repo migrate '$/Fabrikam/Main' main -p Fabrikam --workdir /tmp/migrations
//! ```

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use dialoguer::Confirm;

use crate::migrate::GitTfTool;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct RepoCommand {
    #[command(subcommand)]
    pub command: RepoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoSubcommand {
    /// List Git repositories
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Create an empty Git repository
    Create(CreateArgs),

    /// Delete a Git repository
    Delete(DeleteArgs),

    /// Convert a TFVC folder into a new Git repository (needs git-tf)
    Migrate(MigrateArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// List across the whole collection instead of one project
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    pub name: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Repository name or id
    pub repository: String,

    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// TFVC folder, e.g. $/Fabrikam/Main
    pub tfvc_folder: String,

    /// Name of the Git repository to create
    pub name: String,

    /// Directory the working clone is created in
    #[arg(long, default_value = ".")]
    pub workdir: PathBuf,

    /// git executable to use
    #[arg(long)]
    pub git: Option<PathBuf>,
}

impl RepoCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, connection) = global.client()?;
        let out = global.output();

        match &self.command {
            RepoSubcommand::List(args) => {
                let project = if args.all {
                    None
                } else {
                    Some(connection.require_project()?)
                };
                let repos = client.list_repositories(project).await?;
                out.write_list(&repos)
            }
            RepoSubcommand::Create(args) => {
                let project = connection.require_project()?;
                let repo = client.create_repository(project, &args.name).await?;
                if global.json {
                    return out.write(&repo);
                }
                out.write_success(&format!("Created repository {}", repo.name));
                if let Some(url) = &repo.remote_url {
                    out.write_info(url);
                }
                Ok(())
            }
            RepoSubcommand::Delete(args) => {
                let project = connection.require_project()?;
                if !args.yes
                    && !Confirm::new()
                        .with_prompt(format!("Delete repository '{}'?", args.repository))
                        .default(false)
                        .interact()?
                {
                    bail!("Cancelled");
                }
                client.remove_repository(project, &args.repository).await?;
                out.write_success(&format!("Deleted repository {}", args.repository));
                Ok(())
            }
            RepoSubcommand::Migrate(args) => {
                let project = connection.require_project()?;
                let mut tool = GitTfTool::new();
                if let Some(git) = &args.git {
                    tool = tool.with_git(git);
                }

                let repo = client
                    .migrate_tfvc_folder(
                        &tool,
                        project,
                        &args.tfvc_folder,
                        &args.name,
                        &args.workdir,
                    )
                    .await?;
                if global.json {
                    return out.write(&repo);
                }
                out.write_success(&format!(
                    "Migrated {} into repository {}",
                    args.tfvc_folder, repo.name
                ));
                Ok(())
            }
        }
    }
}
