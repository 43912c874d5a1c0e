//
//  vsts-client
//  cli/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Project Commands
//!
//! ```bash
//! vsts project list
//! vsts project create Demo --process Scrum --vcs tfvc --wait
//! vsts project wait Demo --attempts 60
//! vsts project delete Demo --yes --wait
//! ```

use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Args, Subcommand, ValueEnum};
use dialoguer::Confirm;

use crate::api::poller::DEFAULT_MAX_ATTEMPTS;
use crate::api::projects::DEFAULT_PROCESS;
use crate::api::{CreateProjectOptions, ExistencePoller, OperationReference, SourceControlType};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    /// List projects in the collection
    #[command(visible_alias = "ls")]
    List,

    /// Show one project
    View(ViewArgs),

    /// Create a project
    Create(CreateArgs),

    /// Delete a project
    Delete(DeleteArgs),

    /// Wait until a project exists (or is gone)
    Wait(WaitArgs),

    /// List the available process templates
    Processes,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Project name or id [default: --project]
    #[arg(value_name = "PROJECT")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VcsArg {
    Git,
    Tfvc,
}

impl From<VcsArg> for SourceControlType {
    fn from(value: VcsArg) -> Self {
        match value {
            VcsArg::Git => SourceControlType::Git,
            VcsArg::Tfvc => SourceControlType::Tfvc,
        }
    }
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    pub name: String,

    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Process template name or id
    #[arg(long, default_value = DEFAULT_PROCESS)]
    pub process: String,

    #[arg(long, value_enum, default_value = "git")]
    pub vcs: VcsArg,

    /// Wait until the project is listed
    #[arg(long)]
    pub wait: bool,

    #[command(flatten)]
    pub poll: PollArgs,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Project name or id
    #[arg(value_name = "PROJECT")]
    pub reference: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Wait until the project is no longer listed
    #[arg(long)]
    pub wait: bool,

    #[command(flatten)]
    pub poll: PollArgs,
}

#[derive(Args, Debug)]
pub struct WaitArgs {
    /// Project name or id
    #[arg(value_name = "PROJECT")]
    pub reference: String,

    /// Wait for the project to disappear instead
    #[arg(long)]
    pub absent: bool,

    #[command(flatten)]
    pub poll: PollArgs,
}

/// Poller settings for commands that wait.
#[derive(Args, Debug, Clone)]
pub struct PollArgs {
    /// Maximum number of lookups
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub attempts: u32,

    /// Seconds between lookups
    #[arg(long, default_value_t = 2)]
    pub interval: u64,
}

impl PollArgs {
    pub fn poller(&self) -> ExistencePoller {
        ExistencePoller::new()
            .with_max_attempts(self.attempts)
            .with_interval(Duration::from_secs(self.interval))
    }
}

impl ProjectCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ProjectSubcommand::List => list(global).await,
            ProjectSubcommand::View(args) => view(args, global).await,
            ProjectSubcommand::Create(args) => create(args, global).await,
            ProjectSubcommand::Delete(args) => delete(args, global).await,
            ProjectSubcommand::Wait(args) => wait(args, global).await,
            ProjectSubcommand::Processes => processes(global).await,
        }
    }
}

async fn list(global: &GlobalOptions) -> Result<()> {
    let (client, _) = global.client()?;
    let projects = client.list_projects().await?;
    global.output().write_list(&projects)
}

async fn view(args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
    let (client, connection) = global.client()?;
    let reference = match &args.reference {
        Some(project) => project.as_str(),
        None => connection.require_project()?,
    };
    let project = client.get_project(reference).await?;
    global.output().write(&project)
}

async fn create(args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
    let (client, _) = global.client()?;
    let client = client.with_poller(args.poll.poller());
    let out = global.output();

    let mut options = CreateProjectOptions::new(&args.name)
        .process(&args.process)
        .source_control(args.vcs.into())
        .wait(args.wait);
    if let Some(description) = &args.description {
        options = options.description(description);
    }

    let operation = client.create_project(&options).await?;

    if global.json {
        return out.write(&operation);
    }
    if args.wait {
        out.write_success(&format!("Created project {}", args.name));
    } else {
        out.write_success(&format!(
            "Queued creation of project {} (operation {})",
            args.name, operation.id
        ));
    }
    Ok(())
}

async fn delete(args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete project '{}' and all its data?", args.reference))
            .default(false)
            .interact()?;
        if !confirmed {
            bail!("Cancelled");
        }
    }

    let (client, _) = global.client()?;
    let client = client.with_poller(args.poll.poller());
    let operation = client.remove_project(&args.reference, args.wait).await?;

    let out = global.output();
    if global.json {
        return out.write(&operation);
    }
    out.write_success(&deletion_message(&args.reference, args.wait, &operation));
    Ok(())
}

fn deletion_message(reference: &str, waited: bool, operation: &OperationReference) -> String {
    if waited {
        format!("Deleted project {}", reference)
    } else {
        format!(
            "Queued deletion of project {} (operation {})",
            reference, operation.id
        )
    }
}

async fn wait(args: &WaitArgs, global: &GlobalOptions) -> Result<()> {
    let (client, _) = global.client()?;
    let client = client.with_poller(args.poll.poller());

    client.wait_for_project(&args.reference, !args.absent).await?;

    let state = if args.absent { "is gone" } else { "exists" };
    global
        .output()
        .write_success(&format!("Project {} {}", args.reference, state));
    Ok(())
}

async fn processes(global: &GlobalOptions) -> Result<()> {
    let (client, _) = global.client()?;
    let processes = client.list_processes().await?;
    global.output().write_list(&processes)
}
