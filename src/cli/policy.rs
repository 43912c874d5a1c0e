//
//  vsts-client
//  cli/policy.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::MinimumApproverOptions;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct PolicyCommand {
    #[command(subcommand)]
    pub command: PolicySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PolicySubcommand {
    /// List configured policies in the project
    #[command(visible_alias = "ls")]
    List,

    /// Require a minimum number of reviewers on a repository
    Create(CreateArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Repository name or id
    pub repository: String,

    #[arg(long, default_value_t = 1)]
    pub min_approvers: u32,

    /// Count the pull request author's own approval
    #[arg(long)]
    pub creator_vote_counts: bool,

    /// Only warn instead of blocking completion
    #[arg(long)]
    pub non_blocking: bool,

    /// Create the policy disabled
    #[arg(long)]
    pub disabled: bool,
}

impl CreateArgs {
    fn options(&self) -> MinimumApproverOptions {
        MinimumApproverOptions {
            minimum_approvers: self.min_approvers,
            creator_vote_counts: self.creator_vote_counts,
            blocking: !self.non_blocking,
            enabled: !self.disabled,
        }
    }
}

impl PolicyCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, connection) = global.client()?;
        let project = connection.require_project()?;
        let out = global.output();

        match &self.command {
            PolicySubcommand::List => {
                let policies = client.list_policies(project).await?;
                out.write_list(&policies)
            }
            PolicySubcommand::Create(args) => {
                let policy = client
                    .create_minimum_approver_policy(project, &args.repository, args.options())
                    .await?;
                if global.json {
                    return out.write(&policy);
                }
                out.write_success(&format!(
                    "Created policy {} on {} ({} approvers)",
                    policy.id, args.repository, args.min_approvers
                ));
                Ok(())
            }
        }
    }
}
