//
//  vsts-client
//  cli/build.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Build Commands
//!
//! ```bash
//! vsts build list -p Fabrikam
//! vsts build definitions create --input ci.json
//! vsts build artifacts 1234
//! vsts build download 1234 drop -o drop.zip
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct BuildCommand {
    #[command(subcommand)]
    pub command: BuildSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BuildSubcommand {
    /// List builds in the project
    #[command(visible_alias = "ls")]
    List,

    /// List or create build definitions
    Definitions(DefinitionsArgs),

    /// List artifacts published by a build
    Artifacts(ArtifactsArgs),

    /// Download an artifact as a zip archive
    Download(DownloadArgs),
}

#[derive(Args, Debug)]
pub struct DefinitionsArgs {
    #[command(subcommand)]
    pub command: Option<DefinitionsSubcommand>,
}

#[derive(Subcommand, Debug)]
pub enum DefinitionsSubcommand {
    /// Create a definition from a JSON document
    Create {
        #[arg(long, short = 'f')]
        input: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct ArtifactsArgs {
    pub build_id: u64,
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    pub build_id: u64,

    /// Artifact name
    pub name: String,

    /// Destination file [default: {name}.zip]
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

impl DownloadArgs {
    fn destination(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.zip", self.name)))
    }
}

impl BuildCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, connection) = global.client()?;
        let project = connection.require_project()?;
        let out = global.output();

        match &self.command {
            BuildSubcommand::List => {
                let builds = client.list_builds(project).await?;
                out.write_list(&builds)
            }
            BuildSubcommand::Definitions(DefinitionsArgs { command: None }) => {
                let definitions = client.list_build_definitions(project).await?;
                out.write_list(&definitions)
            }
            BuildSubcommand::Definitions(DefinitionsArgs {
                command: Some(DefinitionsSubcommand::Create { input }),
            }) => {
                let text = fs::read_to_string(input)
                    .with_context(|| format!("Failed to read {}", input.display()))?;
                let document: Value = serde_json::from_str(&text)
                    .with_context(|| format!("{} is not valid JSON", input.display()))?;

                let definition = client.create_build_definition(project, &document).await?;
                if global.json {
                    return out.write(&definition);
                }
                out.write_success(&format!(
                    "Created build definition {} ({})",
                    definition.name, definition.id
                ));
                Ok(())
            }
            BuildSubcommand::Artifacts(args) => {
                let artifacts = client.list_build_artifacts(project, args.build_id).await?;
                out.write_list(&artifacts)
            }
            BuildSubcommand::Download(args) => {
                let destination = args.destination();
                client
                    .download_build_artifact(project, args.build_id, &args.name, &destination)
                    .await?;
                out.write_success(&format!(
                    "Downloaded {} to {}",
                    args.name,
                    destination.display()
                ));
                Ok(())
            }
        }
    }
}
