//
//  vsts-client
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Commands
//!
//! ```bash
//! vsts config set account fabrikam
//! vsts config set user alice@fabrikam.com
//! vsts config get account
//! vsts config list
//! vsts config path
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::config::Config;

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print one value
    Get(GetArgs),

    /// Set a value (an empty value clears it)
    Set(SetArgs),

    /// Print every value
    #[command(visible_alias = "ls")]
    List,

    /// Print the configuration file location
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    pub key: String,

    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => get(args, global),
            ConfigSubcommand::Set(args) => set(args, global),
            ConfigSubcommand::List => list(global),
            ConfigSubcommand::Path => {
                println!("{}", Config::config_path()?.display());
                Ok(())
            }
        }
    }
}

fn get(args: &GetArgs, global: &GlobalOptions) -> Result<()> {
    let value = Config::load()?.get(&args.key);

    if global.json {
        let result = serde_json::json!({ "key": args.key, "value": value });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Some(v) = value {
        println!("{}", v);
    }
    Ok(())
}

fn set(args: &SetArgs, global: &GlobalOptions) -> Result<()> {
    let mut config = Config::load()?;
    config.set(&args.key, &args.value)?;
    config.save()?;

    global.output().write_success(&format!(
        "Set {} = {}",
        style(&args.key).cyan(),
        args.value
    ));
    Ok(())
}

fn list(global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;

    if global.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    for (key, value) in config.entries() {
        match value {
            Some(v) => println!("{} = {}", style(key).cyan(), v),
            None => println!("{} = {}", style(key).cyan(), style("(not set)").dim()),
        }
    }
    Ok(())
}
