//
//  vsts-client
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vsts_client::cli::{Cli, Commands, NotLoggedIn};
use vsts_client::{exit_codes, VstsError};

#[tokio::main]
async fn main() {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("VSTS_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn exit_code(error: &anyhow::Error) -> i32 {
    if error.is::<NotLoggedIn>() {
        return exit_codes::AUTH_ERROR;
    }
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<VstsError>())
        .map(exit_codes::for_error)
        .unwrap_or(exit_codes::ERROR)
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Api(cmd) => cmd.run(&cli.global).await,
        Commands::Project(cmd) => cmd.run(&cli.global).await,
        Commands::WorkItem(cmd) => cmd.run(&cli.global).await,
        Commands::Query(cmd) => cmd.run(&cli.global).await,
        Commands::Repo(cmd) => cmd.run(&cli.global).await,
        Commands::Policy(cmd) => cmd.run(&cli.global).await,
        Commands::Build(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("{} version {}", vsts_client::APP_NAME, vsts_client::VERSION);
            Ok(())
        }
    }
}
