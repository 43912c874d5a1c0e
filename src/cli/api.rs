//
//  vsts-client
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Raw API Command
//!
//! Sends an arbitrary request through the endpoint invoker, so anything the
//! resource commands do not cover is still one command away.
//!
//! ```bash
//! # List projects
//! vsts api projects
//!
//! # Project-scoped call with extra query parameters
//! vsts api wit/queries -p Fabrikam -q '$depth=2'
//!
//! # Create a repository from a JSON file
//! vsts api git/repositories -X POST --input repo.json
//!
//! # Download a build artifact
//! vsts api build/builds/7/artifacts -p Fabrikam --api-version 2.0 \
//!     -q artifactName=drop -q '$format=zip' --output drop.zip
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::api::{Request, Verb, DEFAULT_API_VERSION};

use super::{parse_key_value, GlobalOptions};

#[derive(Args, Debug)]
pub struct ApiCommand {
    /// Path below `_apis/`, e.g. `wit/workitems/42`
    pub path: String,

    /// HTTP verb: GET, PUT, POST, DELETE or PATCH
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: Verb,

    #[arg(long, default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// Query parameter as key=value (repeatable)
    #[arg(long = "query", short = 'q', action = clap::ArgAction::Append)]
    pub query: Vec<String>,

    /// Read the request body from a file (`-` for stdin)
    #[arg(long, short = 'f')]
    pub input: Option<String>,

    /// Write the response body to a file instead of printing it
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, connection) = global.client()?;
        let request = self.build_request(connection.project.as_deref())?;

        let value = client.send(&request).await?;

        let out = global.output();
        match &self.output {
            Some(path) => out.write_success(&format!("Saved to {}", path.display())),
            None => out.write_value(&value)?,
        }
        Ok(())
    }

    fn build_request(&self, project: Option<&str>) -> Result<Request> {
        let mut request = Request::new(self.method, self.path.trim_matches('/'))
            .maybe_project(project)
            .api_version(&self.api_version);

        for pair in &self.query {
            let (key, value) = parse_key_value(pair)?;
            request = request.query(key, value);
        }

        if let Some(input) = &self.input {
            request = request.body(read_body(input)?);
        }
        if let Some(path) = &self.output {
            request = request.output(path);
        }

        Ok(request)
    }
}

fn read_body(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
        Ok(buffer)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))
    }
}
