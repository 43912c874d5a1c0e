//
//  vsts-client
//  cli/completion.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Shell completion scripts.
//!
//! ```bash
//! vsts completion bash > /etc/bash_completion.d/vsts
//! vsts completion zsh > "${fpath[1]}/_vsts"
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use super::{Cli, GlobalOptions};

#[derive(Args, Debug)]
pub struct CompletionCommand {
    /// bash, zsh, fish, elvish or powershell
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionCommand {
    pub async fn run(&self, _global: &GlobalOptions) -> Result<()> {
        let mut cmd = Cli::command();
        generate(self.shell, &mut cmd, crate::APP_NAME, &mut std::io::stdout());
        Ok(())
    }
}
