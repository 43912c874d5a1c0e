//
//  vsts-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # VSTS Client Library
//!
//! A thin client for the Visual Studio Team Services REST API, plus the
//! `vsts` command built on top of it.
//!
//! ## Overview
//!
//! Every call is assembled from an immutable [`Session`] (which account or
//! server, which collection, which credentials) and a [`api::Request`]
//! descriptor (verb, path, optional project, api-version, query, body).
//! [`api::VstsClient`] sends it with basic authentication and decodes the
//! JSON reply. Resource helpers for projects, work items, saved queries,
//! Git repositories, branch policies and builds are layered on that single
//! invoker.
//!
//! Project creation and deletion are asynchronous on the server; the
//! [`api::ExistencePoller`] waits, with a bounded number of attempts, until a
//! project shows up in (or disappears from) the project list.
//!
//! ## Module Structure
//!
//! - [`session`]: connection settings
//! - [`auth`]: basic authorization header and keychain storage
//! - [`api`]: the endpoint invoker, poller, name resolution and resources
//! - [`migrate`]: TFVC to Git migration through an external tool
//! - [`config`]: persisted defaults for the command line
//! - [`output`]: table and JSON output
//! - [`cli`]: command-line interface definitions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use vsts_client::api::VstsClient;
//! use vsts_client::session::{Session, SessionTarget};
//!
//! # async fn demo() -> vsts_client::Result<()> {
//! let session = Session::new(SessionTarget::account("contoso"), "alice", "pat")?;
//! let client = VstsClient::new(session)?;
//!
//! let item = client.get_work_item(42).await?;
//! println!("{}", item.title().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod migrate;
pub mod output;
pub mod session;

pub use api::common::{ErrorKind, Result, VstsError};
pub use cli::Cli;
pub use config::Config;
pub use session::{Scheme, Session, SessionTarget};

/// Name of the CLI binary.
pub const APP_NAME: &str = "vsts";

/// Crate version, also sent in the `User-Agent` header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// # Example
///
/// ```rust,no_run
/// use vsts_client::exit_codes;
///
/// std::process::exit(exit_codes::NOT_FOUND);
/// ```
pub mod exit_codes {
    use crate::api::common::{ErrorKind, VstsError};

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// Not logged in, or the server rejected the credentials.
    pub const AUTH_ERROR: i32 = 4;

    /// A named resource does not exist.
    pub const NOT_FOUND: i32 = 8;

    /// Gave up waiting for a resource to appear or disappear.
    pub const TIMEOUT: i32 = 16;

    /// Maps a library error to the exit code the CLI reports.
    pub fn for_error(error: &VstsError) -> i32 {
        match error.kind() {
            ErrorKind::NotFound => NOT_FOUND,
            ErrorKind::TimeoutBudgetExceeded => TIMEOUT,
            ErrorKind::InvalidRequest => USAGE,
            ErrorKind::Transport => match error.status().map(|s| s.as_u16()) {
                Some(401) | Some(403) => AUTH_ERROR,
                Some(404) => NOT_FOUND,
                _ => ERROR,
            },
            ErrorKind::Precondition | ErrorKind::Io | ErrorKind::Serialization => ERROR,
        }
    }

}
