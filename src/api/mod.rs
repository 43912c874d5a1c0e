//
//  vsts-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! Typed access to the Visual Studio Team Services REST API.
//!
//! ## Architecture
//!
//! - [`client`]: the endpoint invoker. Every call goes through [`VstsClient::send`]
//! - [`request`]: request descriptors ([`Request`], [`Verb`]) and URL assembly
//! - [`poller`]: bounded waiting for a resource to appear or disappear
//! - [`resolve`]: name to identifier resolution
//! - [`common`]: errors, the collection envelope, identity references
//! - resource modules: [`projects`], [`work_items`], [`queries`],
//!   [`repositories`], [`policies`], [`builds`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vsts_client::api::{CreateProjectOptions, VstsClient};
//! use vsts_client::session::{Session, SessionTarget};
//!
//! # async fn demo() -> vsts_client::Result<()> {
//! let session = Session::new(SessionTarget::account("fabrikam"), "alice", "pat")?;
//! let client = VstsClient::new(session)?;
//!
//! for project in client.list_projects().await? {
//!     println!("{}", project.name);
//! }
//!
//! client
//!     .create_project(&CreateProjectOptions::new("Demo").wait(true))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`VstsError`]; use [`VstsError::kind`] to tell a
//! failed request from a missing resource or an exhausted wait.

pub mod client;
pub mod common;
pub mod poller;
pub mod request;
pub mod resolve;

pub mod builds;
pub mod policies;
pub mod projects;
pub mod queries;
pub mod repositories;
pub mod work_items;

pub use client::{format_api_error, VstsClient};
pub use common::{CollectionResponse, ErrorKind, IdentityRef, Result, VstsError};
pub use poller::{ExistencePoller, NoopSleeper, Sleeper, TokioSleeper};
pub use request::{Request, Verb, DEFAULT_API_VERSION};
pub use resolve::{find_by_name, is_guid, resolve_id, Named};

pub use builds::{Build, BuildArtifact, BuildDefinition};
pub use policies::{MinimumApproverOptions, PolicyConfiguration};
pub use projects::{CreateProjectOptions, OperationReference, Process, Project, SourceControlType};
pub use queries::QueryHierarchyItem;
pub use repositories::GitRepository;
pub use work_items::{JsonPatchOperation, WorkItem, WorkItemReference};
