//
//  vsts-client
//  api/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Team Projects and Processes
//!
//! Projects are the workspaces inside a collection that hold repositories,
//! work items and builds. Creating or deleting a project is asynchronous on
//! the server: the call returns an operation reference immediately and the
//! project appears (or disappears) some seconds later. The `wait` options
//! below use the client's [`ExistencePoller`](super::ExistencePoller) to
//! block until that happens.
//!
//! ## API Endpoints
//!
//! ```text
//! GET/POST  {collection}/_apis/projects
//! GET/DELETE {collection}/_apis/projects/{projectId}
//! GET       {collection}/_apis/process/processes
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use vsts_client::api::{CreateProjectOptions, VstsClient};
//! # async fn example(client: VstsClient) -> vsts_client::Result<()> {
//! let options = CreateProjectOptions::new("Fabrikam").wait(true);
//! client.create_project(&options).await?;
//!
//! let project = client.find_project("Fabrikam").await?;
//! assert!(project.is_some());
//! # Ok(())
//! # }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::api::client::VstsClient;
use crate::api::common::Result;
use crate::api::request::Request;
use crate::api::resolve::{find_by_name, resolve_id, Named};

/// Process template used when none is requested.
pub const DEFAULT_PROCESS: &str = "Agile";

/// A team project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project GUID.
    pub id: String,

    /// Project name, unique within the collection.
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// REST URL of the project.
    #[serde(default)]
    pub url: Option<String>,

    /// Lifecycle state, e.g. `wellFormed`, `createPending`, `deleting`.
    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub revision: Option<u64>,
}

impl Named for Project {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// A process template (Agile, Scrum, CMMI or a custom one).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    /// `system`, `custom` or `inherited`.
    #[serde(default, rename = "type")]
    pub process_type: Option<String>,
}

impl Named for Process {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Reference to a long-running server operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationReference {
    pub id: String,
    /// `notSet`, `queued`, `inProgress`, `cancelled`, `succeeded` or `failed`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Version control system for a new project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SourceControlType {
    #[default]
    Git,
    Tfvc,
}

impl fmt::Display for SourceControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Git => f.write_str("Git"),
            Self::Tfvc => f.write_str("Tfvc"),
        }
    }
}

/// Parameters for [`VstsClient::create_project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectOptions {
    pub name: String,
    pub description: String,
    pub source_control: SourceControlType,
    /// Process template name or id.
    pub process: String,
    /// Block until the project is visible.
    pub wait: bool,
}

impl CreateProjectOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            source_control: SourceControlType::default(),
            process: DEFAULT_PROCESS.to_string(),
            wait: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn source_control(mut self, source_control: SourceControlType) -> Self {
        self.source_control = source_control;
        self
    }

    pub fn process(mut self, process: impl Into<String>) -> Self {
        self.process = process.into();
        self
    }

    pub fn wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }
}

impl VstsClient {
    /// Lists every project in the collection.
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.list(&Request::get("projects")).await
    }

    /// Returns the project named exactly `name`, if any.
    pub async fn find_project(&self, name: &str) -> Result<Option<Project>> {
        Ok(find_by_name(self.list_projects().await?, name))
    }

    /// Fetches a single project by name or id.
    pub async fn get_project(&self, reference: &str) -> Result<Project> {
        self.send_json(&Request::get(format!("projects/{}", reference)))
            .await
    }

    /// Lists the process templates available to the collection.
    pub async fn list_processes(&self) -> Result<Vec<Process>> {
        self.list(&Request::get("process/processes")).await
    }

    /// Queues creation of a project.
    ///
    /// The process template is resolved from its name (default `Agile`).
    /// With `options.wait` set, returns only once the project is listed.
    pub async fn create_project(
        &self,
        options: &CreateProjectOptions,
    ) -> Result<OperationReference> {
        let process_id =
            resolve_id(&options.process, "process", || self.list_processes()).await?;

        let body = json!({
            "name": options.name,
            "description": options.description,
            "capabilities": {
                "versioncontrol": {
                    "sourceControlType": options.source_control.to_string(),
                },
                "processTemplate": {
                    "templateTypeId": process_id,
                },
            },
        });

        let operation: OperationReference = self
            .send_json(&Request::post("projects").json(&body)?)
            .await?;
        info!(project = %options.name, operation = %operation.id, "Queued project creation");

        if options.wait {
            self.wait_for_project(&options.name, true).await?;
        }

        Ok(operation)
    }

    /// Queues deletion of a project given its name or id.
    ///
    /// With `wait` set, returns only once the project is no longer listed.
    pub async fn remove_project(&self, reference: &str, wait: bool) -> Result<OperationReference> {
        let id = resolve_id(reference, "project", || self.list_projects()).await?;

        let operation: OperationReference = self
            .send_json(&Request::delete(format!("projects/{}", id)))
            .await?;
        info!(project = %reference, operation = %operation.id, "Queued project deletion");

        if wait {
            self.wait_for_project(reference, false).await?;
        }

        Ok(operation)
    }

    /// Blocks until a project with `reference` as its name (or id) does, or
    /// does not, exist.
    ///
    /// Uses the client's poller: by default 30 attempts, 2 seconds apart.
    pub async fn wait_for_project(&self, reference: &str, should_exist: bool) -> Result<()> {
        self.poller()
            .wait_until(reference, should_exist, move || async move {
                let projects = self.list_projects().await?;
                Ok(projects
                    .iter()
                    .any(|p| p.name == reference || p.id == reference))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::{ErrorKind, VstsError};
    use crate::api::poller::{ExistencePoller, NoopSleeper};
    use crate::session::{Scheme, Session, SessionTarget};
    use mockito::{Matcher, Server, ServerGuard};
    use std::sync::Arc;

    const PROJECTS: &str = r#"{"count": 1, "value": [
        {"id": "eb6e4656-77fc-42a1-9181-4c6d8e9da5d1", "name": "Fabrikam", "state": "wellFormed"}
    ]}"#;

    const PROCESSES: &str = r#"{"count": 2, "value": [
        {"id": "adcc42ab-9882-485e-a3ed-7678f01f66bc", "name": "Agile", "isDefault": true, "type": "system"},
        {"id": "6b724908-ef14-45cf-84f8-768b5384da45", "name": "Scrum", "type": "system"}
    ]}"#;

    fn client_for(server: &ServerGuard, attempts: u32) -> VstsClient {
        let session = Session::new(SessionTarget::server(server.host_with_port()), "bob", "tok123")
            .unwrap()
            .with_scheme(Scheme::Http);
        VstsClient::new(session).unwrap().with_poller(
            ExistencePoller::new()
                .with_max_attempts(attempts)
                .with_sleeper(Arc::new(NoopSleeper)),
        )
    }

    #[tokio::test]
    async fn test_find_project() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/DefaultCollection/_apis/projects")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(PROJECTS)
            .create_async()
            .await;

        let client = client_for(&server, 30);
        let project = client.find_project("Fabrikam").await.unwrap().unwrap();
        assert_eq!(project.id, "eb6e4656-77fc-42a1-9181-4c6d8e9da5d1");
        assert!(client.find_project("Contoso").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_project_resolves_process() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/DefaultCollection/_apis/process/processes")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(PROCESSES)
            .create_async()
            .await;
        let create = server
            .mock("POST", "/DefaultCollection/_apis/projects")
            .match_query(Matcher::UrlEncoded("api-version".into(), "1.0".into()))
            .match_body(Matcher::PartialJson(serde_json::json!({
                "name": "Fabrikam",
                "capabilities": {
                    "versioncontrol": {"sourceControlType": "Tfvc"},
                    "processTemplate": {"templateTypeId": "6b724908-ef14-45cf-84f8-768b5384da45"}
                }
            })))
            .with_status(202)
            .with_body(r#"{"id": "op-1", "status": "queued"}"#)
            .create_async()
            .await;

        let client = client_for(&server, 30);
        let options = CreateProjectOptions::new("Fabrikam")
            .process("Scrum")
            .source_control(SourceControlType::Tfvc);
        let operation = client.create_project(&options).await.unwrap();

        create.assert_async().await;
        assert_eq!(operation.id, "op-1");
    }

    #[tokio::test]
    async fn test_create_project_unknown_process() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/DefaultCollection/_apis/process/processes")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(PROCESSES)
            .create_async()
            .await;
        let create = server
            .mock("POST", "/DefaultCollection/_apis/projects")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server, 30);
        let err = client
            .create_project(&CreateProjectOptions::new("Fabrikam").process("Basic"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        create.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_project_waits_until_listed() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/DefaultCollection/_apis/process/processes")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(PROCESSES)
            .create_async()
            .await;
        server
            .mock("POST", "/DefaultCollection/_apis/projects")
            .match_query(Matcher::Any)
            .with_status(202)
            .with_body(r#"{"id": "op-1"}"#)
            .create_async()
            .await;
        let listing = server
            .mock("GET", "/DefaultCollection/_apis/projects")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(PROJECTS)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server, 30);
        client
            .create_project(&CreateProjectOptions::new("Fabrikam").wait(true))
            .await
            .unwrap();

        listing.assert_async().await;
    }

    #[tokio::test]
    async fn test_wait_for_project_times_out() {
        let mut server = Server::new_async().await;
        let listing = server
            .mock("GET", "/DefaultCollection/_apis/projects")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"count": 0, "value": []}"#)
            .expect(4)
            .create_async()
            .await;

        let client = client_for(&server, 3);
        let err = client.wait_for_project("Fabrikam", true).await.unwrap_err();

        listing.assert_async().await;
        match err {
            VstsError::Timeout { resource, attempts } => {
                assert_eq!(resource, "Fabrikam");
                assert_eq!(attempts, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_remove_project_by_name() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/DefaultCollection/_apis/projects")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(PROJECTS)
            .create_async()
            .await;
        let delete = server
            .mock(
                "DELETE",
                "/DefaultCollection/_apis/projects/eb6e4656-77fc-42a1-9181-4c6d8e9da5d1",
            )
            .match_query(Matcher::Any)
            .with_status(202)
            .with_body(r#"{"id": "op-2", "status": "queued"}"#)
            .create_async()
            .await;

        let client = client_for(&server, 30);
        let operation = client.remove_project("Fabrikam", false).await.unwrap();

        delete.assert_async().await;
        assert_eq!(operation.id, "op-2");
    }
}
