//
//  vsts-client
//  api/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Git Repositories
//!
//! ## API Endpoints
//!
//! ```text
//! GET    {collection}[/{project}]/_apis/git/repositories
//! POST   {collection}/_apis/git/repositories
//! DELETE {collection}/_apis/git/repositories/{repositoryId}
//! ```
//!
//! Repositories are created against a project id; [`VstsClient::create_repository`]
//! accepts the project name and resolves it first.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::client::VstsClient;
use crate::api::common::Result;
use crate::api::request::Request;
use crate::api::resolve::{find_by_name, resolve_id, Named};

/// Minimal project reference embedded in a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectReference {
    pub id: String,
    pub name: String,
}

/// A Git repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitRepository {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub project: Option<ProjectReference>,

    /// e.g. `refs/heads/master`; absent for empty repositories.
    #[serde(default)]
    pub default_branch: Option<String>,

    /// Clone URL.
    #[serde(default)]
    pub remote_url: Option<String>,
}

impl Named for GitRepository {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl VstsClient {
    /// Lists repositories, across the collection or within one project.
    pub async fn list_repositories(&self, project: Option<&str>) -> Result<Vec<GitRepository>> {
        self.list(&Request::get("git/repositories").maybe_project(project))
            .await
    }

    /// Returns the repository named exactly `name` in `project`, if any.
    pub async fn find_repository(
        &self,
        project: &str,
        name: &str,
    ) -> Result<Option<GitRepository>> {
        Ok(find_by_name(self.list_repositories(Some(project)).await?, name))
    }

    /// Creates an empty repository `name` in `project` (name or id).
    pub async fn create_repository(&self, project: &str, name: &str) -> Result<GitRepository> {
        let project_id = resolve_id(project, "project", || self.list_projects()).await?;
        let request = Request::post("git/repositories").json(&json!({
            "name": name,
            "project": { "id": project_id },
        }))?;
        self.send_json(&request).await
    }

    /// Deletes a repository in `project` given its name or id.
    pub async fn remove_repository(&self, project: &str, reference: &str) -> Result<()> {
        let id = resolve_id(reference, "repository", || {
            self.list_repositories(Some(project))
        })
        .await?;
        self.send(&Request::delete(format!("git/repositories/{}", id)))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ErrorKind;
    use crate::session::{Scheme, Session, SessionTarget};
    use mockito::{Matcher, Server, ServerGuard};

    fn client_for(server: &ServerGuard) -> VstsClient {
        let session = Session::new(SessionTarget::server(server.host_with_port()), "bob", "tok123")
            .unwrap()
            .with_scheme(Scheme::Http);
        VstsClient::new(session).unwrap()
    }

    #[tokio::test]
    async fn test_create_repository_resolves_project() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/DefaultCollection/_apis/projects")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"count": 1, "value": [{"id": "eb6e4656-77fc-42a1-9181-4c6d8e9da5d1", "name": "Fabrikam"}]}"#,
            )
            .create_async()
            .await;
        let create = server
            .mock("POST", "/DefaultCollection/_apis/git/repositories")
            .match_query(Matcher::Any)
            .match_body(Matcher::Json(json!({
                "name": "web",
                "project": {"id": "eb6e4656-77fc-42a1-9181-4c6d8e9da5d1"}
            })))
            .with_status(201)
            .with_body(
                r#"{"id": "5febef5a-833d-4e14-b9c0-14cb638f91e6", "name": "web",
                    "remoteUrl": "https://fabrikam.visualstudio.com/DefaultCollection/_git/web"}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let repo = client.create_repository("Fabrikam", "web").await.unwrap();

        create.assert_async().await;
        assert_eq!(repo.name, "web");
        assert!(repo.remote_url.unwrap().ends_with("_git/web"));
    }

    #[tokio::test]
    async fn test_remove_repository_by_id_skips_lookup() {
        let mut server = Server::new_async().await;
        let listing = server
            .mock("GET", "/DefaultCollection/Fabrikam/_apis/git/repositories")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let delete = server
            .mock(
                "DELETE",
                "/DefaultCollection/_apis/git/repositories/5febef5a-833d-4e14-b9c0-14cb638f91e6",
            )
            .match_query(Matcher::Any)
            .with_status(204)
            .create_async()
            .await;

        let client = client_for(&server);
        client
            .remove_repository("Fabrikam", "5febef5a-833d-4e14-b9c0-14cb638f91e6")
            .await
            .unwrap();

        listing.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_remove_missing_repository_is_not_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/DefaultCollection/Fabrikam/_apis/git/repositories")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"count": 0, "value": []}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .remove_repository("Fabrikam", "ghost")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
