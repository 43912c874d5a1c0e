//
//  vsts-client
//  api/queries.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Saved Work Item Queries
//!
//! Saved queries live in a folder hierarchy per project, rooted at
//! `My Queries` and `Shared Queries`. Queries are addressed by their folder
//! path plus name.
//!
//! ## API Endpoints
//!
//! ```text
//! GET    {collection}/{project}/_apis/wit/queries?$depth=1
//! POST   {collection}/{project}/_apis/wit/queries/{folder}
//! DELETE {collection}/{project}/_apis/wit/queries/{folder}/{name}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::client::VstsClient;
use crate::api::common::Result;
use crate::api::request::Request;

/// A saved query or query folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryHierarchyItem {
    pub id: String,
    pub name: String,

    /// Full path, e.g. `Shared Queries/Active Bugs`.
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub is_folder: bool,

    #[serde(default)]
    pub has_children: bool,

    /// Populated one level deep when listing.
    #[serde(default)]
    pub children: Vec<QueryHierarchyItem>,

    /// The query text; absent for folders.
    #[serde(default)]
    pub wiql: Option<String>,
}

impl VstsClient {
    /// Lists the root query folders of `project` with their direct children.
    pub async fn list_queries(&self, project: &str) -> Result<Vec<QueryHierarchyItem>> {
        let request = Request::get("wit/queries")
            .project(project)
            .query("$depth", 1);
        self.list(&request).await
    }

    /// Saves a new query `name` under `folder` (e.g. `Shared Queries`).
    pub async fn create_query(
        &self,
        project: &str,
        folder: &str,
        name: &str,
        wiql: &str,
    ) -> Result<QueryHierarchyItem> {
        let request = Request::post(format!("wit/queries/{}", folder))
            .project(project)
            .json(&json!({ "name": name, "wiql": wiql }))?;
        self.send_json(&request).await
    }

    /// Deletes the query (or empty folder) `name` under `folder`.
    pub async fn remove_query(&self, project: &str, folder: &str, name: &str) -> Result<()> {
        let request =
            Request::delete(format!("wit/queries/{}/{}", folder, name)).project(project);
        self.send(&request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Scheme, Session, SessionTarget};
    use mockito::{Matcher, Server, ServerGuard};

    fn client_for(server: &ServerGuard) -> VstsClient {
        let session = Session::new(SessionTarget::server(server.host_with_port()), "bob", "tok123")
            .unwrap()
            .with_scheme(Scheme::Http);
        VstsClient::new(session).unwrap()
    }

    #[tokio::test]
    async fn test_list_queries_requests_depth() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/DefaultCollection/Fabrikam/_apis/wit/queries")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("$depth".into(), "1".into()),
                Matcher::UrlEncoded("api-version".into(), "1.0".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"count": 1, "value": [{"id": "f1", "name": "Shared Queries", "isFolder": true,
                    "hasChildren": true, "children": [{"id": "q1", "name": "Active Bugs", "wiql": "SELECT"}]}]}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let folders = client.list_queries("Fabrikam").await.unwrap();

        mock.assert_async().await;
        assert_eq!(folders.len(), 1);
        assert!(folders[0].is_folder);
        assert_eq!(folders[0].children[0].name, "Active Bugs");
    }

    #[tokio::test]
    async fn test_remove_query_path() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock(
                "DELETE",
                Matcher::Regex(
                    r"^/DefaultCollection/Fabrikam/_apis/wit/queries/Shared(%20| )Queries/Active(%20| )Bugs$"
                        .to_string(),
                ),
            )
            .match_query(Matcher::Any)
            .with_status(204)
            .create_async()
            .await;

        let client = client_for(&server);
        client
            .remove_query("Fabrikam", "Shared Queries", "Active Bugs")
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
