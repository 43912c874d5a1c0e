//
//  vsts-client
//  api/policies.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Code Policies
//!
//! Branch policies gate pull requests. Only the *minimum number of
//! reviewers* policy can be created here; listing returns every configured
//! policy regardless of type.
//!
//! ## API Endpoints
//!
//! ```text
//! GET  {collection}/{project}/_apis/policy/configurations?api-version=2.0-preview
//! POST {collection}/{project}/_apis/policy/configurations?api-version=2.0-preview
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::client::VstsClient;
use crate::api::common::Result;
use crate::api::request::Request;
use crate::api::resolve::resolve_id;

/// api-version of the policy endpoints.
pub const POLICY_API_VERSION: &str = "2.0-preview";

/// Policy type id of the "Minimum number of reviewers" policy.
pub const MINIMUM_APPROVER_POLICY_TYPE: &str = "fa4e907d-c16b-4a4c-9dfa-4906e5d171dd";

/// Type reference of a policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyTypeRef {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A configured policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfiguration {
    pub id: u64,

    #[serde(default)]
    pub revision: Option<u64>,

    #[serde(default)]
    pub is_enabled: bool,

    #[serde(default)]
    pub is_blocking: bool,

    #[serde(rename = "type")]
    pub policy_type: PolicyTypeRef,

    /// Type-specific settings, kept as raw JSON.
    #[serde(default)]
    pub settings: Value,
}

/// Settings for [`VstsClient::create_minimum_approver_policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimumApproverOptions {
    pub minimum_approvers: u32,
    /// Whether the pull request author's own vote counts.
    pub creator_vote_counts: bool,
    pub blocking: bool,
    pub enabled: bool,
}

impl Default for MinimumApproverOptions {
    fn default() -> Self {
        Self {
            minimum_approvers: 1,
            creator_vote_counts: false,
            blocking: true,
            enabled: true,
        }
    }
}

impl VstsClient {
    /// Lists the policies configured in `project`.
    pub async fn list_policies(&self, project: &str) -> Result<Vec<PolicyConfiguration>> {
        let request = Request::get("policy/configurations")
            .project(project)
            .api_version(POLICY_API_VERSION);
        self.list(&request).await
    }

    /// Requires `options.minimum_approvers` reviewers on pull requests into
    /// `repository` (name or id).
    pub async fn create_minimum_approver_policy(
        &self,
        project: &str,
        repository: &str,
        options: MinimumApproverOptions,
    ) -> Result<PolicyConfiguration> {
        let repository_id = resolve_id(repository, "repository", || {
            self.list_repositories(Some(project))
        })
        .await?;

        let body = json!({
            "isEnabled": options.enabled,
            "isBlocking": options.blocking,
            "type": { "id": MINIMUM_APPROVER_POLICY_TYPE },
            "settings": {
                "minimumApproverCount": options.minimum_approvers,
                "creatorVoteCounts": options.creator_vote_counts,
                "scope": [{ "repositoryId": repository_id }],
            },
        });

        let request = Request::post("policy/configurations")
            .project(project)
            .api_version(POLICY_API_VERSION)
            .json(&body)?;
        self.send_json(&request).await
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
    async fn test_create_policy_resolves_repository() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/DefaultCollection/Fabrikam/_apis/git/repositories")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"count": 1, "value": [{"id": "5febef5a-833d-4e14-b9c0-14cb638f91e6", "name": "web"}]}"#,
            )
            .create_async()
            .await;
        let create = server
            .mock("POST", "/DefaultCollection/Fabrikam/_apis/policy/configurations")
            .match_query(Matcher::UrlEncoded(
                "api-version".into(),
                "2.0-preview".into(),
            ))
            .match_body(Matcher::PartialJson(json!({
                "type": {"id": MINIMUM_APPROVER_POLICY_TYPE},
                "settings": {
                    "minimumApproverCount": 2,
                    "scope": [{"repositoryId": "5febef5a-833d-4e14-b9c0-14cb638f91e6"}]
                }
            })))
            .with_status(200)
            .with_body(
                r#"{"id": 9, "isEnabled": true, "isBlocking": true,
                    "type": {"id": "fa4e907d-c16b-4a4c-9dfa-4906e5d171dd", "displayName": "Minimum number of reviewers"},
                    "settings": {"minimumApproverCount": 2}}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let options = MinimumApproverOptions {
            minimum_approvers: 2,
            ..Default::default()
        };
        let policy = client
            .create_minimum_approver_policy("Fabrikam", "web", options)
            .await
            .unwrap();

        create.assert_async().await;
        assert_eq!(policy.id, 9);
        assert_eq!(policy.settings["minimumApproverCount"], 2);
    }
}
