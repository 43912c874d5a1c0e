//
//  vsts-client
//  api/builds.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Builds
//!
//! Build runs, build definitions and the artifacts a build publishes.
//! All build endpoints are project scoped and use api-version `2.0`.
//!
//! ## API Endpoints
//!
//! ```text
//! GET  {collection}/{project}/_apis/build/builds
//! GET  {collection}/{project}/_apis/build/definitions
//! POST {collection}/{project}/_apis/build/definitions
//! GET  {collection}/{project}/_apis/build/builds/{id}/artifacts
//! GET  {collection}/{project}/_apis/build/builds/{id}/artifacts?artifactName={name}&$format=zip
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::client::VstsClient;
use crate::api::common::{IdentityRef, Result};
use crate::api::request::Request;

/// api-version of the build endpoints.
pub const BUILD_API_VERSION: &str = "2.0";

/// Reference to a build definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionReference {
    pub id: u64,
    pub name: String,
}

/// A build run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    pub id: u64,

    #[serde(default)]
    pub build_number: Option<String>,

    /// `notStarted`, `inProgress` or `completed`.
    #[serde(default)]
    pub status: Option<String>,

    /// Set once completed: `succeeded`, `failed`, ...
    #[serde(default)]
    pub result: Option<String>,

    #[serde(default)]
    pub definition: Option<DefinitionReference>,

    #[serde(default)]
    pub source_branch: Option<String>,

    #[serde(default)]
    pub requested_for: Option<IdentityRef>,

    #[serde(default)]
    pub queue_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub finish_time: Option<DateTime<Utc>>,
}

impl Build {
    /// Run time of a finished build.
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.start_time, self.finish_time) {
            (Some(start), Some(finish)) => Some(finish - start),
            _ => None,
        }
    }
}

/// A build definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDefinition {
    pub id: u64,
    pub name: String,

    #[serde(default)]
    pub revision: Option<u64>,

    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

/// Where a published artifact lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactResource {
    #[serde(default, rename = "type")]
    pub resource_type: Option<String>,

    #[serde(default)]
    pub data: Option<String>,

    #[serde(default)]
    pub download_url: Option<String>,
}

/// An artifact published by a build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildArtifact {
    #[serde(default)]
    pub id: Option<u64>,

    pub name: String,

    #[serde(default)]
    pub resource: Option<ArtifactResource>,
}

impl VstsClient {
    /// Lists builds in `project`, most recent first.
    pub async fn list_builds(&self, project: &str) -> Result<Vec<Build>> {
        let request = Request::get("build/builds")
            .project(project)
            .api_version(BUILD_API_VERSION);
        self.list(&request).await
    }

    /// Lists the build definitions of `project`.
    pub async fn list_build_definitions(&self, project: &str) -> Result<Vec<BuildDefinition>> {
        let request = Request::get("build/definitions")
            .project(project)
            .api_version(BUILD_API_VERSION);
        self.list(&request).await
    }

    /// Creates a build definition from its JSON document.
    ///
    /// The document format is owned by the server; it is passed through
    /// unchanged.
    pub async fn create_build_definition(
        &self,
        project: &str,
        definition: &Value,
    ) -> Result<BuildDefinition> {
        let request = Request::post("build/definitions")
            .project(project)
            .api_version(BUILD_API_VERSION)
            .json(definition)?;
        self.send_json(&request).await
    }

    /// Lists the artifacts published by build `build_id`.
    pub async fn list_build_artifacts(
        &self,
        project: &str,
        build_id: u64,
    ) -> Result<Vec<BuildArtifact>> {
        let request = Request::get(format!("build/builds/{}/artifacts", build_id))
            .project(project)
            .api_version(BUILD_API_VERSION);
        self.list(&request).await
    }

    /// Downloads artifact `name` of build `build_id` as a zip archive to
    /// `destination`.
    pub async fn download_build_artifact(
        &self,
        project: &str,
        build_id: u64,
        name: &str,
        destination: impl AsRef<Path>,
    ) -> Result<()> {
        let request = Request::get(format!("build/builds/{}/artifacts", build_id))
            .project(project)
            .api_version(BUILD_API_VERSION)
            .query("artifactName", name)
            .query("$format", "zip")
            .output(destination.as_ref());
        self.send(&request).await?;
        Ok(())
    }
}
