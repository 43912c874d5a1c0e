//
//  vsts-client
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Descriptors
//!
//! A [`Request`] describes one call to the REST API: which verb, which path
//! under `_apis/`, whether it is scoped to a project, the api-version, query
//! parameters, an optional JSON body and an optional file to stream the
//! response into. It is built per call and handed to
//! [`VstsClient::send`](super::VstsClient::send).
//!
//! ## URL Layout
//!
//! ```text
//! {scheme}://{host}/{collection}[/{project}]/_apis/{path}?{query}&api-version={v}
//! ```
//!
//! ## Example
//!
//! ```rust
//! use vsts_client::api::{Request, Verb};
//! use vsts_client::session::{Session, SessionTarget};
//!
//! let session = Session::new(SessionTarget::account("contoso"), "alice", "secret")?;
//! let request = Request::get("wit/queries")
//!     .project("MyProj")
//!     .query("$depth", "1");
//!
//! let url = request.url(&session)?;
//! assert_eq!(url.path(), "/DefaultCollection/MyProj/_apis/wit/queries");
//! assert_eq!(url.query(), Some("%24depth=1&api-version=1.0"));
//! # Ok::<(), vsts_client::VstsError>(())
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::api::common::{Result, VstsError};
use crate::session::Session;

/// api-version sent when a request does not choose one.
pub const DEFAULT_API_VERSION: &str = "1.0";

/// Query key reserved for the api-version.
const API_VERSION_KEY: &str = "api-version";

/// Content type for ordinary JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Content type for JSON-Patch bodies (sent with PATCH).
pub const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";

/// HTTP verbs accepted by the REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verb {
    #[default]
    Get,
    Put,
    Post,
    Delete,
    Patch,
}

impl Verb {
    /// Returns the matching `reqwest` method.
    pub fn method(&self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Put => Method::PUT,
            Self::Post => Method::POST,
            Self::Delete => Method::DELETE,
            Self::Patch => Method::PATCH,
        }
    }

    /// True for the verbs that carry a request body.
    pub fn sends_body(&self) -> bool {
        matches!(self, Self::Put | Self::Post | Self::Patch)
    }

    /// Content type used for the body of this verb.
    ///
    /// PATCH bodies are JSON-Patch documents; every other body is plain JSON.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Patch => JSON_PATCH_CONTENT_TYPE,
            _ => JSON_CONTENT_TYPE,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method().as_str())
    }
}

impl FromStr for Verb {
    type Err = VstsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "PUT" => Ok(Self::Put),
            "POST" => Ok(Self::Post),
            "DELETE" => Ok(Self::Delete),
            "PATCH" => Ok(Self::Patch),
            other => Err(VstsError::InvalidRequest(format!(
                "unsupported HTTP method '{}'",
                other
            ))),
        }
    }
}

/// Describes a single REST call.
///
/// Use the verb constructors ([`Request::get`], [`Request::post`], ...) and
/// chain the builder methods. Invariants are checked by
/// [`validate`](Self::validate) before anything is sent:
///
/// - a body is only allowed with PUT, POST or PATCH;
/// - an output file is only allowed with GET and no body.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    verb: Verb,
    path: String,
    project: Option<String>,
    api_version: String,
    query: Vec<(String, String)>,
    body: Option<String>,
    output: Option<PathBuf>,
}

impl Request {
    /// Creates a request for `path` (relative to `_apis/`) with the given verb.
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        Self {
            verb,
            path: path.into(),
            project: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            query: Vec::new(),
            body: None,
            output: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Verb::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Verb::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Verb::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Verb::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Verb::Delete, path)
    }

    /// Scopes the request to a project (name or id).
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Scopes the request to a project when one is given.
    pub fn maybe_project(mut self, project: Option<&str>) -> Self {
        self.project = project.map(str::to_string);
        self
    }

    /// Overrides the api-version (default `1.0`).
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Sets a query parameter. A repeated key replaces the earlier value in
    /// place, so insertion order is kept and keys are never duplicated.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.query.push((key, value)),
        }
        self
    }

    /// Attaches a raw JSON body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` and attaches it as the body.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        let body = serde_json::to_string(value)?;
        Ok(self.body(body))
    }

    /// Streams the response body into `path` instead of parsing it.
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn project_segment(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn version(&self) -> &str {
        &self.api_version
    }

    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// Query pairs as they will be sent, with `api-version` last.
    ///
    /// A caller-supplied `api-version` pair is dropped in favour of the
    /// request's explicit version.
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        self.query
            .iter()
            .filter(|(k, _)| k != API_VERSION_KEY)
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .chain(std::iter::once((API_VERSION_KEY, self.api_version.as_str())))
            .collect()
    }

    /// Checks the body and output-file invariants.
    pub fn validate(&self) -> Result<()> {
        if self.body.is_some() && !self.verb.sends_body() {
            return Err(VstsError::InvalidRequest(format!(
                "a request body cannot be sent with {}",
                self.verb
            )));
        }
        if self.output.is_some() && (self.verb != Verb::Get || self.body.is_some()) {
            return Err(VstsError::InvalidRequest(
                "an output file can only be used with a GET request without a body".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the full URL for this request against `session`.
    ///
    /// Path segments are percent-encoded one at a time, so project and query
    /// folder names may contain spaces.
    pub fn url(&self, session: &Session) -> Result<Url> {
        let mut url = Url::parse(&session.host_url())?;

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                VstsError::InvalidRequest(format!(
                    "'{}' cannot be used as a base URL",
                    session.host_url()
                ))
            })?;
            segments.clear();
            segments.push(session.collection());
            if let Some(project) = &self.project {
                segments.push(project);
            }
            segments.push("_apis");
            segments.extend(self.path.split('/').filter(|s| !s.is_empty()));
        }

        url.query_pairs_mut().extend_pairs(self.query_pairs());

        Ok(url)
    }
}
