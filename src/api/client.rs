//
//  vsts-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the VSTS REST API
//!
//! [`VstsClient`] is the single place where requests leave the process. Every
//! resource operation in this crate builds a [`Request`] and hands it to
//! [`VstsClient::send`] (or one of its typed wrappers).
//!
//! ## Features
//!
//! - URL construction from session + request descriptor
//! - Basic authentication header injection
//! - JSON and JSON-Patch bodies
//! - Streaming binary responses to a file
//! - Error messages extracted from the service's error body
//! - Custom User-Agent header

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::api::common::{CollectionResponse, Result, VstsError};
use crate::api::poller::ExistencePoller;
use crate::api::request::Request;
use crate::session::Session;

/// Extracts a readable message from an error response.
///
/// The service answers failures with a body such as:
///
/// ```json
/// {"$id": "1", "message": "TF200016: The following project does not exist: Demo.", "typeKey": "ProjectDoesNotExistException"}
/// ```
///
/// The `message` field is used when present; otherwise the raw body is kept.
pub fn format_api_error(status: StatusCode, body: &str) -> VstsError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body.to_string()
            }
        });

    VstsError::Status { status, message }
}

/// The endpoint invoker.
///
/// Holds an immutable [`Session`] and the underlying HTTP client. The client
/// is cheap to share across tasks: nothing in it changes after construction.
///
/// # Example
///
/// ```rust,no_run
/// use vsts_client::api::{Request, VstsClient};
/// use vsts_client::session::{Session, SessionTarget};
///
/// # async fn example() -> vsts_client::Result<()> {
/// let session = Session::new(SessionTarget::account("contoso"), "alice", "pat")?;
/// let client = VstsClient::new(session)?;
///
/// let projects = client.send(&Request::get("projects")).await?;
/// println!("{}", projects["count"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct VstsClient {
    http: Client,
    session: Session,
    poller: ExistencePoller,
}

impl VstsClient {
    /// Creates a client for `session` with the default existence poller.
    ///
    /// No request timeout is configured; the HTTP client's default applies.
    pub fn new(session: Session) -> Result<Self> {
        Ok(Self {
            http: Client::builder()
                .user_agent(format!("vsts-client/{}", crate::VERSION))
                .build()?,
            session,
            poller: ExistencePoller::new(),
        })
    }

    /// Replaces the poller used by the `wait_*` operations.
    pub fn with_poller(mut self, poller: ExistencePoller) -> Self {
        self.poller = poller;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn poller(&self) -> &ExistencePoller {
        &self.poller
    }

    /// Sends `request` and returns the parsed JSON response.
    ///
    /// - PUT/POST/PATCH send the body as `application/json`
    ///   (`application/json-patch+json` for PATCH).
    /// - When the request has an output file, the response body is streamed
    ///   to it and `Value::Null` is returned.
    /// - Empty response bodies parse as `Value::Null`.
    ///
    /// # Errors
    ///
    /// - [`VstsError::InvalidRequest`] if the descriptor breaks an invariant
    ///   (checked before any I/O).
    /// - [`VstsError::Status`] for non-2xx responses, [`VstsError::Network`]
    ///   for transport failures. Nothing is retried.
    pub async fn send(&self, request: &Request) -> Result<Value> {
        let response = self.execute(request).await?;

        if let Some(path) = request.output_path() {
            let mut response = response;
            let mut file = tokio::fs::File::create(path).await?;
            let mut written = 0usize;
            while let Some(chunk) = response.chunk().await? {
                file.write_all(&chunk).await?;
                written += chunk.len();
            }
            file.flush().await?;
            debug!(path = %path.display(), bytes = written, "Wrote response to file");
            return Ok(Value::Null);
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Sends `request` and deserializes the response into `T`.
    pub async fn send_json<T: DeserializeOwned>(&self, request: &Request) -> Result<T> {
        let value = self.send(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Sends a list request and unwraps the `{"count", "value"}` envelope.
    pub async fn list<T: DeserializeOwned>(&self, request: &Request) -> Result<Vec<T>> {
        let envelope: CollectionResponse<T> = self.send_json(request).await?;
        Ok(envelope.into_items())
    }

    async fn execute(&self, request: &Request) -> Result<Response> {
        request.validate()?;

        let verb = request.verb();
        let url = request.url(&self.session)?;
        debug!(method = %verb, url = %url, "Sending request");

        let mut builder = self
            .http
            .request(verb.method(), url)
            .header(AUTHORIZATION, self.session.authorization());

        if verb.sends_body() {
            builder = builder
                .header(CONTENT_TYPE, verb.content_type())
                .body(request.body_text().unwrap_or_default().to_string());
        }

        let response = builder.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "Received response");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(format_api_error(status, &text));
        }

        Ok(response)
    }
}
