//
//  vsts-client
//  session/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Session
//!
//! A [`Session`] is the immutable bundle of host, collection and credential
//! settings that every API call is made against. It is built once and then
//! shared by reference (or cloned) for the lifetime of a client.
//!
//! ## Hosted vs On-Premises
//!
//! | Target | Host |
//! |--------|------|
//! | `SessionTarget::Account("contoso")` | `contoso.visualstudio.com` |
//! | `SessionTarget::Server("tfs.example.com")` | `tfs.example.com` |
//!
//! ## Usage
//!
//! ```rust
//! use vsts_client::session::{Scheme, Session, SessionTarget};
//!
//! let session = Session::new(SessionTarget::account("contoso"), "alice", "secret")?
//!     .with_collection("Engineering")
//!     .with_scheme(Scheme::Https);
//!
//! assert_eq!(session.host_url(), "https://contoso.visualstudio.com");
//! assert_eq!(session.collection(), "Engineering");
//! # Ok::<(), vsts_client::VstsError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::common::{Result, VstsError};
use crate::auth::authorization_header;

/// Domain suffix appended to account short-names.
pub const HOSTED_DOMAIN: &str = "visualstudio.com";

/// Collection used when none is configured.
pub const DEFAULT_COLLECTION: &str = "DefaultCollection";

/// Transport scheme used to reach the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Plain HTTP, typically only for on-premises servers or tests.
    Http,
    /// HTTPS (default).
    #[default]
    Https,
}

impl Scheme {
    /// Returns the URL scheme string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = VstsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(VstsError::InvalidRequest(format!(
                "unknown scheme '{}', expected http or https",
                other
            ))),
        }
    }
}

/// Identifies which service instance a session talks to.
///
/// The two shapes are mutually exclusive: a hosted account implies the
/// [`HOSTED_DOMAIN`] suffix, a server is used verbatim (and may carry a port).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTarget {
    /// Hosted account short-name, e.g. `contoso`.
    Account(String),
    /// Explicit hostname, e.g. `tfs.example.com:8080`.
    Server(String),
}

impl SessionTarget {
    /// Creates a hosted-account target.
    pub fn account(name: impl Into<String>) -> Self {
        Self::Account(name.into())
    }

    /// Creates an explicit-server target.
    pub fn server(host: impl Into<String>) -> Self {
        Self::Server(host.into())
    }

    /// Returns the hostname (without scheme) this target resolves to.
    pub fn host(&self) -> String {
        match self {
            Self::Account(account) => format!("{}.{}", account, HOSTED_DOMAIN),
            Self::Server(server) => server.clone(),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Account(name) | Self::Server(name) => name,
        }
    }
}

/// Immutable connection settings shared by every request.
///
/// `Session` never changes after construction; the `with_*` methods consume
/// and return a new value. The access token is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    target: SessionTarget,
    collection: String,
    user: String,
    token: String,
    scheme: Scheme,
}

impl Session {
    /// Creates a session for `target` with the given credentials.
    ///
    /// The collection defaults to [`DEFAULT_COLLECTION`] and the scheme to
    /// HTTPS.
    ///
    /// # Errors
    ///
    /// Returns [`VstsError::InvalidRequest`] if the target name, user or token
    /// is empty.
    pub fn new(
        target: SessionTarget,
        user: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self> {
        let user = user.into();
        let token = token.into();

        if target.name().trim().is_empty() {
            return Err(VstsError::InvalidRequest(
                "an account or server name is required".to_string(),
            ));
        }
        if user.is_empty() {
            return Err(VstsError::InvalidRequest("a user is required".to_string()));
        }
        if token.is_empty() {
            return Err(VstsError::InvalidRequest(
                "an access token is required".to_string(),
            ));
        }

        Ok(Self {
            target,
            collection: DEFAULT_COLLECTION.to_string(),
            user,
            token,
            scheme: Scheme::default(),
        })
    }

    /// Overrides the collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Overrides the transport scheme.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn target(&self) -> &SessionTarget {
        &self.target
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns `{scheme}://{host}` for this session.
    pub fn host_url(&self) -> String {
        format!("{}://{}", self.scheme, self.target.host())
    }

    /// Returns `{scheme}://{host}/{collection}`, the URL source-control tools
    /// expect when addressing the collection.
    pub fn collection_url(&self) -> String {
        format!("{}/{}", self.host_url(), self.collection)
    }

    /// Returns the `Authorization` header value for this session's credentials.
    pub fn authorization(&self) -> String {
        authorization_header(&self.user, &self.token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("target", &self.target)
            .field("collection", &self.collection)
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .field("scheme", &self.scheme)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_host_url() {
        let session = Session::new(SessionTarget::account("contoso"), "alice", "secret").unwrap();
        assert_eq!(session.host_url(), "https://contoso.visualstudio.com");
        assert_eq!(session.collection(), DEFAULT_COLLECTION);
        assert_eq!(
            session.collection_url(),
            "https://contoso.visualstudio.com/DefaultCollection"
        );
    }

    #[test]
    fn test_server_host_url_with_overrides() {
        let session = Session::new(SessionTarget::server("tfs.local:8080"), "alice", "secret")
            .unwrap()
            .with_scheme(Scheme::Http)
            .with_collection("Engineering");
        assert_eq!(session.host_url(), "http://tfs.local:8080");
        assert_eq!(session.collection_url(), "http://tfs.local:8080/Engineering");
    }

    #[test]
    fn test_required_fields() {
        assert!(Session::new(SessionTarget::account(""), "alice", "secret").is_err());
        assert!(Session::new(SessionTarget::account("contoso"), "", "secret").is_err());
        assert!(Session::new(SessionTarget::account("contoso"), "alice", "").is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new(SessionTarget::account("contoso"), "alice", "secret").unwrap();
        let debug = format!("{:?}", session);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_scheme_parse() {
        assert_eq!("HTTP".parse::<Scheme>().unwrap(), Scheme::Http);
        assert_eq!("https".parse::<Scheme>().unwrap(), Scheme::Https);
        assert!("ftp".parse::<Scheme>().is_err());
    }
}
