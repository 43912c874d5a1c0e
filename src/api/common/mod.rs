//
//  vsts-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Shared types used by every resource module: the crate-wide error type,
//! the collection envelope returned by list endpoints, and small reference
//! types that appear inside many resources.
//!
//! # Overview
//!
//! - [`VstsError`] - Unified error type for all operations
//! - [`ErrorKind`] - Coarse classification of a [`VstsError`]
//! - [`CollectionResponse`] - The `{"count": n, "value": [...]}` envelope
//! - [`IdentityRef`] - Lightweight user/identity reference
//!
//! # Example
//!
//! ```rust
//! use vsts_client::api::common::{ErrorKind, VstsError};
//!
//! fn describe(err: &VstsError) -> &'static str {
//!     match err.kind() {
//!         ErrorKind::NotFound => "nothing matched",
//!         ErrorKind::TimeoutBudgetExceeded => "gave up waiting",
//!         _ => "request failed",
//!     }
//! }
//!
//! let err = VstsError::NotFound {
//!     kind: "project".to_string(),
//!     reference: "Missing".to_string(),
//! };
//! assert_eq!(describe(&err), "nothing matched");
//! ```

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod collection;

pub use collection::*;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, VstsError>;

/// Unified error type for all VSTS operations.
///
/// # Variants
///
/// | Variant | Kind | Raised when |
/// |---------|------|-------------|
/// | `Status` | Transport | The server answered with a non-2xx status |
/// | `Network` | Transport | The request never completed |
/// | `NotFound` | NotFound | A name lookup matched nothing |
/// | `Timeout` | TimeoutBudgetExceeded | The existence poller ran out of attempts |
/// | `ToolMissing` | Precondition | An external tool is not on `PATH` |
/// | `ToolFailed` | Precondition | An external tool exited unsuccessfully |
/// | `InvalidRequest` | InvalidRequest | A request descriptor broke an invariant |
/// | `Url` | InvalidRequest | The request URL could not be built |
/// | `Io` | Io | Reading or writing a local file failed |
/// | `Json` | Serialization | A body could not be encoded or decoded |
#[derive(Error, Debug)]
pub enum VstsError {
    /// The server returned a non-success status code.
    ///
    /// `message` carries the server's own error message when the body
    /// contained one, otherwise the raw body.
    #[error("API error ({status}): {message}")]
    Status {
        /// The HTTP status code.
        status: StatusCode,
        /// Human-readable message extracted from the response body.
        message: String,
    },

    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A name-to-identifier lookup found no match.
    #[error("{kind} '{reference}' not found")]
    NotFound {
        /// Resource kind, e.g. `project` or `repository`.
        kind: String,
        /// The name or identifier that was looked up.
        reference: String,
    },

    /// The existence poller exhausted its attempt budget.
    #[error("Timed out waiting on '{resource}' after {attempts} attempts")]
    Timeout {
        /// Name of the resource being waited on.
        resource: String,
        /// Number of lookups performed.
        attempts: u32,
    },

    /// A required external tool is not installed.
    #[error("Required tool '{0}' was not found on PATH")]
    ToolMissing(String),

    /// An external tool exited with a failure status.
    #[error("'{tool}' failed: {status}")]
    ToolFailed {
        /// The command that was run.
        tool: String,
        /// Exit status description.
        status: String,
    },

    /// A request descriptor or session broke one of its invariants.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The request URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A local file operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a [`VstsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Non-success status or network failure.
    Transport,
    /// A lookup by name produced no match.
    NotFound,
    /// The existence poller gave up.
    TimeoutBudgetExceeded,
    /// A local precondition (external tool) was not met.
    Precondition,
    /// The request itself was malformed.
    InvalidRequest,
    /// Local file I/O failed.
    Io,
    /// JSON encoding or decoding failed.
    Serialization,
}

impl VstsError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Status { .. } | Self::Network(_) => ErrorKind::Transport,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Timeout { .. } => ErrorKind::TimeoutBudgetExceeded,
            Self::ToolMissing(_) | Self::ToolFailed { .. } => ErrorKind::Precondition,
            Self::InvalidRequest(_) | Self::Url(_) => ErrorKind::InvalidRequest,
            Self::Io(_) => ErrorKind::Io,
            Self::Json(_) => ErrorKind::Serialization,
        }
    }

    /// Returns the HTTP status for `Status` errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn not_found(kind: &str, reference: &str) -> Self {
        Self::NotFound {
            kind: kind.to_string(),
            reference: reference.to_string(),
        }
    }
}

/// Lightweight identity reference embedded in many resources.
///
/// Appears as `createdBy`, `requestedFor`, `lastChangedBy` and similar fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRef {
    /// Identity GUID.
    #[serde(default)]
    pub id: Option<String>,

    /// Display name, e.g. `Alice Example`.
    pub display_name: String,

    /// Unique name, usually the sign-in address.
    #[serde(default)]
    pub unique_name: Option<String>,
}
