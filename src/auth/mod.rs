//
//  vsts-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! The service authenticates every request with HTTP Basic credentials made of
//! a user identifier and a personal access token. This module builds that
//! header and provides the token plumbing used by the `vsts` binary.
//!
//! ## Module Structure
//!
//! - [`authorization_header`]: Builds the `Authorization` header value
//! - [`token`]: Reading and format-checking tokens
//! - [`keyring`]: Secure token storage using the system keyring
//!
//! ## Example
//!
//! ```rust
//! use vsts_client::auth::authorization_header;
//!
//! assert_eq!(authorization_header("alice", "secret"), "Basic YWxpY2U6c2VjcmV0");
//! ```

mod keyring;
mod token;

pub use keyring::*;
pub use token::*;

use base64::{engine::general_purpose::STANDARD, Engine};

/// Builds the HTTP Basic `Authorization` header value for `user` and `token`.
///
/// The value is `Basic ` followed by the standard (padded) base64 encoding of
/// `user:token`. The output is stable byte-for-byte; the server rejects any
/// other alphabet or prefix.
///
/// # Example
///
/// ```rust
/// use vsts_client::auth::authorization_header;
///
/// let header = authorization_header("bob", "tok123");
/// assert_eq!(header, "Basic Ym9iOnRvazEyMw==");
/// ```
pub fn authorization_header(user: &str, token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", user, token)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header_known_value() {
        assert_eq!(
            authorization_header("alice", "secret"),
            "Basic YWxpY2U6c2VjcmV0"
        );
    }

    #[test]
    fn test_authorization_header_round_trips_pairs() {
        for (user, token) in [("bob", "tok123"), ("", "pat"), ("me@corp.com", "a:b")] {
            let header = authorization_header(user, token);
            let encoded = header.strip_prefix("Basic ").unwrap();
            let decoded = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
            assert_eq!(decoded, format!("{}:{}", user, token));
        }
    }
}
