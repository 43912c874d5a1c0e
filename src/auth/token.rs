//
//  vsts-client
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Personal Access Tokens
//!
//! Helpers for accepting a personal access token from the user. Tokens are
//! created in the web portal under *Security > Personal access tokens* and
//! are sent as the password half of HTTP Basic credentials.
//!
//! ## Example
//!
//! ```rust,no_run
//! use vsts_client::auth::{read_token_from_stdin, validate_token};
//!
//! let token = read_token_from_stdin()?;
//! if !validate_token(&token) {
//!     anyhow::bail!("Invalid token format");
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::Result;

/// Reads a token from standard input.
///
/// Only the first line is read; surrounding whitespace is trimmed. Used for
/// piped input: `echo "$PAT" | vsts auth login --with-token`.
pub fn read_token_from_stdin() -> Result<String> {
    use std::io::{self, BufRead};

    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;

    Ok(line.trim().to_string())
}

/// Checks that a token is non-empty and contains no whitespace.
///
/// This is a format check only; it does not contact the server.
///
/// ```rust
/// use vsts_client::auth::validate_token;
///
/// assert!(validate_token("x7q2lmb4kzr5"));
/// assert!(!validate_token(""));
/// assert!(!validate_token("has space"));
/// ```
pub fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}
