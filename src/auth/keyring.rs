//
//  vsts-client
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Secure Token Storage
//!
//! Stores personal access tokens in the platform keyring (Keychain on macOS,
//! Secret Service on Linux, Credential Manager on Windows) so they never land
//! in the plain-text configuration file.
//!
//! Entries are keyed by service `vsts-client` and the host the token belongs
//! to, e.g. `contoso.visualstudio.com`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use vsts_client::auth::KeyringStore;
//!
//! let store = KeyringStore::new();
//! store.store("contoso.visualstudio.com", "pat")?;
//! assert!(store.get("contoso.visualstudio.com")?.is_some());
//! store.delete("contoso.visualstudio.com")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::Result;
use keyring::Entry;

/// Service name under which all tokens are stored.
const SERVICE_NAME: &str = "vsts-client";

/// Token storage backed by the system keyring.
pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    /// Creates a store using the default service name.
    ///
    /// No keyring access happens until a method is called.
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Stores (or replaces) the token for `host`.
    pub fn store(&self, host: &str, token: &str) -> Result<()> {
        let entry = Entry::new(&self.service, host)?;
        entry.set_password(token)?;
        Ok(())
    }

    /// Returns the token stored for `host`, or `None` when there is no entry.
    pub fn get(&self, host: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, host)?;
        match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the token for `host`. Deleting a missing entry succeeds.
    pub fn delete(&self, host: &str) -> Result<()> {
        let entry = Entry::new(&self.service, host)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
