//
//  vsts-client
//  api/resolve.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Identifier Resolution
//!
//! Most endpoints address resources by a server-issued GUID, while users
//! usually know them by name. [`resolve_id`] accepts either: a GUID-shaped
//! reference is used directly, anything else is looked up by listing the
//! resources and matching the name exactly.
//!
//! Nothing is cached; every call resolves again.

use std::future::Future;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::api::common::{Result, VstsError};

static GUID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\{?[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}\}?$",
    )
    .expect("GUID pattern is valid")
});

/// Resources that can be found by name and addressed by id.
pub trait Named {
    fn name(&self) -> &str;
    fn id(&self) -> &str;
}

/// Returns `true` if `reference` is shaped like a GUID.
///
/// Accepts the canonical `8-4-4-4-12` hex form, optionally wrapped in braces.
///
/// ```rust
/// use vsts_client::api::is_guid;
///
/// assert!(is_guid("6ce954b1-ce1f-45d1-b94d-e6bf2464ba2c"));
/// assert!(is_guid("{6CE954B1-CE1F-45D1-B94D-E6BF2464BA2C}"));
/// assert!(!is_guid("Fabrikam-Fiber"));
/// ```
pub fn is_guid(reference: &str) -> bool {
    GUID_PATTERN.is_match(reference)
}

/// Finds the first resource whose name equals `name` exactly.
pub fn find_by_name<T: Named>(items: Vec<T>, name: &str) -> Option<T> {
    items.into_iter().find(|item| item.name() == name)
}

/// Resolves a name-or-id reference to an identifier.
///
/// When `reference` is already a GUID it is returned unchanged and `lookup`
/// is never called. Otherwise `lookup` lists the candidates and the first
/// exact name match supplies the id.
///
/// # Errors
///
/// - [`VstsError::NotFound`] naming `kind` and `reference` when nothing
///   matches.
/// - Any error from `lookup`, unchanged.
pub async fn resolve_id<T, F, Fut>(reference: &str, kind: &str, lookup: F) -> Result<String>
where
    T: Named,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    if is_guid(reference) {
        return Ok(reference.to_string());
    }

    debug!(kind, reference, "Resolving name to identifier");
    let candidates = lookup().await?;

    find_by_name(candidates, reference)
        .map(|item| item.id().to_string())
        .ok_or_else(|| VstsError::not_found(kind, reference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Thing {
        id: &'static str,
        name: &'static str,
    }

    impl Named for Thing {
        fn name(&self) -> &str {
            self.name
        }

        fn id(&self) -> &str {
            self.id
        }
    }

    fn things() -> Vec<Thing> {
        vec![
            Thing {
                id: "11111111-1111-1111-1111-111111111111",
                name: "Alpha",
            },
            Thing {
                id: "22222222-2222-2222-2222-222222222222",
                name: "Beta",
            },
        ]
    }

    #[test]
    fn test_is_guid() {
        assert!(is_guid("eb6e4656-77fc-42a1-9181-4c6d8e9da5d1"));
        assert!(is_guid("{eb6e4656-77fc-42a1-9181-4c6d8e9da5d1}"));
        assert!(!is_guid("eb6e4656-77fc-42a1-9181"));
        assert!(!is_guid("my project"));
        assert!(!is_guid(""));
    }

    #[tokio::test]
    async fn test_guid_skips_lookup() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let id = resolve_id("eb6e4656-77fc-42a1-9181-4c6d8e9da5d1", "project", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(things())
        })
        .await
        .unwrap();

        assert_eq!(id, "eb6e4656-77fc-42a1-9181-4c6d8e9da5d1");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_name_resolves_to_id() {
        let id = resolve_id("Beta", "project", || async { Ok(things()) })
            .await
            .unwrap();
        assert_eq!(id, "22222222-2222-2222-2222-222222222222");
    }

    #[tokio::test]
    async fn test_no_match_is_not_found() {
        let err = resolve_id("Gamma", "repository", || async { Ok(things()) })
            .await
            .unwrap_err();
        match err {
            VstsError::NotFound { kind, reference } => {
                assert_eq!(kind, "repository");
                assert_eq!(reference, "Gamma");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_match_is_case_sensitive() {
        let err = resolve_id("alpha", "project", || async { Ok(things()) })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), crate::api::common::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_lookup_error_propagates() {
        let err = resolve_id::<Thing, _, _>("Alpha", "project", || async {
            Err(VstsError::InvalidRequest("offline".to_string()))
        })
        .await
        .unwrap_err();
        assert!(matches!(err, VstsError::InvalidRequest(_)));
    }
}
