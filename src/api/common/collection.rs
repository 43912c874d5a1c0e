//
//  vsts-client
//  api/common/collection.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Collection envelope for list endpoints
//!
//! Every list endpoint wraps its results the same way:
//!
//! ```json
//! {"count": 2, "value": [{...}, {...}]}
//! ```
//!
//! [`CollectionResponse`] decodes that shape so callers receive a `Vec<T>`
//! instead of reaching into `value` at each call site.

use serde::{Deserialize, Serialize};

/// The `{"count": n, "value": [...]}` envelope returned by list endpoints.
///
/// # Example
///
/// ```rust
/// use vsts_client::api::common::CollectionResponse;
///
/// let json = r#"{"count": 2, "value": ["a", "b"]}"#;
/// let response: CollectionResponse<String> = serde_json::from_str(json).unwrap();
/// assert_eq!(response.len(), 2);
/// assert_eq!(response.into_items(), vec!["a".to_string(), "b".to_string()]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionResponse<T> {
    /// Number of items reported by the server.
    #[serde(default)]
    pub count: Option<u32>,

    /// The items themselves. Missing `value` decodes as empty.
    #[serde(default = "Vec::new", rename = "value")]
    pub items: Vec<T>,
}

impl<T> CollectionResponse<T> {
    /// Consumes the envelope and returns its items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_value_is_empty() {
        let response: CollectionResponse<u32> = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(response.is_empty());
        assert_eq!(response.count, Some(0));
    }
}
