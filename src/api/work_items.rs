//
//  vsts-client
//  api/work_items.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Work Items
//!
//! Work items (tasks, bugs, user stories, ...) are addressed by a numeric id
//! and carry a bag of typed fields keyed by reference name, e.g.
//! `System.Title` or `Microsoft.VSTS.Common.Priority`.
//!
//! Creating and updating work items uses JSON-Patch: each field becomes an
//! `add` operation on `/fields/{name}`.
//!
//! ```json
//! [{"op": "add", "path": "/fields/System.Title", "value": "Fix the build"}]
//! ```
//!
//! ## API Endpoints
//!
//! ```text
//! GET   {collection}/_apis/wit/workitems/{id}
//! GET   {collection}/_apis/wit/workitems?ids=1,2,3
//! PATCH {collection}/{project}/_apis/wit/workitems/${type}
//! PATCH {collection}/_apis/wit/workitems/{id}
//! POST  {collection}/{project}/_apis/wit/wiql
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::api::client::VstsClient;
use crate::api::common::Result;
use crate::api::request::Request;

/// A work item with its field values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: u64,

    /// Revision number, incremented on every change.
    #[serde(default)]
    pub rev: Option<u64>,

    /// Field reference name to value.
    #[serde(default)]
    pub fields: Map<String, Value>,

    #[serde(default)]
    pub url: Option<String>,
}

impl WorkItem {
    /// Returns the value of `System.Title` if set.
    pub fn title(&self) -> Option<&str> {
        self.field_str("System.Title")
    }

    /// Returns a string field by reference name.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

/// A work item id returned by a WIQL query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItemReference {
    pub id: u64,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WiqlResult {
    #[serde(default)]
    work_items: Vec<WorkItemReference>,
}

/// One JSON-Patch operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonPatchOperation {
    pub op: String,
    pub path: String,
    pub value: Value,
}

impl JsonPatchOperation {
    /// An `add` operation setting field `name` to `value`.
    pub fn add_field(name: &str, value: Value) -> Self {
        Self {
            op: "add".to_string(),
            path: format!("/fields/{}", name),
            value,
        }
    }
}

/// Turns field name/value pairs into a JSON-Patch document, preserving order.
pub fn field_patch(fields: &[(String, Value)]) -> Vec<JsonPatchOperation> {
    fields
        .iter()
        .map(|(name, value)| JsonPatchOperation::add_field(name, value.clone()))
        .collect()
}

impl VstsClient {
    /// Fetches one work item.
    pub async fn get_work_item(&self, id: u64) -> Result<WorkItem> {
        self.send_json(&Request::get(format!("wit/workitems/{}", id)))
            .await
    }

    /// Fetches several work items in one call.
    pub async fn get_work_items(&self, ids: &[u64]) -> Result<Vec<WorkItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.list(&Request::get("wit/workitems").query("ids", ids))
            .await
    }

    /// Creates a work item of `work_item_type` (e.g. `Task`, `Bug`) in
    /// `project` with the given field values.
    pub async fn create_work_item(
        &self,
        project: &str,
        work_item_type: &str,
        fields: &[(String, Value)],
    ) -> Result<WorkItem> {
        let request = Request::patch(format!("wit/workitems/${}", work_item_type))
            .project(project)
            .json(&field_patch(fields))?;
        self.send_json(&request).await
    }

    /// Sets field values on an existing work item.
    pub async fn update_work_item(&self, id: u64, fields: &[(String, Value)]) -> Result<WorkItem> {
        let request =
            Request::patch(format!("wit/workitems/{}", id)).json(&field_patch(fields))?;
        self.send_json(&request).await
    }

    /// Runs a WIQL query in `project` and returns the matching ids.
    pub async fn query_work_items(
        &self,
        project: &str,
        wiql: &str,
    ) -> Result<Vec<WorkItemReference>> {
        let request = Request::post("wit/wiql")
            .project(project)
            .json(&json!({ "query": wiql }))?;
        let result: WiqlResult = self.send_json(&request).await?;
        Ok(result.work_items)
    }
}
