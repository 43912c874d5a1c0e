//
//  vsts-client
//  output/resources.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use crate::api::{
    Build, BuildArtifact, BuildDefinition, GitRepository, OperationReference,
    PolicyConfiguration, Process, Project, QueryHierarchyItem, WorkItem, WorkItemReference,
};

use super::{format_bool, format_status, truncate, TableOutput};

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

impl TableOutput for Project {
    fn headers() -> &'static [&'static str] {
        &["NAME", "ID", "STATE", "DESCRIPTION"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            self.id.clone(),
            format_status(self.state.as_deref().unwrap_or("-"), color),
            truncate(self.description.as_deref().unwrap_or(""), 50),
        ]
    }
}

impl TableOutput for Process {
    fn headers() -> &'static [&'static str] {
        &["NAME", "ID", "TYPE", "DEFAULT"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            self.id.clone(),
            or_dash(self.process_type.as_deref()),
            format_bool(self.is_default, color),
        ]
    }
}

impl TableOutput for OperationReference {
    fn headers() -> &'static [&'static str] {
        &["OPERATION", "STATUS"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.clone(),
            format_status(self.status.as_deref().unwrap_or("-"), color),
        ]
    }
}

impl TableOutput for WorkItem {
    fn headers() -> &'static [&'static str] {
        &["ID", "TYPE", "STATE", "TITLE"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            or_dash(self.field_str("System.WorkItemType")),
            format_status(self.field_str("System.State").unwrap_or("-"), color),
            truncate(self.title().unwrap_or(""), 60),
        ]
    }
}

impl TableOutput for WorkItemReference {
    fn headers() -> &'static [&'static str] {
        &["ID", "URL"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![self.id.to_string(), or_dash(self.url.as_deref())]
    }
}

impl TableOutput for QueryHierarchyItem {
    fn headers() -> &'static [&'static str] {
        &["PATH", "FOLDER", "ID"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.path.clone().unwrap_or_else(|| self.name.clone()),
            format_bool(self.is_folder, color),
            self.id.clone(),
        ]
    }
}

impl TableOutput for GitRepository {
    fn headers() -> &'static [&'static str] {
        &["NAME", "ID", "DEFAULT BRANCH", "CLONE URL"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            self.id.clone(),
            or_dash(self.default_branch.as_deref()),
            or_dash(self.remote_url.as_deref()),
        ]
    }
}

impl TableOutput for PolicyConfiguration {
    fn headers() -> &'static [&'static str] {
        &["ID", "TYPE", "ENABLED", "BLOCKING"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.policy_type
                .display_name
                .clone()
                .unwrap_or_else(|| self.policy_type.id.clone()),
            format_bool(self.is_enabled, color),
            format_bool(self.is_blocking, color),
        ]
    }
}

impl TableOutput for Build {
    fn headers() -> &'static [&'static str] {
        &["ID", "NUMBER", "DEFINITION", "STATUS", "RESULT", "BRANCH"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            or_dash(self.build_number.as_deref()),
            self.definition
                .as_ref()
                .map(|d| d.name.clone())
                .unwrap_or_else(|| "-".to_string()),
            format_status(self.status.as_deref().unwrap_or("-"), color),
            format_status(self.result.as_deref().unwrap_or("-"), color),
            or_dash(self.source_branch.as_deref()),
        ]
    }
}

impl TableOutput for BuildDefinition {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "PATH", "REVISION"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            or_dash(self.path.as_deref()),
            self.revision
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl TableOutput for BuildArtifact {
    fn headers() -> &'static [&'static str] {
        &["NAME", "TYPE", "DOWNLOAD URL"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        let resource = self.resource.as_ref();
        vec![
            self.name.clone(),
            or_dash(resource.and_then(|r| r.resource_type.as_deref())),
            or_dash(resource.and_then(|r| r.download_url.as_deref())),
        ]
    }
}
