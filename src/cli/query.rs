//
//  vsts-client
//  cli/query.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::QueryHierarchyItem;

use super::GlobalOptions;

const DEFAULT_FOLDER: &str = "Shared Queries";

#[derive(Args, Debug)]
pub struct QueryCommand {
    #[command(subcommand)]
    pub command: QuerySubcommand,
}

#[derive(Subcommand, Debug)]
pub enum QuerySubcommand {
    /// List saved queries one level below the root folders
    #[command(visible_alias = "ls")]
    List,

    /// Save a WIQL query
    Create(CreateArgs),

    /// Delete a saved query
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    pub name: String,

    pub wiql: String,

    #[arg(long, default_value = DEFAULT_FOLDER)]
    pub folder: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub name: String,

    #[arg(long, default_value = DEFAULT_FOLDER)]
    pub folder: String,
}

impl QueryCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let (client, connection) = global.client()?;
        let project = connection.require_project()?;
        let out = global.output();

        match &self.command {
            QuerySubcommand::List => {
                let roots = client.list_queries(project).await?;
                out.write_list(&flatten(roots))
            }
            QuerySubcommand::Create(args) => {
                let query = client
                    .create_query(project, &args.folder, &args.name, &args.wiql)
                    .await?;
                if global.json {
                    return out.write(&query);
                }
                out.write_success(&format!("Saved query {}/{}", args.folder, query.name));
                Ok(())
            }
            QuerySubcommand::Delete(args) => {
                client.remove_query(project, &args.folder, &args.name).await?;
                out.write_success(&format!("Deleted query {}/{}", args.folder, args.name));
                Ok(())
            }
        }
    }
}

/// Lists each root folder followed by its children.
fn flatten(roots: Vec<QueryHierarchyItem>) -> Vec<QueryHierarchyItem> {
    let mut items = Vec::new();
    for mut root in roots {
        let children = std::mem::take(&mut root.children);
        items.push(root);
        items.extend(children);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_puts_children_after_folder() {
        let roots: Vec<QueryHierarchyItem> = serde_json::from_value(json!([
            {"id": "f1", "name": "My Queries", "isFolder": true, "children": [
                {"id": "q1", "name": "Mine"}
            ]},
            {"id": "f2", "name": "Shared Queries", "isFolder": true}
        ]))
        .unwrap();

        let names: Vec<String> = flatten(roots).into_iter().map(|q| q.name).collect();
        assert_eq!(names, vec!["My Queries", "Mine", "Shared Queries"]);
    }
}
