//
//  vsts-client
//  cli/workitem.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Work Item Commands
//!
//! Fields are given as `-f Name=value`. Values that parse as JSON (numbers,
//! booleans, arrays) are sent as such; everything else is a string.
//!
//! ```bash
//! vsts workitem view 42
//! vsts workitem create Task --title "Write docs" -f Microsoft.VSTS.Common.Priority=1
//! vsts workitem update 42 -f System.State=Closed
//! vsts workitem query "SELECT [System.Id] FROM WorkItems WHERE [System.State] = 'Active'"
//! ```

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

use super::{parse_key_value, GlobalOptions};

/// Upper bound on ids fetched after a query.
const MAX_QUERY_RESULTS: usize = 200;

#[derive(Args, Debug)]
pub struct WorkItemCommand {
    #[command(subcommand)]
    pub command: WorkItemSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum WorkItemSubcommand {
    /// Show one or more work items
    View(ViewArgs),

    /// Create a work item in the project
    Create(CreateArgs),

    /// Change fields of a work item
    Update(UpdateArgs),

    /// Run a WIQL query in the project
    Query(QueryArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    #[arg(required = true)]
    pub ids: Vec<u64>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Work item type, e.g. Task, Bug, "User Story"
    pub work_item_type: String,

    /// Shorthand for -f System.Title=...
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Field as Name=value (repeatable)
    #[arg(long = "field", short = 'f', action = clap::ArgAction::Append)]
    pub fields: Vec<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: u64,

    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Field as Name=value (repeatable)
    #[arg(long = "field", short = 'f', action = clap::ArgAction::Append)]
    pub fields: Vec<String>,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    pub wiql: String,

    /// Print only the matching ids
    #[arg(long)]
    pub ids_only: bool,
}

impl WorkItemCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            WorkItemSubcommand::View(args) => view(args, global).await,
            WorkItemSubcommand::Create(args) => create(args, global).await,
            WorkItemSubcommand::Update(args) => update(args, global).await,
            WorkItemSubcommand::Query(args) => query(args, global).await,
        }
    }
}

async fn view(args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
    let (client, _) = global.client()?;
    let out = global.output();

    if let [id] = args.ids.as_slice() {
        let item = client.get_work_item(*id).await?;
        out.write(&item)
    } else {
        let items = client.get_work_items(&args.ids).await?;
        out.write_list(&items)
    }
}

async fn create(args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
    let fields = collect_fields(args.title.as_deref(), &args.fields)?;
    if fields.is_empty() {
        bail!("Give at least --title or one --field");
    }

    let (client, connection) = global.client()?;
    let project = connection.require_project()?;
    let item = client
        .create_work_item(project, &args.work_item_type, &fields)
        .await?;

    let out = global.output();
    if global.json {
        return out.write(&item);
    }
    out.write_success(&format!("Created {} {}", args.work_item_type, item.id));
    Ok(())
}

async fn update(args: &UpdateArgs, global: &GlobalOptions) -> Result<()> {
    let fields = collect_fields(args.title.as_deref(), &args.fields)?;
    if fields.is_empty() {
        bail!("Nothing to update");
    }

    let (client, _) = global.client()?;
    let item = client.update_work_item(args.id, &fields).await?;

    let out = global.output();
    if global.json {
        return out.write(&item);
    }
    out.write_success(&format!(
        "Updated work item {} (rev {})",
        item.id,
        item.rev.unwrap_or_default()
    ));
    Ok(())
}

async fn query(args: &QueryArgs, global: &GlobalOptions) -> Result<()> {
    let (client, connection) = global.client()?;
    let project = connection.require_project()?;
    let refs = client.query_work_items(project, &args.wiql).await?;

    let out = global.output();
    if args.ids_only {
        return out.write_list(&refs);
    }

    if refs.len() > MAX_QUERY_RESULTS {
        out.write_warning(&format!(
            "Showing the first {} of {} results",
            MAX_QUERY_RESULTS,
            refs.len()
        ));
    }
    let ids: Vec<u64> = refs.iter().take(MAX_QUERY_RESULTS).map(|r| r.id).collect();
    let items = client.get_work_items(&ids).await?;
    out.write_list(&items)
}

/// Builds the ordered field list, with `--title` first.
fn collect_fields(title: Option<&str>, raw: &[String]) -> Result<Vec<(String, Value)>> {
    let mut fields = Vec::with_capacity(raw.len() + 1);
    if let Some(title) = title {
        fields.push(("System.Title".to_string(), Value::String(title.to_string())));
    }
    for pair in raw {
        let (name, value) = parse_key_value(pair)?;
        fields.push((name, parse_field_value(&value)));
    }
    Ok(fields)
}

fn parse_field_value(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_))) => {
            value
        }
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_values() {
        assert_eq!(parse_field_value("1"), json!(1));
        assert_eq!(parse_field_value("true"), json!(true));
        assert_eq!(parse_field_value("Closed"), json!("Closed"));
        assert_eq!(parse_field_value("null"), json!("null"));
        assert_eq!(parse_field_value("\"quoted\""), json!("\"quoted\""));
    }

    #[test]
    fn test_collect_fields_keeps_order() {
        let fields = collect_fields(
            Some("Write docs"),
            &["Microsoft.VSTS.Common.Priority=2".to_string(), "System.Tags=docs".to_string()],
        )
        .unwrap();

        let names: Vec<&str> = fields.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["System.Title", "Microsoft.VSTS.Common.Priority", "System.Tags"]
        );
        assert_eq!(fields[1].1, json!(2));
    }
}
