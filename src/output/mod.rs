//
//  vsts-client
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Formatting
//!
//! Commands print either a table for people or pretty JSON for scripts
//! (`--json`). Types that can be listed implement [`TableOutput`], which
//! describes one table row; [`OutputWriter::write_list`] turns a slice of
//! them into a single table.

mod resources;
mod table;

pub use table::*;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// JSON when `json` is set, tables otherwise.
    pub fn from_flag(json: bool) -> Self {
        Self::new(if json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        })
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Prints a single value: pretty JSON, or one `key: value` line per
    /// column.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
            OutputFormat::Table => {
                for (key, cell) in T::headers().iter().zip(value.row(self.color)) {
                    print_field(key, &cell, self.color);
                }
            }
        }
        Ok(())
    }

    pub fn write_list<T: Serialize + TableOutput>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(values)?),
            OutputFormat::Table if values.is_empty() => self.write_info("No results"),
            OutputFormat::Table => render_table(values, self.color).print(),
        }
        Ok(())
    }

    /// Prints an arbitrary JSON value (used by `vsts api`).
    pub fn write_value(&self, value: &serde_json::Value) -> anyhow::Result<()> {
        if !value.is_null() {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(())
    }

    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.format == OutputFormat::Json {
            return;
        }
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// A type that renders as one table row.
pub trait TableOutput {
    fn headers() -> &'static [&'static str];

    fn row(&self, color: bool) -> Vec<String>;
}

/// Builds the table for `values` without printing it.
pub fn render_table<T: TableOutput>(values: &[T], color: bool) -> TableBuilder {
    TableBuilder::new()
        .color(color)
        .headers(T::headers().iter().copied())
        .rows(values.iter().map(|value| value.row(color)))
}

pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}
