//
//  vsts-client
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Table helpers built on `comfy-table`.

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Fluent wrapper around [`Table`] with colored headers.
pub struct TableBuilder {
    table: Table,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            color: console::colors_enabled(),
        }
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if self.color {
            self.table
                .set_header(headers.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
        } else {
            self.table.set_header(headers);
        }
        self
    }

    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            let row: Vec<String> = row.into_iter().map(Into::into).collect();
            self.table.add_row(row);
        }
        self
    }

    pub fn print(self) {
        println!("{}", self.table);
    }

    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Colors a project, build or operation state.
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    use console::style;
    match status.to_ascii_lowercase().as_str() {
        "wellformed" | "succeeded" | "inprogress" | "active" => style(status).green().to_string(),
        "completed" | "partiallysucceeded" => style(status).blue().to_string(),
        "failed" | "canceled" | "deleting" => style(status).red().to_string(),
        "new" | "notstarted" | "queued" | "createpending" => style(status).yellow().to_string(),
        _ => status.to_string(),
    }
}

pub fn format_bool(value: bool, color: bool) -> String {
    if color {
        use console::style;
        if value {
            style("Yes").green().to_string()
        } else {
            style("No").dim().to_string()
        }
    } else if value {
        "Yes".to_string()
    } else {
        "No".to_string()
    }
}

/// Shortens `s` to at most `max_len` characters, marking the cut with `...`.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer description", 10), "a longe...");
        assert_eq!(truncate("abcdef", 2), "ab");
        assert_eq!(truncate("ünïcödé text", 6), "ünï...");
    }

    #[test]
    fn test_plain_formatting() {
        assert_eq!(format_status("wellFormed", false), "wellFormed");
        assert_eq!(format_bool(true, false), "Yes");
        assert_eq!(format_bool(false, false), "No");
    }

    #[test]
    fn test_table_contents() {
        let table = TableBuilder::new()
            .color(false)
            .headers(["ID", "NAME"])
            .rows(vec![vec!["1", "Fabrikam"]])
            .build();
        let rendered = table.to_string();
        assert!(rendered.contains("NAME"));
        assert!(rendered.contains("Fabrikam"));
    }
}
