//! `wfadmin list` — print the pending requests of one workflow type.

use crate::cli::{build_list, local_presenter, resolve_kind, GlobalOptions};
use crate::console::presenter::{denied_message, empty_message, page_title};
use crate::console::{TableView, View};
use crate::notify::NotificationQueue;
use crate::workflow::types::{WorkflowKind, WorkflowRequest};
use anyhow::{bail, Result};
use chrono::Utc;
use colored::Colorize;
use std::sync::Arc;

/// Run the `wfadmin list` command.
pub async fn run_list(
    globals: &GlobalOptions,
    kind: Option<WorkflowKind>,
    search: Option<&str>,
    json: bool,
) -> Result<()> {
    let config = globals.load_config()?;
    let kind = resolve_kind(kind, &config);
    // Failures come back as errors; the queued toasts would only repeat them.
    let list = build_list(&config, kind.clone(), Arc::new(NotificationQueue::new()))?;
    let presenter = local_presenter(kind.clone());

    // Errors are reflected in the snapshot and rendered below.
    let _ = list.fetch().await;
    let snapshot = list.snapshot().await;
    let view = presenter.present(&snapshot, search.unwrap_or(""), Utc::now());

    if let View::Denied | View::Error(_) = view {
        return fail(&kind, &view);
    }

    if json {
        let visible: Vec<&WorkflowRequest> = match &view {
            View::Table(table) => snapshot
                .rows()
                .iter()
                .filter(|r| table.rows.iter().any(|v| v.reference_id == r.reference_id))
                .collect(),
            _ => Vec::new(),
        };
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    println!();
    println!("  {}", page_title(&kind).bold());
    println!("  {}", "━".repeat(48).dimmed());
    println!();

    match &view {
        View::Table(table) => print_table(table),
        View::Empty => {
            println!("  {} {}", "ℹ".blue(), empty_message(&kind));
            println!();
        }
        View::Loading | View::Denied | View::Error(_) => {}
    }
    Ok(())
}

fn fail(kind: &WorkflowKind, view: &View) -> Result<()> {
    match view {
        View::Denied => bail!("Permission denied. {}", denied_message(kind)),
        View::Error(message) => bail!("{}", message),
        _ => Ok(()),
    }
}

/// Render a table view as aligned text columns.
pub fn format_table(table: &TableView) -> Vec<String> {
    let mut headers: Vec<String> = vec!["Reference".to_string()];
    headers.extend(table.headers.iter().cloned());

    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|r| {
            let mut cells = vec![r.reference_id.clone()];
            cells.extend(r.cells.iter().cloned());
            cells.push(format!("{} ({})", r.elapsed, r.created_at));
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|i| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(headers[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    std::iter::once(line(&headers))
        .chain(rows.iter().map(|r| line(r)))
        .collect()
}

fn print_table(table: &TableView) {
    if table.rows.is_empty() {
        println!("  {} Sorry, no matching records found.", "ℹ".blue());
        println!();
        return;
    }

    let lines = format_table(table);
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            println!("  {}", line.bold());
        } else {
            println!("  {}", line);
        }
    }

    println!();
    let shown = if table.rows.len() == table.total {
        format!("{} pending", table.total)
    } else {
        format!("{} of {} pending", table.rows.len(), table.total)
    };
    println!("  {} {}", "─".repeat(20).dimmed(), shown.dimmed());
    println!(
        "  Approve with {}",
        "wfadmin approve <reference>".dimmed()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::RowView;

    #[test]
    fn test_format_table_aligns_columns() {
        let table = TableView {
            headers: vec!["User Name".to_string(), "Elapsed time".to_string()],
            rows: vec![RowView {
                reference_id: "r1".to_string(),
                description: String::new(),
                cells: vec!["alice".to_string()],
                elapsed: "a day ago".to_string(),
                created_at: "January 1, 2024 12:00 AM".to_string(),
                properties: vec![],
                actions_enabled: true,
                acting: false,
            }],
            total: 1,
            pending: None,
        };

        let lines = format_table(&table);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Reference  User Name  Elapsed time");
        assert_eq!(
            lines[1],
            "r1         alice      a day ago (January 1, 2024 12:00 AM)"
        );
    }
}
