//! `wfadmin types` — list the workflow types with approval pages.

use crate::workflow::types::WorkflowKind;
use colored::Colorize;

pub fn run_types() {
    println!();
    println!("  {}", "Workflow types".bold());
    println!();
    for kind in WorkflowKind::KNOWN {
        println!(
            "  {:<40} {:<25} {}",
            kind.wire_name().cyan(),
            kind.alias().unwrap_or(""),
            kind.title().dimmed()
        );
    }
    println!();
    println!(
        "  Use with {}",
        "wfadmin list --type <name or alias>".dimmed()
    );
    println!();
}
