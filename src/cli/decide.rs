//! `wfadmin approve` / `wfadmin reject` — settle one pending request.

use crate::cli::{build_list, resolve_kind, GlobalOptions};
use crate::console::{FetchError, Phase};
use crate::notify::TerminalNotifier;
use crate::workflow::types::{Decision, WorkflowKind};
use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;

/// Run `wfadmin approve|reject <reference>`.
pub async fn run_decide(
    globals: &GlobalOptions,
    kind: Option<WorkflowKind>,
    reference_id: &str,
    decision: Decision,
) -> Result<()> {
    let config = globals.load_config()?;
    let kind = resolve_kind(kind, &config);
    let list = build_list(&config, kind.clone(), Arc::new(TerminalNotifier))?;

    // The list must be loaded before a row can be acted on.
    match list.fetch().await {
        Ok(_) => {}
        Err(FetchError::PermissionDenied) => {
            anyhow::bail!(
                "You don't have permission to list {} requests",
                kind.title()
            )
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to load pending {} requests", kind.title()))
        }
    }

    println!();
    list.dispatch(reference_id, decision)
        .await
        .with_context(|| {
            format!(
                "Could not {} workflow request {}",
                decision.verb().to_lowercase(),
                reference_id
            )
        })?;

    let snapshot = list.snapshot().await;
    if list.phase().await == Phase::Loaded {
        println!(
            "  {} {} pending {} request(s) remain",
            "ℹ".blue(),
            snapshot.rows().len().to_string().bold(),
            kind.title()
        );
    }
    println!();
    Ok(())
}
