//! `wfadmin console` — the interactive approval console.

use crate::cli::{build_list, local_presenter, resolve_kind, GlobalOptions};
use crate::notify::NotificationQueue;
use crate::tui::{self, app::App};
use crate::workflow::types::WorkflowKind;
use anyhow::Result;
use std::sync::Arc;

pub async fn run_console(globals: &GlobalOptions, kind: Option<WorkflowKind>) -> Result<()> {
    let config = globals.load_config()?;
    let kind = resolve_kind(kind, &config);

    let notifications = NotificationQueue::new();
    let list = build_list(&config, kind.clone(), Arc::new(notifications.clone()))?;
    let app = App::new(list, local_presenter(kind), notifications);

    tui::run(app).await
}
