pub mod config;
pub mod console;
pub mod decide;
pub mod list;
pub mod types;

use crate::config::{Config, Overrides};
use crate::console::{ListPresenter, WorkflowApprovalList};
use crate::notify::Notifier;
use crate::workflow::client::HttpWorkflowClient;
use crate::workflow::types::WorkflowKind;
use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub server: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    pub fn load_config(&self) -> Result<Config> {
        let overrides = Overrides {
            server_url: self.server.clone(),
            token: self.token.clone(),
            timeout_secs: self.timeout_secs,
        };
        Config::load(self.config.as_deref(), &overrides)
    }
}

/// The kind named on the command line, or the configured default.
pub fn resolve_kind(arg: Option<WorkflowKind>, config: &Config) -> WorkflowKind {
    arg.unwrap_or_else(|| config.default_type.clone())
}

/// Build an approval list talking to the configured server.
pub fn build_list(
    config: &Config,
    kind: WorkflowKind,
    notifier: Arc<dyn Notifier>,
) -> Result<Arc<WorkflowApprovalList>> {
    let client = HttpWorkflowClient::from_config(config)
        .with_context(|| format!("Failed to create HTTP client for {}", config.server_url))?;
    tracing::debug!("using admin API at {}", client.base_url());
    Ok(Arc::new(WorkflowApprovalList::new(
        kind,
        Arc::new(client),
        notifier,
    )))
}

/// Presenter showing absolute times in the local timezone.
pub fn local_presenter(kind: WorkflowKind) -> ListPresenter {
    ListPresenter::new(kind, *Local::now().offset())
}
