//! Loads the pending requests of one workflow kind into the list state.

use crate::console::errors::FetchError;
use crate::console::state::{ConsoleState, ListState};
use crate::notify::{Notification, Notifier};
use crate::workflow::api::WorkflowApi;
use crate::workflow::types::WorkflowKind;
use std::sync::Arc;
use tokio::sync::Mutex;

/// How a fetch ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The list was replaced with this many rows
    Loaded(usize),
    /// A newer fetch was issued meanwhile; this result was dropped
    Superseded,
}

pub struct DataFetcher {
    kind: WorkflowKind,
    api: Arc<dyn WorkflowApi>,
    notifier: Arc<dyn Notifier>,
}

impl DataFetcher {
    pub fn new(kind: WorkflowKind, api: Arc<dyn WorkflowApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            kind,
            api,
            notifier,
        }
    }

    pub fn kind(&self) -> &WorkflowKind {
        &self.kind
    }

    /// Message shown when the list cannot be loaded.
    pub fn failure_message(&self) -> String {
        format!(
            "Unable to get workflow pending requests for {}",
            self.kind.title()
        )
    }

    /// Clear the rows, call the backend once and store the result.
    ///
    /// The lock is released while the request is in flight, so a second
    /// fetch may start meanwhile; only the latest one writes its result.
    pub async fn fetch(&self, state: &Mutex<ConsoleState>) -> Result<FetchOutcome, FetchError> {
        let seq = state.lock().await.begin_fetch();
        tracing::debug!(kind = %self.kind, seq, "fetching workflow requests");

        let result = self.api.list_workflows(&self.kind).await;

        let mut state = state.lock().await;
        if !state.is_current(seq) {
            tracing::debug!(seq, "discarding superseded fetch result");
            return Ok(FetchOutcome::Superseded);
        }

        match result {
            Ok(rows) => {
                let count = rows.len();
                state.complete_fetch(seq, ListState::Loaded(rows.into()));
                tracing::debug!(seq, count, "workflow requests loaded");
                Ok(FetchOutcome::Loaded(count))
            }
            Err(e) => match FetchError::from(e) {
                FetchError::PermissionDenied => {
                    state.complete_fetch(seq, ListState::Denied);
                    tracing::warn!(kind = %self.kind, "no permission to list workflow requests");
                    Err(FetchError::PermissionDenied)
                }
                FetchError::Transport(cause) => {
                    let generic = self.failure_message();
                    tracing::error!("Unable to fetch data. {}", cause);
                    self.notifier.notify(Notification::error(generic.clone()));
                    state.complete_fetch(seq, ListState::Error(format!("{}: {}", generic, cause)));
                    Err(FetchError::Transport(cause))
                }
            },
        }
    }
}
