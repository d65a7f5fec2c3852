//! Approve/reject mutations for rows of the list.

use crate::console::errors::ActionError;
use crate::console::fetcher::DataFetcher;
use crate::console::state::ConsoleState;
use crate::notify::{Notification, Notifier};
use crate::workflow::api::WorkflowApi;
use crate::workflow::errors::ApiError;
use crate::workflow::types::{Decision, StatusUpdate, WorkflowKind};
use std::sync::Arc;
use tokio::sync::Mutex;

pub const SUCCESS_MESSAGE: &str = "Workflow status is updated successfully";

pub struct ActionDispatcher {
    kind: WorkflowKind,
    api: Arc<dyn WorkflowApi>,
    notifier: Arc<dyn Notifier>,
}

impl ActionDispatcher {
    pub fn new(kind: WorkflowKind, api: Arc<dyn WorkflowApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            kind,
            api,
            notifier,
        }
    }

    /// Message shown when an update fails without a usable description.
    pub fn failure_message(&self) -> String {
        format!(
            "Unable to complete {} approve/reject process.",
            self.kind.title()
        )
    }

    /// Submit `decision` for `reference_id`, then refresh the list.
    ///
    /// The action slot is released before the trailing refetch starts.
    /// A 401 still refetches; any other failure returns without refetching.
    pub async fn dispatch(
        &self,
        state: &Mutex<ConsoleState>,
        fetcher: &DataFetcher,
        reference_id: &str,
        decision: Decision,
    ) -> Result<(), ActionError> {
        state.lock().await.begin_action(reference_id, decision)?;
        tracing::info!(reference_id, %decision, "submitting workflow decision");

        let update = StatusUpdate::new(decision);
        let result = self.api.update_workflow(reference_id, &update).await;

        state.lock().await.finish_action();

        match result {
            Ok(()) => {
                self.notifier.notify(Notification::success(SUCCESS_MESSAGE));
                self.refetch(state, fetcher).await;
                Ok(())
            }
            Err(ApiError::Unauthorized { description }) => {
                let message = description.clone().unwrap_or_else(|| self.failure_message());
                tracing::warn!(reference_id, "workflow update not authorized: {}", message);
                self.notifier.notify(Notification::error(message));
                self.refetch(state, fetcher).await;
                Err(ActionError::Unauthorized { description })
            }
            Err(e) => {
                tracing::error!(reference_id, "workflow update failed: {}", e);
                self.notifier.notify(Notification::error(self.failure_message()));
                Err(ActionError::Failed(e))
            }
        }
    }

    async fn refetch(&self, state: &Mutex<ConsoleState>, fetcher: &DataFetcher) {
        // Fetch failures are already reflected in the list state.
        if let Err(e) = fetcher.fetch(state).await {
            tracing::debug!("refetch after update failed: {}", e);
        }
    }
}
