//! The approval list: fetch pending workflow requests, present them,
//! approve or reject one, refetch.

pub mod dispatcher;
pub mod elapsed;
pub mod errors;
pub mod fetcher;
pub mod presenter;
pub mod state;

pub use dispatcher::ActionDispatcher;
pub use errors::{ActionError, FetchError};
pub use fetcher::{DataFetcher, FetchOutcome};
pub use presenter::{ListPresenter, RowView, TableView, View};
pub use state::{ActionState, ListState, Phase, Snapshot};

use crate::notify::Notifier;
use crate::workflow::api::WorkflowApi;
use crate::workflow::types::{Decision, WorkflowKind};
use state::ConsoleState;
use std::sync::Arc;
use tokio::sync::Mutex;

/// One approval list for one workflow kind.
///
/// Share it as `Arc<WorkflowApprovalList>` between the UI loop and the
/// task running an action; all methods take `&self`.
pub struct WorkflowApprovalList {
    state: Mutex<ConsoleState>,
    fetcher: DataFetcher,
    dispatcher: ActionDispatcher,
}

impl WorkflowApprovalList {
    pub fn new(kind: WorkflowKind, api: Arc<dyn WorkflowApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: Mutex::new(ConsoleState::new()),
            fetcher: DataFetcher::new(kind.clone(), api.clone(), notifier.clone()),
            dispatcher: ActionDispatcher::new(kind, api, notifier),
        }
    }

    pub fn kind(&self) -> &WorkflowKind {
        self.fetcher.kind()
    }

    /// Load (or reload) the list.
    pub async fn fetch(&self) -> Result<FetchOutcome, FetchError> {
        self.fetcher.fetch(&self.state).await
    }

    /// Explicit user reload; the only way out of DENIED and ERROR.
    pub async fn reload(&self) -> Result<FetchOutcome, FetchError> {
        self.fetch().await
    }

    /// Approve or reject one request, then refetch.
    pub async fn dispatch(&self, reference_id: &str, decision: Decision) -> Result<(), ActionError> {
        self.dispatcher
            .dispatch(&self.state, &self.fetcher, reference_id, decision)
            .await
    }

    pub async fn approve(&self, reference_id: &str) -> Result<(), ActionError> {
        self.dispatch(reference_id, Decision::Approved).await
    }

    pub async fn reject(&self, reference_id: &str) -> Result<(), ActionError> {
        self.dispatch(reference_id, Decision::Rejected).await
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn phase(&self) -> Phase {
        self.state.lock().await.phase()
    }

    pub async fn is_updating(&self) -> bool {
        self.snapshot().await.is_updating()
    }
}
