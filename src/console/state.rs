//! State owned by a single approval list.
//!
//! ```text
//! INIT -> LOADING -> { LOADED, DENIED, ERROR }
//! LOADED -> ACTING -> LOADING -> ...
//! DENIED / ERROR -> LOADING   (explicit reload only)
//! ```
//!
//! The list snapshot is immutable (`Arc<[WorkflowRequest]>`); a fetch
//! replaces it wholesale. Every fetch takes a sequence number and only the
//! latest one may write its result back.

use crate::console::errors::ActionError;
use crate::workflow::types::{Decision, WorkflowRequest};
use std::fmt;
use std::sync::Arc;

/// What the last fetch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Init,
    Loading,
    Loaded(Arc<[WorkflowRequest]>),
    /// The caller may not list this workflow type
    Denied,
    /// Fetch failed; holds the banner message
    Error(String),
}

/// The single shared action slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionState {
    Idle,
    Acting {
        reference_id: String,
        decision: Decision,
    },
}

impl ActionState {
    pub fn is_updating(&self) -> bool {
        matches!(self, ActionState::Acting { .. })
    }

    pub fn pending_action(&self) -> Option<Decision> {
        match self {
            ActionState::Idle => None,
            ActionState::Acting { decision, .. } => Some(*decision),
        }
    }
}

/// Coarse state-machine position, derived from list + action state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    Loading,
    Loaded,
    Acting,
    Denied,
    Error,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Init => write!(f, "init"),
            Phase::Loading => write!(f, "loading"),
            Phase::Loaded => write!(f, "loaded"),
            Phase::Acting => write!(f, "acting"),
            Phase::Denied => write!(f, "denied"),
            Phase::Error => write!(f, "error"),
        }
    }
}

/// Mutable state behind the list's lock.
#[derive(Debug)]
pub struct ConsoleState {
    list: ListState,
    action: ActionState,
    /// Sequence number of the most recently issued fetch
    latest_fetch: u64,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self {
            list: ListState::Init,
            action: ActionState::Idle,
            latest_fetch: 0,
        }
    }
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the current rows and hand out a new fetch sequence number.
    pub fn begin_fetch(&mut self) -> u64 {
        self.latest_fetch += 1;
        self.list = ListState::Loading;
        self.latest_fetch
    }

    /// Whether a fetch tagged `seq` is still the newest one issued.
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest_fetch
    }

    /// Store a fetch result. Returns false (and changes nothing) when the
    /// fetch has been superseded.
    pub fn complete_fetch(&mut self, seq: u64, list: ListState) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.list = list;
        true
    }

    /// Claim the action slot for `reference_id`.
    pub fn begin_action(&mut self, reference_id: &str, decision: Decision) -> Result<(), ActionError> {
        if self.action.is_updating() {
            return Err(ActionError::Busy);
        }
        let rows = match &self.list {
            ListState::Loaded(rows) => rows,
            _ => return Err(ActionError::NotLoaded(self.phase())),
        };
        if !rows.iter().any(|r| r.reference_id == reference_id) {
            return Err(ActionError::UnknownReference(reference_id.to_string()));
        }
        self.action = ActionState::Acting {
            reference_id: reference_id.to_string(),
            decision,
        };
        Ok(())
    }

    /// Release the action slot.
    pub fn finish_action(&mut self) {
        self.action = ActionState::Idle;
    }

    pub fn phase(&self) -> Phase {
        if self.action.is_updating() {
            return Phase::Acting;
        }
        match self.list {
            ListState::Init => Phase::Init,
            ListState::Loading => Phase::Loading,
            ListState::Loaded(_) => Phase::Loaded,
            ListState::Denied => Phase::Denied,
            ListState::Error(_) => Phase::Error,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            list: self.list.clone(),
            action: self.action.clone(),
            fetches_issued: self.latest_fetch,
        }
    }
}

/// Immutable copy of the state, taken for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub list: ListState,
    pub action: ActionState,
    pub fetches_issued: u64,
}

impl Snapshot {
    pub fn is_updating(&self) -> bool {
        self.action.is_updating()
    }

    pub fn rows(&self) -> &[WorkflowRequest] {
        match &self.list {
            ListState::Loaded(rows) => &rows[..],
            _ => &[],
        }
    }
}
