//! Error taxonomy of the approval list.

use crate::console::state::Phase;
use crate::workflow::errors::ApiError;
use thiserror::Error;

/// Why a fetch produced no rows.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP 401 on the list call
    #[error("permission denied")]
    PermissionDenied,

    /// Any other failure of the list call
    #[error(transparent)]
    Transport(ApiError),
}

impl From<ApiError> for FetchError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized { .. } => FetchError::PermissionDenied,
            other => FetchError::Transport(other),
        }
    }
}

/// Why an approve/reject did not go through.
#[derive(Debug, Error)]
pub enum ActionError {
    /// HTTP 401 on the update call; carries the server's description
    #[error("not authorized: {}", .description.as_deref().unwrap_or("no description"))]
    Unauthorized { description: Option<String> },

    /// Any other failure of the update call
    #[error("update failed: {0}")]
    Failed(ApiError),

    /// Another action is still in flight
    #[error("another action is already in progress")]
    Busy,

    /// The list is not in a state that accepts actions
    #[error("list is not loaded (state: {0})")]
    NotLoaded(Phase),

    /// The reference id is not in the last fetched list
    #[error("no pending request with reference id '{0}'")]
    UnknownReference(String),
}

impl ActionError {
    /// Whether the backend was contacted at all.
    pub fn reached_backend(&self) -> bool {
        matches!(self, ActionError::Unauthorized { .. } | ActionError::Failed(_))
    }
}
