use crate::workflow::errors::ApiError;
use crate::workflow::types::{StatusUpdate, WorkflowKind, WorkflowRequest};
use async_trait::async_trait;

/// The two admin API operations the approval console needs.
/// Implementations can be HTTP-backed or in-memory (tests).
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    /// `GET /workflows?type={kind}`: the pending requests of one kind.
    async fn list_workflows(&self, kind: &WorkflowKind) -> Result<Vec<WorkflowRequest>, ApiError>;

    /// `PUT /workflows/{reference_id}`: approve or reject one request.
    async fn update_workflow(
        &self,
        reference_id: &str,
        update: &StatusUpdate,
    ) -> Result<(), ApiError>;
}
