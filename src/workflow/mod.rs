pub mod api;
pub mod client;
pub mod errors;
pub mod types;

pub use api::WorkflowApi;
pub use client::HttpWorkflowClient;
pub use errors::ApiError;
pub use types::*;
