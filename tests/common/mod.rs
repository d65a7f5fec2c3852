//! Shared fixtures: a scripted in-memory `WorkflowApi`.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;
use wfadmin::workflow::{ApiError, StatusUpdate, WorkflowApi, WorkflowKind, WorkflowRequest};

/// One scripted reply. When `wait` is set the call blocks until it fires.
pub struct Reply<T> {
    pub result: Result<T, ApiError>,
    pub wait: Option<oneshot::Receiver<()>>,
}

impl<T> Reply<T> {
    pub fn now(result: Result<T, ApiError>) -> Self {
        Self { result, wait: None }
    }

    /// A reply released by sending on the returned channel.
    pub fn gated(result: Result<T, ApiError>) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                result,
                wait: Some(rx),
            },
            tx,
        )
    }
}

/// Scripted backend. Unscripted list calls return `fallback`; unscripted
/// updates succeed.
#[derive(Default)]
pub struct FakeApi {
    list_script: Mutex<VecDeque<Reply<Vec<WorkflowRequest>>>>,
    update_script: Mutex<VecDeque<Reply<()>>>,
    fallback: Mutex<Vec<WorkflowRequest>>,
    pub list_calls: AtomicUsize,
    pub kinds_requested: Mutex<Vec<String>>,
    pub updates: Mutex<Vec<(String, StatusUpdate)>>,
}

impl FakeApi {
    pub fn with_rows(rows: Vec<WorkflowRequest>) -> Self {
        let api = Self::default();
        *api.fallback.lock().unwrap() = rows;
        api
    }

    pub fn set_rows(&self, rows: Vec<WorkflowRequest>) {
        *self.fallback.lock().unwrap() = rows;
    }

    pub fn push_list(&self, reply: Reply<Vec<WorkflowRequest>>) {
        self.list_script.lock().unwrap().push_back(reply);
    }

    pub fn push_update(&self, reply: Reply<()>) {
        self.update_script.lock().unwrap().push_back(reply);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }
}

#[async_trait]
impl WorkflowApi for FakeApi {
    async fn list_workflows(&self, kind: &WorkflowKind) -> Result<Vec<WorkflowRequest>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.kinds_requested
            .lock()
            .unwrap()
            .push(kind.wire_name().to_string());

        let scripted = self.list_script.lock().unwrap().pop_front();
        match scripted {
            Some(reply) => {
                if let Some(wait) = reply.wait {
                    let _ = wait.await;
                }
                reply.result
            }
            None => Ok(self.fallback.lock().unwrap().clone()),
        }
    }

    async fn update_workflow(
        &self,
        reference_id: &str,
        update: &StatusUpdate,
    ) -> Result<(), ApiError> {
        self.updates
            .lock()
            .unwrap()
            .push((reference_id.to_string(), update.clone()));

        let scripted = self.update_script.lock().unwrap().pop_front();
        match scripted {
            Some(reply) => {
                if let Some(wait) = reply.wait {
                    let _ = wait.await;
                }
                reply.result
            }
            None => Ok(()),
        }
    }
}

/// A user sign-up request created at 2024-01-01T00:00:00Z.
pub fn signup(reference_id: &str, user: &str, domain: &str) -> WorkflowRequest {
    let mut properties = BTreeMap::new();
    properties.insert("tenantAwareUserName".to_string(), user.to_string());
    properties.insert("tenantDomain".to_string(), domain.to_string());
    WorkflowRequest {
        reference_id: reference_id.to_string(),
        description: "d".to_string(),
        created_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single(),
        properties,
    }
}

/// Yield until `cond` holds, failing the test after a generous bound.
pub async fn wait_until<F, Fut>(mut cond: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..1000 {
        if cond().await {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }
    panic!("condition not reached in time");
}
