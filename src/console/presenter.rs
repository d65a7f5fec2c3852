//! Turns a state snapshot into something a front-end can draw.
//!
//! Rendering is pure: the same snapshot, search text and clock always give
//! the same `View`. Both the line-oriented `wfadmin list` output and the
//! interactive console draw from it.

use crate::console::elapsed::{format_absolute, relative_time};
use crate::console::state::{ActionState, ListState, Snapshot};
use crate::workflow::types::{Column, Decision, WorkflowKind, WorkflowRequest};
use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Placeholder for a property the request does not carry.
pub const MISSING: &str = "-";

pub const ELAPSED_HEADER: &str = "Elapsed time";

/// What to show for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Loading,
    /// A successful fetch returned no pending requests
    Empty,
    Denied,
    /// Banner message for a failed fetch
    Error(String),
    Table(TableView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<String>,
    /// Rows left after the search filter
    pub rows: Vec<RowView>,
    /// Rows in the snapshot before filtering
    pub total: usize,
    /// Decision in flight, if any (drives the progress indicator)
    pub pending: Option<Decision>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub reference_id: String,
    pub description: String,
    /// One value per kind column, in header order
    pub cells: Vec<String>,
    /// e.g. "3 hours ago"
    pub elapsed: String,
    /// Absolute creation time, shown on hover/selection
    pub created_at: String,
    pub properties: Vec<(String, String)>,
    /// False for every row while any action is in flight
    pub actions_enabled: bool,
    /// True for the row the in-flight action targets
    pub acting: bool,
}

/// Renders snapshots for one workflow kind.
#[derive(Debug, Clone)]
pub struct ListPresenter {
    kind: WorkflowKind,
    offset: FixedOffset,
}

impl ListPresenter {
    /// `offset` is the zone absolute timestamps are shown in.
    pub fn new(kind: WorkflowKind, offset: FixedOffset) -> Self {
        Self { kind, offset }
    }

    /// Presenter showing absolute times in UTC.
    pub fn utc(kind: WorkflowKind) -> Self {
        Self::new(kind, Utc.fix())
    }

    pub fn kind(&self) -> &WorkflowKind {
        &self.kind
    }

    pub fn headers(&self) -> Vec<String> {
        self.kind
            .columns()
            .iter()
            .map(|c| c.label.to_string())
            .chain(std::iter::once(ELAPSED_HEADER.to_string()))
            .collect()
    }

    pub fn present(&self, snapshot: &Snapshot, search: &str, now: DateTime<Utc>) -> View {
        let rows = match &snapshot.list {
            ListState::Init | ListState::Loading => return View::Loading,
            ListState::Denied => return View::Denied,
            ListState::Error(message) => return View::Error(message.clone()),
            ListState::Loaded(rows) => rows,
        };
        if rows.is_empty() {
            return View::Empty;
        }

        let columns = self.kind.columns();
        let needle = search.trim().to_lowercase();
        let visible = rows
            .iter()
            .filter(|r| needle.is_empty() || matches_search(r, columns, &needle))
            .map(|r| self.row(r, &snapshot.action, now))
            .collect();

        View::Table(TableView {
            headers: self.headers(),
            rows: visible,
            total: rows.len(),
            pending: snapshot.action.pending_action(),
        })
    }

    fn row(&self, request: &WorkflowRequest, action: &ActionState, now: DateTime<Utc>) -> RowView {
        let cells = self
            .kind
            .columns()
            .iter()
            .map(|c| request.property(c.key).unwrap_or(MISSING).to_string())
            .collect();
        let acting = matches!(
            action,
            ActionState::Acting { reference_id, .. } if *reference_id == request.reference_id
        );

        RowView {
            reference_id: request.reference_id.clone(),
            description: request.description.clone(),
            cells,
            elapsed: request
                .created_time
                .map(|t| relative_time(t, now))
                .unwrap_or_else(|| MISSING.to_string()),
            created_at: request
                .created_time
                .map(|t| format_absolute(t, &self.offset))
                .unwrap_or_else(|| MISSING.to_string()),
            properties: request
                .properties
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            actions_enabled: !action.is_updating(),
            acting,
        }
    }
}

/// Page title, e.g. "User Creation - Approval Tasks".
pub fn page_title(kind: &WorkflowKind) -> String {
    format!("{} - Approval Tasks", kind.title())
}

/// Body of the empty-state card.
pub fn empty_message(kind: &WorkflowKind) -> String {
    format!(
        "There are no workflow pending requests for {}. Workflow Approval Executor \
         needs to be enabled to approve or reject the requests.",
        kind.title().to_lowercase()
    )
}

/// Body of the permission-denied card.
pub fn denied_message(kind: &WorkflowKind) -> String {
    format!(
        "You don't have enough permission to view {}. Please contact the site administrator.",
        page_title(kind)
    )
}

/// Search box placeholder naming the searchable columns.
pub fn search_placeholder(kind: &WorkflowKind) -> String {
    let labels: Vec<String> = kind
        .columns()
        .iter()
        .map(|c| c.label.to_lowercase())
        .collect();
    if labels.is_empty() {
        "Search by description or reference id".to_string()
    } else {
        format!("Search by {}", labels.join(" or "))
    }
}

/// Case-insensitive substring match over the visible columns, the
/// description and the reference id. `needle` must already be lowercase.
fn matches_search(request: &WorkflowRequest, columns: &[Column], needle: &str) -> bool {
    let hit = |value: &str| value.to_lowercase().contains(needle);
    columns
        .iter()
        .filter_map(|c| request.property(c.key))
        .any(hit)
        || hit(request.description.as_str())
        || hit(request.reference_id.as_str())
}
