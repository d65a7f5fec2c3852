//! Core types for pending workflow requests.
//!
//! These mirror the JSON the admin REST API returns for `/workflows` and the
//! body it expects when a workflow request is approved or rejected.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A pending human-approval task tracked by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRequest {
    /// Stable identifier, used as the mutation target
    pub reference_id: String,

    #[serde(default)]
    pub description: String,

    /// When the backend created the request; `None` if the value was unreadable
    #[serde(default, deserialize_with = "lenient_time")]
    pub created_time: Option<DateTime<Utc>>,

    /// Workflow-type-specific attributes (user name, API name, ...)
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl WorkflowRequest {
    /// Look up a property, returning `None` for missing or blank values.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

/// Accepts RFC 3339, `2024-01-01 00:00:00.0` style (taken as UTC) and epoch
/// milliseconds. Anything else becomes `None` so one odd row cannot fail the
/// whole list.
fn lenient_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_time))
}

/// Parse a `createdTime` value in any of the shapes the backend is known to send.
fn parse_time(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        serde_json::Value::String(s) => {
            let s = s.trim();
            if let Ok(t) = DateTime::parse_from_rfc3339(s) {
                return Some(t.with_timezone(&Utc));
            }
            for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
                if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                    return Some(naive.and_utc());
                }
            }
            s.parse::<i64>()
                .ok()
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        }
        _ => None,
    }
}

/// Response body of `GET /workflows`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub list: Vec<WorkflowRequest>,
}

/// The verdict submitted for a workflow request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    /// Fixed description sent along with the status change.
    pub fn request_description(&self) -> &'static str {
        match self {
            Decision::Approved => "Approve workflow request.",
            Decision::Rejected => "Reject workflow request.",
        }
    }

    /// Verb used in prompts and buttons.
    pub fn verb(&self) -> &'static str {
        match self {
            Decision::Approved => "Approve",
            Decision::Rejected => "Reject",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Approved => write!(f, "APPROVED"),
            Decision::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// Body of `PUT /workflows/{referenceId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: Decision,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    pub description: String,
}

impl StatusUpdate {
    pub fn new(decision: Decision) -> Self {
        Self {
            status: decision,
            attributes: BTreeMap::new(),
            description: decision.request_description().to_string(),
        }
    }
}

/// A property column shown for a workflow kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Key in `WorkflowRequest::properties`
    pub key: &'static str,
    /// Table header
    pub label: &'static str,
}

const fn col(key: &'static str, label: &'static str) -> Column {
    Column { key, label }
}

const USER_SIGNUP_COLUMNS: &[Column] = &[
    col("tenantAwareUserName", "User Name"),
    col("tenantDomain", "Tenant Domain"),
];
const APPLICATION_CREATION_COLUMNS: &[Column] = &[
    col("applicationName", "Application"),
    col("applicationTier", "Tier"),
    col("userName", "Created By"),
];
const APPLICATION_DELETION_COLUMNS: &[Column] = &[
    col("applicationName", "Application"),
    col("userName", "Requested By"),
];
const SUBSCRIPTION_COLUMNS: &[Column] = &[
    col("apiName", "API"),
    col("apiVersion", "Version"),
    col("applicationName", "Application"),
    col("subscriber", "Subscriber"),
];
const REGISTRATION_COLUMNS: &[Column] = &[
    col("applicationName", "Application"),
    col("keyType", "Key Type"),
    col("userName", "Requested By"),
];
const STATE_CHANGE_COLUMNS: &[Column] = &[
    col("apiName", "API"),
    col("apiVersion", "Version"),
    col("apiProvider", "Provider"),
    col("action", "Request State"),
];
const REVISION_DEPLOYMENT_COLUMNS: &[Column] = &[
    col("apiName", "API"),
    col("apiVersion", "Version"),
    col("environment", "Gateway Environment"),
];

/// The workflow types the admin console has approval pages for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum WorkflowKind {
    #[default]
    UserSignup,
    ApplicationCreation,
    ApplicationDeletion,
    SubscriptionCreation,
    SubscriptionUpdate,
    SubscriptionDeletion,
    ApplicationRegistrationProduction,
    ApplicationRegistrationSandbox,
    ApiStateChange,
    ApiProductStateChange,
    RevisionDeployment,
    /// A workflow type this build has no dedicated columns for
    Other(String),
}

impl WorkflowKind {
    /// Every kind with a dedicated page, in menu order.
    pub const KNOWN: &'static [WorkflowKind] = &[
        WorkflowKind::UserSignup,
        WorkflowKind::ApplicationCreation,
        WorkflowKind::ApplicationDeletion,
        WorkflowKind::SubscriptionCreation,
        WorkflowKind::SubscriptionUpdate,
        WorkflowKind::SubscriptionDeletion,
        WorkflowKind::ApplicationRegistrationProduction,
        WorkflowKind::ApplicationRegistrationSandbox,
        WorkflowKind::ApiStateChange,
        WorkflowKind::ApiProductStateChange,
        WorkflowKind::RevisionDeployment,
    ];

    /// The `type` query value understood by the backend.
    pub fn wire_name(&self) -> &str {
        match self {
            WorkflowKind::UserSignup => "AM_USER_SIGNUP",
            WorkflowKind::ApplicationCreation => "AM_APPLICATION_CREATION",
            WorkflowKind::ApplicationDeletion => "AM_APPLICATION_DELETION",
            WorkflowKind::SubscriptionCreation => "AM_SUBSCRIPTION_CREATION",
            WorkflowKind::SubscriptionUpdate => "AM_SUBSCRIPTION_UPDATE",
            WorkflowKind::SubscriptionDeletion => "AM_SUBSCRIPTION_DELETION",
            WorkflowKind::ApplicationRegistrationProduction => {
                "AM_APPLICATION_REGISTRATION_PRODUCTION"
            }
            WorkflowKind::ApplicationRegistrationSandbox => "AM_APPLICATION_REGISTRATION_SANDBOX",
            WorkflowKind::ApiStateChange => "AM_API_STATE",
            WorkflowKind::ApiProductStateChange => "AM_API_PRODUCT_STATE",
            WorkflowKind::RevisionDeployment => "AM_REVISION_DEPLOYMENT",
            WorkflowKind::Other(name) => name,
        }
    }

    /// Short kebab-case alias accepted on the command line.
    pub fn alias(&self) -> Option<&'static str> {
        Some(match self {
            WorkflowKind::UserSignup => "user-signup",
            WorkflowKind::ApplicationCreation => "application-creation",
            WorkflowKind::ApplicationDeletion => "application-deletion",
            WorkflowKind::SubscriptionCreation => "subscription-creation",
            WorkflowKind::SubscriptionUpdate => "subscription-update",
            WorkflowKind::SubscriptionDeletion => "subscription-deletion",
            WorkflowKind::ApplicationRegistrationProduction => "registration-production",
            WorkflowKind::ApplicationRegistrationSandbox => "registration-sandbox",
            WorkflowKind::ApiStateChange => "api-state",
            WorkflowKind::ApiProductStateChange => "api-product-state",
            WorkflowKind::RevisionDeployment => "revision-deployment",
            WorkflowKind::Other(_) => return None,
        })
    }

    /// Human title, used for page headers and error messages.
    pub fn title(&self) -> String {
        match self {
            WorkflowKind::UserSignup => "User Creation".into(),
            WorkflowKind::ApplicationCreation => "Application Creation".into(),
            WorkflowKind::ApplicationDeletion => "Application Deletion".into(),
            WorkflowKind::SubscriptionCreation => "Subscription Creation".into(),
            WorkflowKind::SubscriptionUpdate => "Subscription Update".into(),
            WorkflowKind::SubscriptionDeletion => "Subscription Deletion".into(),
            WorkflowKind::ApplicationRegistrationProduction => {
                "Application Registration (Production)".into()
            }
            WorkflowKind::ApplicationRegistrationSandbox => {
                "Application Registration (Sandbox)".into()
            }
            WorkflowKind::ApiStateChange => "API State Change".into(),
            WorkflowKind::ApiProductStateChange => "API Product State Change".into(),
            WorkflowKind::RevisionDeployment => "Revision Deployment".into(),
            WorkflowKind::Other(name) => name.clone(),
        }
    }

    /// Property columns shown in the table for this kind.
    pub fn columns(&self) -> &'static [Column] {
        match self {
            WorkflowKind::UserSignup => USER_SIGNUP_COLUMNS,
            WorkflowKind::ApplicationCreation => APPLICATION_CREATION_COLUMNS,
            WorkflowKind::ApplicationDeletion => APPLICATION_DELETION_COLUMNS,
            WorkflowKind::SubscriptionCreation
            | WorkflowKind::SubscriptionUpdate
            | WorkflowKind::SubscriptionDeletion => SUBSCRIPTION_COLUMNS,
            WorkflowKind::ApplicationRegistrationProduction
            | WorkflowKind::ApplicationRegistrationSandbox => REGISTRATION_COLUMNS,
            WorkflowKind::ApiStateChange | WorkflowKind::ApiProductStateChange => {
                STATE_CHANGE_COLUMNS
            }
            WorkflowKind::RevisionDeployment => REVISION_DEPLOYMENT_COLUMNS,
            WorkflowKind::Other(_) => &[],
        }
    }

    /// Parse a kind from its wire name or alias.
    /// Unknown `AM_*` names become `Other`; anything else is rejected.
    pub fn from_str_loose(s: &str) -> Option<WorkflowKind> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        let lowered = s.to_lowercase().replace('_', "-");
        for kind in Self::KNOWN {
            if kind.wire_name().eq_ignore_ascii_case(s) || kind.alias() == Some(lowered.as_str()) {
                return Some(kind.clone());
            }
        }
        if s.to_uppercase().starts_with("AM_") {
            return Some(WorkflowKind::Other(s.to_uppercase()));
        }
        None
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl std::str::FromStr for WorkflowKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_loose(s).ok_or_else(|| {
            format!(
                "unknown workflow type '{}' (run `wfadmin types` for the list)",
                s
            )
        })
    }
}
