//! Errors raised by the workflow REST transport.

use thiserror::Error;

/// Failure of a single call against the admin API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401: the caller lacks the privilege for this operation
    #[error("not authorized{}", describe(.description))]
    Unauthorized { description: Option<String> },

    /// Any other non-2xx response
    #[error("server returned {status}{}", describe(.description))]
    Status {
        status: u16,
        description: Option<String>,
    },

    /// Connection, TLS or timeout failure
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body could not be understood
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The configured server URL cannot carry request paths
    #[error("invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) | ApiError::InvalidUrl(_) => None,
        }
    }

    /// Server-provided description, if the error body carried one.
    pub fn description(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { description } | ApiError::Status { description, .. } => {
                description.as_deref()
            }
            _ => None,
        }
    }
}

fn describe(description: &Option<String>) -> String {
    match description {
        Some(d) => format!(": {}", d),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_description() {
        let err = ApiError::Unauthorized {
            description: Some("no perm".to_string()),
        };
        assert_eq!(err.to_string(), "not authorized: no perm");
        assert_eq!(err.status(), Some(401));

        let err = ApiError::Status {
            status: 500,
            description: None,
        };
        assert_eq!(err.to_string(), "server returned 500");
        assert_eq!(err.description(), None);
    }
}
