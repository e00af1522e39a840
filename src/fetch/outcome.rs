//! Classification of a single fetch attempt
//!
//! Every attempt resolves to exactly one `FetchOutcome`; the backoff policy
//! maps the outcome and the attempt index to the next action. Outcomes are
//! transient and only live for the evaluation of one attempt.

use std::fmt;

/// Tagged result of one fetch attempt
#[derive(Debug)]
pub enum FetchOutcome {
    /// HTTP 200 with the response body
    Success(String),

    /// HTTP 403 or 429 - the catalog is refusing this identity
    Blocked(u16),

    /// HTTP 503
    ServiceUnavailable,

    /// HTTP 404 - terminal, never retried
    NotFound,

    /// Redirect the transport could not resolve (loop or limit)
    Redirect,

    /// Request timed out
    Timeout,

    /// Connection-level failure (refused, reset, DNS)
    ConnectionError,

    /// Anything else, with a short description
    Other(String),
}

impl FetchOutcome {
    /// Resolves a transport result into an outcome, consuming the body on 200
    ///
    /// Redirects within the transport's limit are followed and never surface
    /// here; only an unresolved redirect (loop or limit exceeded) classifies
    /// as `Redirect`. Only HTTP 200 counts as success.
    pub async fn classify(result: Result<reqwest::Response, reqwest::Error>) -> Self {
        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                match status {
                    200 => match response.text().await {
                        Ok(body) => Self::Success(body),
                        Err(e) => Self::Other(format!("body read failed: {e}")),
                    },
                    403 | 429 => Self::Blocked(status),
                    503 => Self::ServiceUnavailable,
                    404 => Self::NotFound,
                    301 | 302 | 307 | 308 => Self::Redirect,
                    other => Self::Other(format!("HTTP {other}")),
                }
            }
            Err(e) => {
                if e.is_timeout() {
                    Self::Timeout
                } else if e.is_redirect() {
                    Self::Redirect
                } else if e.is_connect() {
                    Self::ConnectionError
                } else {
                    Self::Other(e.to_string())
                }
            }
        }
    }
}

impl fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(_) => write!(f, "success"),
            Self::Blocked(code) => write!(f, "blocked ({code})"),
            Self::ServiceUnavailable => write!(f, "service unavailable (503)"),
            Self::NotFound => write!(f, "not found (404)"),
            Self::Redirect => write!(f, "unresolved redirect"),
            Self::Timeout => write!(f, "timeout"),
            Self::ConnectionError => write!(f, "connection error"),
            Self::Other(detail) => write!(f, "error: {detail}"),
        }
    }
}
