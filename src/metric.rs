//! Per-service lookup outcomes.

use crate::error::PresenceError;
use std::fmt;

/// Remote service a count came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// NASA ADS bibliographic search
    Ads,
    /// Google Programmable Search
    Google,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Ads => write!(f, "ADS"),
            Service::Google => write!(f, "Google"),
        }
    }
}

/// Why a lookup produced no count
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Transport error (DNS, connect, timeout, body read)
    Network(String),
    /// Credentials rejected (401/403)
    Unauthorized(String),
    /// Quota or rate limit exhausted (429)
    QuotaExceeded(String),
    /// Any other non-success status
    Status { code: u16, message: String },
    /// Body missing the count field or not a non-negative integer
    MalformedResponse(String),
    /// Service has no credentials in this run
    NotConfigured,
    /// Local fault unrelated to the remote service
    Internal(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Network(msg) => write!(f, "network error: {}", msg),
            FailureReason::Unauthorized(msg) => write!(f, "unauthorized: {}", msg),
            FailureReason::QuotaExceeded(msg) => write!(f, "quota exceeded: {}", msg),
            FailureReason::Status { code, message } => write!(f, "HTTP {}: {}", code, message),
            FailureReason::MalformedResponse(msg) => write!(f, "malformed response: {}", msg),
            FailureReason::NotConfigured => write!(f, "not configured"),
            FailureReason::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl From<PresenceError> for FailureReason {
    fn from(err: PresenceError) -> Self {
        match err {
            PresenceError::Network(e) => FailureReason::Network(e.to_string()),
            PresenceError::Unauthorized(code) => {
                FailureReason::Unauthorized(format!("HTTP {}", code))
            }
            PresenceError::RateLimited(msg) => FailureReason::QuotaExceeded(msg),
            PresenceError::Api { code, message } => FailureReason::Status { code, message },
            PresenceError::Parse(msg) => FailureReason::MalformedResponse(msg),
            PresenceError::Json(e) => FailureReason::MalformedResponse(e.to_string()),
            err @ (PresenceError::InputNotFound(_)
            | PresenceError::InputFormat(_)
            | PresenceError::Config(_)
            | PresenceError::Io(_)
            | PresenceError::Csv(_)
            | PresenceError::Plot(_)) => FailureReason::Internal(err.to_string()),
        }
    }
}

/// A failed lookup, tagged with its originating service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    pub service: Service,
    pub reason: FailureReason,
}

impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lookup failed: {}", self.service, self.reason)
    }
}

/// Outcome of one count lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricResult {
    Count(u64),
    Failed(LookupFailure),
}

impl MetricResult {
    pub fn failed(service: Service, reason: FailureReason) -> Self {
        MetricResult::Failed(LookupFailure { service, reason })
    }

    /// The count, or None for a failed lookup
    pub fn count(&self) -> Option<u64> {
        match self {
            MetricResult::Count(n) => Some(*n),
            MetricResult::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, MetricResult::Failed(_))
    }
}
