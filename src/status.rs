//! Translation of upstream HTTP outcomes into RPC status codes.
//!
//! Every upstream fetch ends in exactly one [`FetchOutcome`]. The functions here turn that
//! outcome into an [`RpcStatus`] the caller can abort with. Nothing in this module logs or
//! retries; it is a pure mapping.

use std::fmt;

use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Canonical RPC outcome codes surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RpcCode {
    Ok,
    Unknown,
    InvalidArgument,
    DeadlineExceeded,
    NotFound,
    PermissionDenied,
    ResourceExhausted,
    Internal,
    Unavailable,
    Unauthenticated,
}

impl RpcCode {
    /// Numeric value of the code on the gRPC wire
    pub fn as_i32(self) -> i32 {
        match self {
            RpcCode::Ok => 0,
            RpcCode::Unknown => 2,
            RpcCode::InvalidArgument => 3,
            RpcCode::DeadlineExceeded => 4,
            RpcCode::NotFound => 5,
            RpcCode::PermissionDenied => 7,
            RpcCode::ResourceExhausted => 8,
            RpcCode::Internal => 13,
            RpcCode::Unavailable => 14,
            RpcCode::Unauthenticated => 16,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RpcCode::Ok => "OK",
            RpcCode::Unknown => "UNKNOWN",
            RpcCode::InvalidArgument => "INVALID_ARGUMENT",
            RpcCode::DeadlineExceeded => "DEADLINE_EXCEEDED",
            RpcCode::NotFound => "NOT_FOUND",
            RpcCode::PermissionDenied => "PERMISSION_DENIED",
            RpcCode::ResourceExhausted => "RESOURCE_EXHAUSTED",
            RpcCode::Internal => "INTERNAL",
            RpcCode::Unavailable => "UNAVAILABLE",
            RpcCode::Unauthenticated => "UNAUTHENTICATED",
        }
    }
}

impl fmt::Display for RpcCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An RPC code paired with a human-readable detail string
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{code}: {detail}")]
pub struct RpcStatus {
    pub code: RpcCode,
    pub detail: String,
}

impl RpcStatus {
    pub fn new(code: RpcCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == RpcCode::Ok
    }
}

/// How a single upstream fetch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A status line was received
    Status(u16),
    /// The request failed before any status line arrived (connect error, timeout)
    Transport(String),
    /// Anything else that went wrong while fetching, e.g. an undecodable body
    Unhandled(String),
}

/// Map an HTTP status code to its RPC code. Codes outside the table map to `Unknown`.
pub fn code_for_http_status(http_status: u16) -> RpcCode {
    match http_status {
        200 => RpcCode::Ok,
        400 => RpcCode::InvalidArgument,
        401 => RpcCode::Unauthenticated,
        403 => RpcCode::PermissionDenied,
        404 => RpcCode::NotFound,
        429 => RpcCode::ResourceExhausted,
        500 => RpcCode::Internal,
        502 | 504 => RpcCode::DeadlineExceeded,
        503 => RpcCode::Unavailable,
        _ => RpcCode::Unknown,
    }
}

/// Translate a received HTTP status into an RPC status whose detail embeds the code
pub fn translate(http_status: u16) -> RpcStatus {
    let reason = StatusCode::from_u16(http_status)
        .ok()
        .and_then(|s| s.canonical_reason());
    let detail = match reason {
        Some(reason) => format!("HTTP error - {}: {}", http_status, reason),
        None => format!("HTTP error - {}", http_status),
    };
    RpcStatus::new(code_for_http_status(http_status), detail)
}

pub fn transport_failure(error: impl fmt::Display) -> RpcStatus {
    RpcStatus::new(RpcCode::Internal, format!("Transport error: {}", error))
}

pub fn unhandled_failure(error: impl fmt::Display) -> RpcStatus {
    RpcStatus::new(RpcCode::Internal, format!("Unhandled exception: {}", error))
}

pub fn translate_outcome(outcome: &FetchOutcome) -> RpcStatus {
    match outcome {
        FetchOutcome::Status(code) => translate(*code),
        FetchOutcome::Transport(error) => transport_failure(error),
        FetchOutcome::Unhandled(error) => unhandled_failure(error),
    }
}
