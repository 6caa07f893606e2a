use std::fmt;

use sheetpress_core::{RequestId, ServiceReply};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Settled {
        request_id: RequestId,
        reply: ServiceReply,
    },
    ExportCompleted {
        summary: String,
    },
    ExportFailed {
        message: String,
    },
}

/// A request that never produced a usable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClientError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for ClientError {}

impl From<ClientError> for ServiceReply {
    fn from(err: ClientError) -> Self {
        let reason = match err.kind {
            FailureKind::Timeout => "request timed out".to_string(),
            FailureKind::Cancelled => "cancelled".to_string(),
            _ => err.to_string(),
        };
        ServiceReply::Unreachable { reason }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    InvalidPart,
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Materialize,
    Cancelled,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::InvalidPart => write!(f, "invalid multipart field"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Materialize => write!(f, "could not store artifact"),
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
