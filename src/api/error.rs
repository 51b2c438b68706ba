//! Error type for calling backend requests

use std::fmt;

use thiserror::Error;

/// The backend operation a request belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    StartCall,
    CallStatus,
    RecentCalls,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::StartCall => "start_call",
            Operation::CallStatus => "call_status",
            Operation::RecentCalls => "all_calls",
        }
    }

    /// Operator-facing message shown when this operation fails.
    pub fn failure_notice(&self) -> &'static str {
        match self {
            Operation::StartCall => {
                "Failed to start the call. Please check the number and try again."
            }
            Operation::CallStatus => "Failed to retrieve call status.",
            Operation::RecentCalls => "Failed to retrieve recent calls.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed backend request.
///
/// The operator only ever sees [`ApiError::notice`]; the variant detail is
/// for the log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{op}: HTTP {status}")]
    Status {
        op: Operation,
        status: reqwest::StatusCode,
    },

    #[error("{op}: request failed")]
    Transport {
        op: Operation,
        #[source]
        source: reqwest::Error,
    },

    #[error("{op}: malformed response body")]
    Decode {
        op: Operation,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    pub fn operation(&self) -> Operation {
        match self {
            ApiError::Status { op, .. }
            | ApiError::Transport { op, .. }
            | ApiError::Decode { op, .. } => *op,
        }
    }

    pub fn notice(&self) -> &'static str {
        self.operation().failure_notice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            op: Operation::CallStatus,
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert_eq!(err.to_string(), "call_status: HTTP 404 Not Found");
        assert_eq!(err.notice(), "Failed to retrieve call status.");
    }

    #[test]
    fn test_every_operation_has_a_notice() {
        for op in [
            Operation::StartCall,
            Operation::CallStatus,
            Operation::RecentCalls,
        ] {
            assert!(op.failure_notice().starts_with("Failed to"));
        }
    }
}
