//! Call-related models (calling backend wire format)

use std::fmt;

use serde::{Deserialize, Serialize};

/// Statuses after which the backend will not move a call any further.
pub const TERMINAL_STATUSES: [&str; 2] = ["completed", "canceled"];

/// Whether a backend status string ends the call.
pub fn is_terminal_status(status: &str) -> bool {
    TERMINAL_STATUSES.contains(&status)
}

/// Body of `POST /start_call`.
#[derive(Debug, Clone, Serialize)]
pub struct StartCallRequest<'a> {
    pub to_number: &'a str,
    pub company: &'a str,
}

/// Response of `POST /start_call`.
#[derive(Debug, Clone, Deserialize)]
pub struct StartCallResponse {
    pub call_sid: String,
}

/// Response of `GET /call_status/{sid}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CallStatusResponse {
    pub status: String,
}

/// Response of `GET /all_calls`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecentCallsResponse {
    #[serde(default)]
    pub calls: Vec<CallRecord>,
}

/// Call duration as the backend reports it: sometimes a number, sometimes text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Duration {
    Seconds(u64),
    Fractional(f64),
    Text(String),
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Duration::Seconds(secs) => write!(f, "{}", secs),
            Duration::Fractional(secs) => write!(f, "{}", secs),
            Duration::Text(text) => f.write_str(text),
        }
    }
}

/// One call as listed by the backend. Every field may be missing or null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallRecord {
    pub sid: Option<String>,
    pub to: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration_in_seconds: Option<Duration>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(is_terminal_status("completed"));
        assert!(is_terminal_status("canceled"));
        assert!(!is_terminal_status("initiated"));
        assert!(!is_terminal_status("in-progress"));
        assert!(!is_terminal_status("Completed"));
    }

    #[test]
    fn test_call_record_tolerates_missing_and_null_fields() {
        let json = r#"{"calls": [
            {"to": "+919876543210", "start_time": "2024-01-15 10:30:00+0000",
             "end_time": null, "duration_in_seconds": 42, "status": "completed", "sid": "CA1"},
            {"sid": "CA2", "duration_in_seconds": "17"},
            {}
        ]}"#;
        let resp: RecentCallsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.calls.len(), 3);

        let first = &resp.calls[0];
        assert_eq!(first.to.as_deref(), Some("+919876543210"));
        assert_eq!(first.end_time, None);
        assert_eq!(first.duration_in_seconds, Some(Duration::Seconds(42)));

        let second = &resp.calls[1];
        assert_eq!(second.duration_in_seconds, Some(Duration::Text("17".into())));
        assert_eq!(second.to, None);

        assert!(resp.calls[2].sid.is_none());
    }

    #[test]
    fn test_start_call_request_shape() {
        let body = serde_json::to_value(StartCallRequest {
            to_number: "+919876543210",
            company: "huru",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"to_number": "+919876543210", "company": "huru"})
        );
    }
}
