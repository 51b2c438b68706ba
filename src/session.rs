//! Per-session call tracking.
//!
//! The session is a plain value: each transition takes the current state and
//! an event and returns the next state. Failed backend requests produce no
//! event, so they can never change it.

use crate::models::is_terminal_status;

/// Status assumed for a call the backend has just accepted.
pub const INITIAL_STATUS: &str = "initiated";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CallPhase {
    #[default]
    Idle,
    InProgress {
        sid: String,
    },
}

/// Things that happen to the tracked call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The backend accepted a new call.
    Dialed { sid: String },
    /// A status poll returned this value.
    StatusObserved { status: String },
}

/// Result of a transition that the UI may want to announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Started,
    Updated,
    Ended,
    /// Status arrived with no call being tracked.
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    phase: CallPhase,
    last_status: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_in_progress(&self) -> bool {
        matches!(self.phase, CallPhase::InProgress { .. })
    }

    pub fn call_sid(&self) -> Option<&str> {
        match &self.phase {
            CallPhase::InProgress { sid } => Some(sid.as_str()),
            CallPhase::Idle => None,
        }
    }

    /// Last status seen, kept after the call ends.
    pub fn call_status(&self) -> Option<&str> {
        self.last_status.as_deref()
    }

    /// Apply one event.
    pub fn apply(self, event: SessionEvent) -> (SessionState, Outcome) {
        match event {
            SessionEvent::Dialed { sid } => (
                SessionState {
                    phase: CallPhase::InProgress { sid },
                    last_status: Some(INITIAL_STATUS.to_string()),
                },
                Outcome::Started,
            ),
            SessionEvent::StatusObserved { status } => {
                if !self.call_in_progress() {
                    return (self, Outcome::Ignored);
                }
                if is_terminal_status(&status) {
                    (
                        SessionState {
                            phase: CallPhase::Idle,
                            last_status: Some(status),
                        },
                        Outcome::Ended,
                    )
                } else {
                    (
                        SessionState {
                            phase: self.phase,
                            last_status: Some(status),
                        },
                        Outcome::Updated,
                    )
                }
            }
        }
    }
}
