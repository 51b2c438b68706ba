//! Dashboard controller: one render pass per operator action.
//!
//! A pass runs the requested action, polls the tracked call (at most once),
//! then re-fetches the recent calls table. Backend failures become notices;
//! nothing propagates out of a pass.

mod history;

use crate::api::CallApi;
use crate::session::{Outcome, SessionEvent, SessionState};

pub use history::{CallRow, RecentCallsView};

const EMPTY_HISTORY_NOTICE: &str = "No recent calls found or unable to retrieve call history.";

/// What the operator asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Plain re-render (startup).
    Render,
    Dial(String),
    RefreshStatus,
    RefreshHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A message for the operator produced by the last pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

pub struct Dashboard<A> {
    api: A,
    company: String,
    history_limit: usize,
    session: SessionState,
    history: RecentCallsView,
    notices: Vec<Notice>,
}

impl<A: CallApi> Dashboard<A> {
    pub fn new(api: A, company: impl Into<String>, history_limit: usize) -> Self {
        Self {
            api,
            company: company.into(),
            history_limit,
            session: SessionState::new(),
            history: RecentCallsView::default(),
            notices: Vec::new(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn history(&self) -> &RecentCallsView {
        &self.history
    }

    /// Notices from the most recent pass, in the order they were raised.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Run one full render pass for `action`.
    pub async fn run_pass(&mut self, action: Action) {
        self.notices.clear();
        tracing::debug!("Render pass: {:?}", action);

        let announce_status = match action {
            Action::Dial(number) => {
                self.dial(&number).await;
                false
            }
            Action::RefreshStatus => true,
            Action::Render | Action::RefreshHistory => false,
        };

        if self.session.call_in_progress() {
            self.poll_status(announce_status).await;
        }

        self.refresh_history().await;
    }

    async fn dial(&mut self, to_number: &str) {
        let to_number = to_number.trim();
        if to_number.is_empty() {
            self.notice(
                NoticeLevel::Error,
                "Enter a receiver number including the country code.",
            );
            return;
        }

        match self.api.start_call(to_number, &self.company).await {
            Ok(sid) => {
                self.apply(SessionEvent::Dialed { sid });
                self.notice(NoticeLevel::Success, "Call initiated successfully.");
            }
            Err(e) => {
                tracing::error!("Dial {} failed: {}", to_number, e);
                self.notice(NoticeLevel::Error, e.notice());
            }
        }
    }

    async fn poll_status(&mut self, announce: bool) {
        let Some(sid) = self.session.call_sid().map(str::to_owned) else {
            return;
        };

        match self.api.call_status(&sid).await {
            Ok(status) => {
                if announce {
                    self.notice(NoticeLevel::Info, format!("Updated Call Status: {}", status));
                }
                if self.apply(SessionEvent::StatusObserved { status }) == Outcome::Ended {
                    tracing::info!("Call {} ended", sid);
                    self.notice(NoticeLevel::Success, "Call has ended.");
                }
            }
            Err(e) => {
                tracing::warn!("Status poll for {} failed: {}", sid, e);
                self.notice(NoticeLevel::Error, e.notice());
            }
        }
    }

    async fn refresh_history(&mut self) {
        match self.api.recent_calls(self.history_limit).await {
            Ok(records) => {
                self.history = RecentCallsView::from_records(&records, self.history_limit);
            }
            Err(e) => {
                tracing::warn!("History fetch failed: {}", e);
                self.history = RecentCallsView::default();
                self.notice(NoticeLevel::Error, e.notice());
            }
        }

        if self.history.is_empty() {
            self.notice(NoticeLevel::Info, EMPTY_HISTORY_NOTICE);
        }
    }

    fn apply(&mut self, event: SessionEvent) -> Outcome {
        let (next, outcome) = std::mem::take(&mut self.session).apply(event);
        self.session = next;
        outcome
    }

    fn notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notices.push(Notice::new(level, text));
    }
}
