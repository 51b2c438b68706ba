//! Recent calls table projection.

use crate::models::CallRecord;
use crate::timezone::{to_display_timezone, PLACEHOLDER};

/// One display row of the recent calls table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRow {
    pub receiver: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: String,
    pub status: String,
    pub call_id: String,
}

impl CallRow {
    pub const HEADERS: [&'static str; 6] = [
        "Receiver",
        "Start Time (IST)",
        "End Time (IST)",
        "Duration (s)",
        "Status",
        "Call ID",
    ];

    pub fn from_record(record: &CallRecord) -> Self {
        Self {
            receiver: or_placeholder(record.to.as_deref()),
            start_time: to_display_timezone(record.start_time.as_deref()),
            end_time: to_display_timezone(record.end_time.as_deref()),
            duration: record
                .duration_in_seconds
                .as_ref()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "0".to_string()),
            status: or_placeholder(record.status.as_deref()),
            call_id: or_placeholder(record.sid.as_deref()),
        }
    }

    /// Cells in header order.
    pub fn cells(&self) -> [&str; 6] {
        [
            self.receiver.as_str(),
            self.start_time.as_str(),
            self.end_time.as_str(),
            self.duration.as_str(),
            self.status.as_str(),
            self.call_id.as_str(),
        ]
    }
}

fn or_placeholder(value: Option<&str>) -> String {
    value.unwrap_or(PLACEHOLDER).to_string()
}

/// Rows shown in the recent calls table, in backend order.
#[derive(Debug, Clone, Default)]
pub struct RecentCallsView {
    rows: Vec<CallRow>,
}

impl RecentCallsView {
    /// Project backend records, keeping at most `limit` rows.
    pub fn from_records(records: &[CallRecord], limit: usize) -> Self {
        Self {
            rows: records.iter().take(limit).map(CallRow::from_record).collect(),
        }
    }

    pub fn rows(&self) -> &[CallRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Duration;

    fn record(sid: &str) -> CallRecord {
        CallRecord {
            sid: Some(sid.to_string()),
            ..CallRecord::default()
        }
    }

    #[test]
    fn test_full_record_projection() {
        let row = CallRow::from_record(&CallRecord {
            sid: Some("CA1".to_string()),
            to: Some("+919876543210".to_string()),
            start_time: Some("2024-01-15 10:30:00+0000".to_string()),
            end_time: Some("2024-01-15 10:31:05+0000".to_string()),
            duration_in_seconds: Some(Duration::Seconds(65)),
            status: Some("completed".to_string()),
        });
        assert_eq!(
            row.cells(),
            [
                "+919876543210",
                "2024-01-15 16:00:00",
                "2024-01-15 16:01:05",
                "65",
                "completed",
                "CA1"
            ]
        );
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let row = CallRow::from_record(&CallRecord::default());
        assert_eq!(row.cells(), ["-", "-", "-", "0", "-", "-"]);
    }

    #[test]
    fn test_unparseable_time_passes_through() {
        let row = CallRow::from_record(&CallRecord {
            start_time: Some("pending".to_string()),
            ..CallRecord::default()
        });
        assert_eq!(row.start_time, "pending");
    }

    #[test]
    fn test_view_caps_rows_and_keeps_order() {
        let records: Vec<_> = (0..15).map(|i| record(&format!("CA{}", i))).collect();
        let view = RecentCallsView::from_records(&records, 10);
        assert_eq!(view.rows().len(), 10);
        let ids: Vec<_> = view.rows().iter().map(|r| r.call_id.as_str()).collect();
        assert_eq!(ids[0], "CA0");
        assert_eq!(ids[9], "CA9");
    }

    #[test]
    fn test_view_shorter_than_limit() {
        let view = RecentCallsView::from_records(&[record("CA7"), record("CA3")], 10);
        let ids: Vec<_> = view.rows().iter().map(|r| r.call_id.as_str()).collect();
        assert_eq!(ids, vec!["CA7", "CA3"]);
        assert!(RecentCallsView::default().is_empty());
    }
}
