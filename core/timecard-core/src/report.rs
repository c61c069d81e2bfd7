//! Display-side shaping of a reconciliation result.
//!
//! The engine returns raw millisecond totals; callers render durations,
//! window bounds, and the event rows. This module owns that shaping so the
//! CLI and any future UI binding agree on what a report looks like.

use chrono::NaiveDate;
use serde::Serialize;
use timecard_feed_protocol::SessionEvent;

use crate::engine::Reconciliation;
use crate::error::Result;
use crate::events::{classify_action, has_shutdown_flag, parse_rfc3339};
use crate::shift::ShiftWindow;

/// Formats a millisecond total as "3h 55m". Minute granularity; sub-minute
/// remainders are truncated, zero renders as "0m".
pub fn format_duration_ms(ms: i64) -> String {
    let total_minutes = ms.max(0) / 60_000;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// One display row per feed event. Inert events are retained; the feed is
/// the caller's activity log, not just the engine's input.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub timestamp: String,
    pub action: String,
    pub class: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub shutdown_detected: bool,
}

/// Serializable reconciliation report for one (asset, shift date) query.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftReport {
    pub shift_date: String,
    pub window_start: String,
    pub window_end: String,
    pub standard: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<&'static str>,
    pub skipped_events: u32,
    pub events: Vec<ReportRow>,
}

impl ShiftReport {
    /// Builds a report from the raw feed events and a finished
    /// reconciliation. Rows are ordered by timestamp (feed order for ties
    /// and for rows whose timestamp does not parse, which sort last).
    pub fn build(
        events: &[SessionEvent],
        shift_date: NaiveDate,
        reconciliation: &Reconciliation,
    ) -> Result<Self> {
        let window = ShiftWindow::for_date(shift_date)?;

        let mut keyed: Vec<(usize, &SessionEvent)> = events.iter().enumerate().collect();
        keyed.sort_by_key(|(index, event)| {
            let instant = parse_rfc3339(&event.event_timestamp);
            (instant.is_none(), instant, *index)
        });

        let rows = keyed
            .into_iter()
            .map(|(_, event)| ReportRow {
                timestamp: event.event_timestamp.clone(),
                action: event.action_type.clone(),
                class: classify_action(&event.action_type).as_str(),
                category: event.event_category.clone(),
                notes: event.work_done_notes.clone(),
                shutdown_detected: has_shutdown_flag(event.work_done_notes.as_deref()),
            })
            .collect();

        Ok(Self {
            shift_date: shift_date.format("%Y-%m-%d").to_string(),
            window_start: window.start.to_rfc3339(),
            window_end: window.end.to_rfc3339(),
            standard: format_duration_ms(reconciliation.standard_ms),
            extra: reconciliation.extra_ms.map(format_duration_ms),
            activity: reconciliation.activity.label(),
            skipped_events: reconciliation.skipped_events,
            events: rows,
        })
    }

    /// Human-readable rendering used by the CLI's default output.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Shift {}\n", self.shift_date));
        out.push_str(&format!(
            "Window {} .. {}\n",
            self.window_start, self.window_end
        ));
        out.push_str(&format!("Standard: {}\n", self.standard));
        if let Some(extra) = &self.extra {
            out.push_str(&format!("Extra:    {}\n", extra));
        }
        if let Some(activity) = self.activity {
            out.push_str(&format!("Status:   {}\n", activity));
        }
        if self.skipped_events > 0 {
            out.push_str(&format!(
                "Skipped {} event(s) with unparseable timestamps\n",
                self.skipped_events
            ));
        }
        if !self.events.is_empty() {
            out.push_str("Events:\n");
            for row in &self.events {
                out.push_str(&format!(
                    "  {}  {:<10} [{}]",
                    row.timestamp, row.action, row.class
                ));
                if let Some(notes) = &row.notes {
                    out.push_str(&format!("  {}", notes));
                }
                out.push('\n');
            }
        }
        out
    }
}
