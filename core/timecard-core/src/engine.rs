//! Shift-time reconciliation over a session event feed.
//!
//! Folds the device session events for one (asset, shift date) query into
//! worked time inside and outside the canonical shift window. Pure
//! computation: no I/O, no shared state, safe to call concurrently for
//! different queries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use timecard_feed_protocol::SessionEvent;
use tracing::{debug, warn};

use crate::error::Result;
use crate::events::{ActionClass, ParsedEvent};
use crate::shift::ShiftWindow;

/// Out-of-window time at or below this many milliseconds is omitted from
/// the result; sub-minute lock/unlock churn stays out of the display.
pub const MIN_REPORTABLE_EXTRA_MS: i64 = 60_000;

/// Open-block disposition when the feed ends without a matching end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityFlag {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "active now")]
    ActiveNow,
    #[serde(rename = "missing logout")]
    MissingLogout,
}

impl ActivityFlag {
    /// Display label; `None` when there is nothing to show.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            ActivityFlag::None => None,
            ActivityFlag::ActiveNow => Some("active now"),
            ActivityFlag::MissingLogout => Some("missing logout"),
        }
    }
}

/// Outcome of one reconciliation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    /// Worked milliseconds overlapping the shift window.
    pub standard_ms: i64,
    /// Worked milliseconds outside the window; `None` at or below the
    /// reporting threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_ms: Option<i64>,
    /// Open-block disposition after the scan.
    pub activity: ActivityFlag,
    /// Events rejected for unparseable timestamps.
    pub skipped_events: u32,
}

/// Reconciles a session feed against the shift window for `shift_date`,
/// evaluating any trailing open block against the current instant.
///
/// The input slice is borrowed and never mutated; events arriving unsorted
/// are ordered internally, so repeat calls over the same slice are
/// idempotent.
pub fn reconcile(events: &[SessionEvent], shift_date: NaiveDate) -> Result<Reconciliation> {
    reconcile_at(events, shift_date, Utc::now())
}

/// Same computation as [`reconcile`] with an injected clock.
pub fn reconcile_at(
    events: &[SessionEvent],
    shift_date: NaiveDate,
    now: DateTime<Utc>,
) -> Result<Reconciliation> {
    let window = ShiftWindow::for_date(shift_date)?;

    let mut parsed = Vec::with_capacity(events.len());
    let mut skipped_events = 0u32;
    for (index, event) in events.iter().enumerate() {
        match ParsedEvent::from_feed(index, event) {
            Some(view) => parsed.push(view),
            None => {
                skipped_events += 1;
                warn!(
                    index,
                    timestamp = %event.event_timestamp,
                    "Skipping event with unparseable timestamp"
                );
            }
        }
    }
    parsed.sort_by_key(|event| (event.instant, event.feed_index));

    let mut totals = BlockTotals::default();
    let mut open_start: Option<DateTime<Utc>> = None;

    for event in &parsed {
        match (event.class, open_start) {
            (ActionClass::Start, None) => {
                open_start = Some(event.instant);
            }
            (ActionClass::Start, Some(_)) => {
                debug!(
                    index = event.feed_index,
                    "Ignoring start marker while a block is already open"
                );
            }
            (ActionClass::End, Some(start)) => {
                if event.shutdown_flagged {
                    // The timestamp is the reboot instant, not when work
                    // stopped; the whole block is unattributable.
                    debug!(
                        index = event.feed_index,
                        "Discarding block closed by a shutdown-detected event"
                    );
                } else {
                    totals.account(start, event.instant, &window);
                }
                open_start = None;
            }
            (ActionClass::End, None) => {
                debug!(
                    index = event.feed_index,
                    "Ignoring end marker with no open block"
                );
            }
            (ActionClass::Inert, _) => {}
        }
    }

    let mut activity = ActivityFlag::None;
    if let Some(start) = open_start {
        if now < window.end {
            totals.account(start, now, &window);
            activity = ActivityFlag::ActiveNow;
        } else {
            // Open-ended credit past the window is unbounded; the forgotten
            // logout is surfaced instead.
            activity = ActivityFlag::MissingLogout;
        }
    }

    Ok(Reconciliation {
        standard_ms: totals.standard_ms,
        extra_ms: reportable_extra(totals.extra_ms),
        activity,
        skipped_events,
    })
}

#[derive(Debug, Default)]
struct BlockTotals {
    standard_ms: i64,
    extra_ms: i64,
}

impl BlockTotals {
    /// Accounts one closed block, splitting it across the window boundary.
    /// Non-positive blocks are dropped as clock skew.
    fn account(&mut self, start: DateTime<Utc>, end: DateTime<Utc>, window: &ShiftWindow) {
        let total = (end - start).num_milliseconds();
        if total <= 0 {
            return;
        }

        let overlap_start = start.max(window.start);
        let overlap_end = end.min(window.end);
        let within = if overlap_start < overlap_end {
            (overlap_end - overlap_start).num_milliseconds()
        } else {
            0
        };

        self.standard_ms += within;
        self.extra_ms += total - within;
    }
}

fn reportable_extra(extra_ms: i64) -> Option<i64> {
    (extra_ms > MIN_REPORTABLE_EXTRA_MS).then_some(extra_ms)
}
