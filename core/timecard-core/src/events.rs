//! Action-type classification for session feed events.
//!
//! The backend's `actionType` is free text. Recognized values partition
//! into start markers (open a work block) and end markers (close one);
//! everything else is inert: retained for display, never opens or closes
//! a block.

use chrono::{DateTime, Utc};
use serde::Serialize;
use timecard_feed_protocol::SessionEvent;

use crate::patterns::RE_SHUTDOWN_FLAG;

/// How an event's `actionType` participates in block accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionClass {
    Start,
    End,
    Inert,
}

impl ActionClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionClass::Start => "start",
            ActionClass::End => "end",
            ActionClass::Inert => "inert",
        }
    }
}

/// Classifies a free-text action type. Matching is case-insensitive and
/// ignores surrounding whitespace; unrecognized values are inert.
pub fn classify_action(action_type: &str) -> ActionClass {
    match action_type.trim().to_ascii_lowercase().as_str() {
        "login" | "unlock" | "resume" | "active" | "wake" => ActionClass::Start,
        "logout" | "logoff" | "lock" | "idle" | "sleep" | "hibernate" => ActionClass::End,
        _ => ActionClass::Inert,
    }
}

/// Returns true when the notes carry the retroactive shutdown annotation.
pub fn has_shutdown_flag(notes: Option<&str>) -> bool {
    notes
        .map(|value| RE_SHUTDOWN_FLAG.is_match(value))
        .unwrap_or(false)
}

/// Engine-internal view of a feed event with its timestamp parsed.
///
/// `feed_index` keeps ordering deterministic when timestamps tie.
#[derive(Debug, Clone)]
pub(crate) struct ParsedEvent {
    pub instant: DateTime<Utc>,
    pub class: ActionClass,
    pub shutdown_flagged: bool,
    pub feed_index: usize,
}

impl ParsedEvent {
    /// Lowers a wire event. Returns `None` when the timestamp does not
    /// parse; the engine counts those instead of failing the call.
    pub(crate) fn from_feed(index: usize, event: &SessionEvent) -> Option<Self> {
        let instant = parse_rfc3339(&event.event_timestamp)?;
        Some(Self {
            instant,
            class: classify_action(&event.action_type),
            shutdown_flagged: has_shutdown_flag(event.work_done_notes.as_deref()),
            feed_index: index,
        })
    }
}

pub(crate) fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_start_markers_case_insensitively() {
        for action in ["login", "LOGIN", "Unlock", "resume", "ACTIVE", " wake "] {
            assert_eq!(classify_action(action), ActionClass::Start, "{}", action);
        }
    }

    #[test]
    fn classifies_end_markers_case_insensitively() {
        for action in ["logout", "Logoff", "LOCK", "idle", "Sleep", "hibernate"] {
            assert_eq!(classify_action(action), ActionClass::End, "{}", action);
        }
    }

    #[test]
    fn unrecognized_actions_are_inert() {
        for action in ["screenshot", "heartbeat", "", "log in"] {
            assert_eq!(classify_action(action), ActionClass::Inert, "{:?}", action);
        }
    }

    #[test]
    fn detects_shutdown_flag_inside_longer_notes() {
        assert!(has_shutdown_flag(Some(
            "agent restarted; previous shutdown detected on boot"
        )));
        assert!(!has_shutdown_flag(Some("routine logout")));
        assert!(!has_shutdown_flag(None));
    }

    #[test]
    fn lowers_feed_event() {
        let event = SessionEvent {
            event_timestamp: "2024-03-01T19:05:00+05:30".to_string(),
            action_type: "Logout".to_string(),
            work_done_notes: Some("Previous Shutdown Detected".to_string()),
            event_category: None,
        };

        let parsed = ParsedEvent::from_feed(3, &event).expect("timestamp should parse");
        assert_eq!(parsed.class, ActionClass::End);
        assert!(parsed.shutdown_flagged);
        assert_eq!(parsed.feed_index, 3);
        assert_eq!(parsed.instant, parse_rfc3339("2024-03-01T13:35:00Z").unwrap());
    }

    #[test]
    fn lowering_rejects_unparseable_timestamp() {
        let event = SessionEvent {
            event_timestamp: "last tuesday".to_string(),
            action_type: "login".to_string(),
            work_done_notes: None,
            event_category: None,
        };

        assert!(ParsedEvent::from_feed(0, &event).is_none());
    }
}
