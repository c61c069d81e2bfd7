//! Wire types and validation for the VMS asset session feed.
//!
//! This crate is shared by every consumer of the session feed to prevent
//! schema drift. The backend remains the authority on what it serves, but
//! callers reuse the same types to decode a feed and pre-validate it before
//! handing the events to the reconciliation engine.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

pub const MAX_FEED_BYTES: usize = 1024 * 1024; // 1MB

/// One device state-change recorded by the client agent.
///
/// Field names mirror the backend's camelCase JSON. Only `eventTimestamp`
/// and `actionType` are required; newer backends may attach extra fields,
/// so unknown keys are tolerated rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEvent {
    /// Instant the event was recorded (ISO-8601 with offset).
    pub event_timestamp: String,
    /// Free-text action category; classification is the engine's concern.
    pub action_type: String,
    /// Free-text annotation; may carry the shutdown-detected flag.
    #[serde(default)]
    pub work_done_notes: Option<String>,
    /// Display-only classification, never consumed by reconciliation.
    #[serde(default)]
    pub event_category: Option<String>,
}

/// The backend envelope for a per-asset, per-shift-date session query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFeed {
    pub success: bool,
    #[serde(default)]
    pub sessions: Vec<SessionEvent>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

impl SessionEvent {
    pub fn validate(&self) -> Result<(), ErrorInfo> {
        require_non_empty(&self.event_timestamp, "eventTimestamp")?;
        if DateTime::parse_from_rfc3339(&self.event_timestamp).is_err() {
            return Err(ErrorInfo::new(
                "invalid_timestamp",
                "eventTimestamp must be an ISO-8601 instant with offset",
            ));
        }
        require_non_empty(&self.action_type, "actionType")?;
        Ok(())
    }
}

impl SessionFeed {
    /// Validates every event, reporting the index of the first offender.
    pub fn validate(&self) -> Result<(), ErrorInfo> {
        for (index, event) in self.sessions.iter().enumerate() {
            if let Err(err) = event.validate() {
                return Err(ErrorInfo::new(
                    &err.code,
                    format!("sessions[{}]: {}", index, err.message),
                ));
            }
        }
        Ok(())
    }
}

/// Strict feed entry point: size cap, JSON decode, then field validation.
///
/// The reconciliation engine itself tolerates individually malformed events
/// (it skips and counts them); this is for callers that want to reject a
/// bad feed outright.
pub fn parse_feed(body: &str) -> Result<SessionFeed, ErrorInfo> {
    if body.len() > MAX_FEED_BYTES {
        return Err(ErrorInfo::new(
            "feed_too_large",
            "feed exceeded maximum size",
        ));
    }

    let feed: SessionFeed = serde_json::from_str(body).map_err(|err| {
        ErrorInfo::new("invalid_json", format!("feed was not valid JSON: {}", err))
    })?;
    feed.validate()?;
    Ok(feed)
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ErrorInfo> {
    if value.trim().is_empty() {
        return Err(ErrorInfo::new(
            "missing_field",
            format!("{} is required", field),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_event() -> SessionEvent {
        SessionEvent {
            event_timestamp: "2024-03-01T19:05:00+05:30".to_string(),
            action_type: "Login".to_string(),
            work_done_notes: None,
            event_category: None,
        }
    }

    #[test]
    fn validates_well_formed_event() {
        let event = base_event();
        assert!(event.validate().is_ok());
    }

    #[test]
    fn rejects_bad_timestamp() {
        let mut event = base_event();
        event.event_timestamp = "yesterday evening".to_string();
        let err = event.validate().unwrap_err();
        assert_eq!(err.code, "invalid_timestamp");
    }

    #[test]
    fn rejects_blank_action_type() {
        let mut event = base_event();
        event.action_type = "   ".to_string();
        let err = event.validate().unwrap_err();
        assert_eq!(err.code, "missing_field");
    }

    #[test]
    fn parses_camel_case_payload() {
        let body = r#"{
            "success": true,
            "sessions": [
                {
                    "eventTimestamp": "2024-03-01T19:05:00+05:30",
                    "actionType": "login",
                    "workDoneNotes": "Previous shutdown detected",
                    "eventCategory": "Remote"
                }
            ]
        }"#;

        let feed = parse_feed(body).expect("feed should parse");
        assert!(feed.success);
        assert_eq!(feed.sessions.len(), 1);
        assert_eq!(feed.sessions[0].action_type, "login");
        assert_eq!(
            feed.sessions[0].work_done_notes.as_deref(),
            Some("Previous shutdown detected")
        );
        assert_eq!(feed.sessions[0].event_category.as_deref(), Some("Remote"));
    }

    #[test]
    fn missing_sessions_parses_as_empty_feed() {
        let feed = parse_feed(r#"{"success": true}"#).expect("feed should parse");
        assert!(feed.sessions.is_empty());
    }

    #[test]
    fn tolerates_unknown_fields() {
        let body = r#"{
            "success": true,
            "requestId": "req-42",
            "sessions": [
                {
                    "eventTimestamp": "2024-03-01T19:05:00+05:30",
                    "actionType": "login",
                    "assetTag": "LT-0042"
                }
            ]
        }"#;

        let feed = parse_feed(body).expect("newer backend fields should not break parsing");
        assert_eq!(feed.sessions.len(), 1);
    }

    #[test]
    fn reports_index_of_first_bad_event() {
        let body = r#"{
            "success": true,
            "sessions": [
                {"eventTimestamp": "2024-03-01T19:05:00+05:30", "actionType": "login"},
                {"eventTimestamp": "not-a-time", "actionType": "logout"}
            ]
        }"#;

        let err = parse_feed(body).unwrap_err();
        assert_eq!(err.code, "invalid_timestamp");
        assert!(err.message.contains("sessions[1]"), "got: {}", err.message);
    }

    #[test]
    fn rejects_invalid_json() {
        let err = parse_feed("{ not json }").unwrap_err();
        assert_eq!(err.code, "invalid_json");
    }

    #[test]
    fn rejects_oversized_feed() {
        let body = "x".repeat(MAX_FEED_BYTES + 1);
        let err = parse_feed(&body).unwrap_err();
        assert_eq!(err.code, "feed_too_large");
    }
}
