//! Error types for timecard-core operations.

/// All errors that can occur in timecard-core operations.
#[derive(Debug, thiserror::Error)]
pub enum TimecardError {
    // ─────────────────────────────────────────────────────────────────────
    // Shift window errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Invalid shift date: {value}: {reason}")]
    InvalidShiftDate { value: String, reason: String },

    #[error("Shift window out of calendar range for {0}")]
    ShiftWindowOutOfRange(chrono::NaiveDate),

    // ─────────────────────────────────────────────────────────────────────
    // Feed errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Feed read failed: {context}: {source}")]
    FeedRead {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Feed malformed: {context}: {source}")]
    FeedMalformed {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Session feed reported success = false")]
    FeedUnsuccessful,
}

/// Convenience type alias for Results using TimecardError.
pub type Result<T> = std::result::Result<T, TimecardError>;

// Conversion for string error compatibility
impl From<TimecardError> for String {
    fn from(err: TimecardError) -> String {
        err.to_string()
    }
}
