//! Feed input for the CLI: file or stdin, lenient envelope decode.

use std::io::Read;
use std::path::Path;

use timecard_core::{Result, TimecardError};
use timecard_feed_protocol::SessionFeed;

/// Reads the feed body from a file, or stdin when no path is given.
pub fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fs_err::read_to_string(path).map_err(|e| TimecardError::FeedRead {
            context: path.display().to_string(),
            source: e,
        }),
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .map_err(|e| TimecardError::FeedRead {
                    context: "stdin".to_string(),
                    source: e,
                })?;
            Ok(body)
        }
    }
}

/// Lenient decode for reporting: the envelope must parse and the backend
/// must have accepted the query, but individually malformed events are left
/// for the engine to skip and count.
pub fn decode_feed(body: &str) -> Result<SessionFeed> {
    let feed: SessionFeed =
        serde_json::from_str(body).map_err(|e| TimecardError::FeedMalformed {
            context: "session feed".to_string(),
            source: e,
        })?;
    if !feed.success {
        return Err(TimecardError::FeedUnsuccessful);
    }
    Ok(feed)
}
