//! Compiled regex patterns for feed annotation parsing.
//!
//! Compiled once on first use and reused across reconciliation calls.
//! Update these when the client agent's annotation wording changes.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches the retroactive shutdown annotation the client agent attaches to
/// end-marker events emitted at the next boot. Case-insensitive, tolerant
/// of whitespace runs between the words.
pub static RE_SHUTDOWN_FLAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)previous\s+shutdown\s+detected").unwrap());
