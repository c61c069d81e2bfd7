//! # timecard-core
//!
//! Shift-time reconciliation for VMS asset session feeds. Consumes the
//! time-ordered device session events for one (asset, shift date) query and
//! splits worked time into "standard" (inside the canonical nightly shift
//! window) and "extra" (outside it), discarding time attributable to an
//! unclean shutdown.
//!
//! ## Design Principles
//!
//! - **Pure**: `reconcile` does no I/O and holds no shared state; calls for
//!   different queries need no coordination.
//! - **Lenient on events, strict on dates**: individually malformed event
//!   timestamps are skipped and counted, never fatal; a malformed shift
//!   date is the caller's error.
//! - **Deterministic**: unsorted feeds are ordered internally with a stable
//!   key, so repeat calls over the same slice agree bit-for-bit.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use timecard_core::{parse_shift_date, reconcile};
//!
//! let feed = timecard_feed_protocol::parse_feed(&body)?;
//! let date = parse_shift_date("2024-03-01")?;
//! let result = reconcile(&feed.sessions, date)?;
//! ```

pub mod engine;
pub mod error;
pub mod events;
pub mod patterns;
pub mod report;
pub mod shift;

// Re-export commonly used items at crate root
pub use engine::{reconcile, reconcile_at, ActivityFlag, Reconciliation, MIN_REPORTABLE_EXTRA_MS};
pub use error::{Result, TimecardError};
pub use events::{classify_action, has_shutdown_flag, ActionClass};
pub use report::{format_duration_ms, ReportRow, ShiftReport};
pub use shift::{parse_shift_date, ShiftWindow, BUSINESS_TZ_OFFSET_SECS};
