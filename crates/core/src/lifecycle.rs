//! Complaint lifecycle rules.
//!
//! Any status may move to any other status. The only rule is how the
//! resolution timestamp follows the status: it is stamped when a complaint
//! enters `resolved`, kept while it stays there, and cleared when it leaves.

use aduan_db::entities::complaint::ComplaintStatus;
use chrono::{DateTime, FixedOffset};

/// Resolution timestamp after moving from `current` to `target`.
///
/// The target check comes first: a non-resolved target always clears the
/// timestamp. A resolved target only stamps `now` when the complaint was not
/// already resolved, so re-saving a resolved complaint keeps its original time.
#[must_use]
pub fn next_resolved_at(
    current: ComplaintStatus,
    current_resolved_at: Option<DateTime<FixedOffset>>,
    target: ComplaintStatus,
    now: DateTime<FixedOffset>,
) -> Option<DateTime<FixedOffset>> {
    if target != ComplaintStatus::Resolved {
        return None;
    }

    if current == ComplaintStatus::Resolved {
        // A resolved row written outside this service may lack a timestamp
        return Some(current_resolved_at.unwrap_or(now));
    }

    Some(now)
}
