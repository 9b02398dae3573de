//! Complaint statistics.
//!
//! Statistics are recomputed from stored complaints on every read; nothing
//! here is cached or maintained incrementally.

use std::collections::BTreeMap;

use aduan_db::entities::complaint::{ComplaintCategory, ComplaintStatus};
use serde::Serialize;

/// Complaint totals per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub resolved: u64,
    pub rejected: u64,
}

impl StatusCounts {
    /// Build from grouped `(status, count)` rows. Missing statuses count as zero.
    #[must_use]
    pub fn tally(rows: impl IntoIterator<Item = (ComplaintStatus, u64)>) -> Self {
        rows.into_iter().fold(Self::default(), |mut counts, (status, n)| {
            counts.add(status, n);
            counts
        })
    }

    /// Build from individual complaint statuses.
    #[must_use]
    pub fn from_statuses(statuses: impl IntoIterator<Item = ComplaintStatus>) -> Self {
        Self::tally(statuses.into_iter().map(|s| (s, 1)))
    }

    fn add(&mut self, status: ComplaintStatus, n: u64) {
        self.total += n;
        let slot = match status {
            ComplaintStatus::Pending => &mut self.pending,
            ComplaintStatus::InProgress => &mut self.in_progress,
            ComplaintStatus::Resolved => &mut self.resolved,
            ComplaintStatus::Rejected => &mut self.rejected,
        };
        *slot += n;
    }

    /// Count for a single status.
    #[must_use]
    pub const fn get(&self, status: ComplaintStatus) -> u64 {
        match status {
            ComplaintStatus::Pending => self.pending,
            ComplaintStatus::InProgress => self.in_progress,
            ComplaintStatus::Resolved => self.resolved,
            ComplaintStatus::Rejected => self.rejected,
        }
    }

    /// The resident-facing view, which leaves out rejected complaints as a
    /// separate figure. `total` still covers every complaint.
    #[must_use]
    pub const fn public(&self) -> PublicStatusCounts {
        PublicStatusCounts {
            total: self.total,
            pending: self.pending,
            in_progress: self.in_progress,
            resolved: self.resolved,
        }
    }
}

/// Status totals shown on the public listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PublicStatusCounts {
    pub total: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub resolved: u64,
}

/// Complaint totals per category.
///
/// Only categories with at least one complaint appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryCounts(BTreeMap<ComplaintCategory, u64>);

impl CategoryCounts {
    /// Build from grouped `(category, count)` rows.
    #[must_use]
    pub fn tally(rows: impl IntoIterator<Item = (ComplaintCategory, u64)>) -> Self {
        let mut map = BTreeMap::new();
        for (category, n) in rows {
            if n > 0 {
                *map.entry(category).or_insert(0) += n;
            }
        }
        Self(map)
    }

    /// Count for a category, zero when absent.
    #[must_use]
    pub fn get(&self, category: ComplaintCategory) -> u64 {
        self.0.get(&category).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses(groups: &[(ComplaintStatus, usize)]) -> Vec<ComplaintStatus> {
        groups
            .iter()
            .flat_map(|(s, n)| std::iter::repeat_n(*s, *n))
            .collect()
    }

    #[test]
    fn test_status_counts_scenario() {
        let all = statuses(&[
            (ComplaintStatus::Pending, 10),
            (ComplaintStatus::InProgress, 5),
            (ComplaintStatus::Resolved, 8),
            (ComplaintStatus::Rejected, 2),
        ]);

        let counts = StatusCounts::from_statuses(all);

        assert_eq!(
            counts,
            StatusCounts {
                total: 25,
                pending: 10,
                in_progress: 5,
                resolved: 8,
                rejected: 2,
            }
        );
    }

    #[test]
    fn test_tally_fills_missing_with_zero() {
        let counts = StatusCounts::tally([(ComplaintStatus::Resolved, 3)]);

        assert_eq!(counts.total, 3);
        assert_eq!(counts.get(ComplaintStatus::Pending), 0);
        assert_eq!(counts.get(ComplaintStatus::Resolved), 3);
    }

    #[test]
    fn test_public_view_keeps_total() {
        let counts = StatusCounts::tally([
            (ComplaintStatus::Pending, 4),
            (ComplaintStatus::Rejected, 6),
        ]);

        let public = counts.public();
        assert_eq!(public.total, 10);
        assert_eq!(public.pending, 4);

        let json = serde_json::to_value(public).unwrap_or_default();
        assert!(json.get("rejected").is_none());
    }

    #[test]
    fn test_category_counts_omit_empty() {
        let counts = CategoryCounts::tally([
            (ComplaintCategory::Road, 3),
            (ComplaintCategory::Water, 0),
            (ComplaintCategory::Bridge, 1),
        ]);

        assert_eq!(counts.get(ComplaintCategory::Road), 3);
        assert_eq!(counts.get(ComplaintCategory::Water), 0);

        let json = serde_json::to_value(&counts).unwrap_or_default();
        assert_eq!(json, serde_json::json!({ "road": 3, "bridge": 1 }));
    }
}
