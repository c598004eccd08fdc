use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{AvailabilityBreakdown, PendingRelease};

const CONSISTENCY_TOLERANCE: f64 = 0.005;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseShare {
    pub amount: f64,
    pub release_date: NaiveDate,
    pub reason: String,
    pub pct_of_total: f64,
}

impl AvailabilityBreakdown {
    pub fn pending_total(&self) -> f64 {
        self.pending_release.iter().map(|p| p.amount).sum()
    }

    pub fn available_pct(&self) -> f64 {
        pct(self.available, self.total)
    }

    pub fn locked_pct(&self) -> f64 {
        pct(self.locked, self.total)
    }

    /// Combined share of every pending release. This is the single figure
    /// the fund breakdown shows for the pending group.
    pub fn pending_pct(&self) -> f64 {
        pct(self.pending_total(), self.total)
    }

    /// Each pending release's own share of the total.
    pub fn pending_release_shares(&self) -> Vec<ReleaseShare> {
        self.pending_release
            .iter()
            .map(|p| ReleaseShare {
                amount: p.amount,
                release_date: p.release_date,
                reason: p.reason.clone(),
                pct_of_total: pct(p.amount, self.total),
            })
            .collect()
    }

    /// `total - (available + locked + pending)`. Zero when the snapshot
    /// adds up.
    pub fn unaccounted(&self) -> f64 {
        self.total - (self.available + self.locked + self.pending_total())
    }

    pub fn is_consistent(&self) -> bool {
        self.unaccounted().abs() < CONSISTENCY_TOLERANCE
    }

    /// Releases due on or before `as_of`, soonest first.
    pub fn releases_due(&self, as_of: NaiveDate) -> Vec<&PendingRelease> {
        let mut due: Vec<_> = self
            .pending_release
            .iter()
            .filter(|p| p.release_date <= as_of)
            .collect();
        due.sort_by_key(|p| p.release_date);
        due
    }
}

fn pct(part: f64, total: f64) -> f64 {
    if total <= 0.0 || !total.is_finite() {
        return 0.0;
    }
    (part / total * 10000.0).round() / 100.0
}
