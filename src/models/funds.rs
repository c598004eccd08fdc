use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    Pending,
    Completed,
}

impl fmt::Display for WithdrawalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WithdrawalStatus::Pending => write!(f, "Pending"),
            WithdrawalStatus::Completed => write!(f, "Completed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalRecord {
    pub id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub status: WithdrawalStatus,
    pub destination: String,
    pub transaction_id: String,
    #[serde(default)]
    pub fee: f64,
}

impl WithdrawalRecord {
    pub fn net_amount(&self) -> f64 {
        self.amount - self.fee
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingRelease {
    pub amount: f64,
    pub release_date: NaiveDate,
    pub reason: String,
}

/// Snapshot of fund state. `available + locked + sum(pending_release)` is
/// expected to equal `total` but is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityBreakdown {
    pub total: f64,
    pub available: f64,
    pub locked: f64,
    #[serde(default)]
    pub pending_release: Vec<PendingRelease>,
}
