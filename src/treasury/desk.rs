use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::{AvailabilityBreakdown, WithdrawalRecord, WithdrawalStatus};
use crate::treasury::recommendation::WithdrawalRecommendation;
use crate::treasury::withdrawal::{WithdrawalError, WithdrawalRequest};

/// Owns the fund snapshot and withdrawal history for the treasury views.
pub struct WithdrawalDesk {
    pub breakdown: AvailabilityBreakdown,
    withdrawals: Vec<WithdrawalRecord>,
    withdrawal_counter: u64,
    ratio: f64,
    fee: f64,
}

impl WithdrawalDesk {
    pub fn new(
        cfg: &Config,
        breakdown: AvailabilityBreakdown,
        withdrawals: Vec<WithdrawalRecord>,
    ) -> Self {
        let withdrawal_counter = withdrawals.len() as u64;
        Self {
            breakdown,
            withdrawals,
            withdrawal_counter,
            ratio: cfg.withdrawal_ratio,
            fee: cfg.withdrawal_fee.max(0.0),
        }
    }

    pub fn available(&self) -> f64 {
        self.breakdown.available
    }

    pub fn recommendation(&self, weekly_profit: f64) -> WithdrawalRecommendation {
        WithdrawalRecommendation::compute(weekly_profit, self.ratio, self.breakdown.available)
    }

    /// Validate the form and queue a pending withdrawal. The amount leaves
    /// `available` and the total immediately.
    pub fn submit(
        &mut self,
        request: &WithdrawalRequest,
        date: NaiveDate,
    ) -> Result<&WithdrawalRecord, WithdrawalError> {
        let valid = match request.validate(self.breakdown.available) {
            Ok(v) => v,
            Err(e) => {
                warn!("Withdrawal rejected: {}", e);
                return Err(e);
            }
        };

        self.withdrawal_counter += 1;
        let id = format!("WD-{:04}", self.withdrawal_counter);
        let transaction_id = format!("TX{}{:06}", date.format("%Y%m%d"), self.withdrawal_counter);

        self.breakdown.available = round2(self.breakdown.available - valid.amount);
        self.breakdown.total = round2(self.breakdown.total - valid.amount);

        info!(
            "Withdrawal {} queued: ${:.2} -> {} (fee ${:.2}, available now ${:.2})",
            id, valid.amount, valid.destination, self.fee, self.breakdown.available
        );

        self.withdrawals.insert(
            0,
            WithdrawalRecord {
                id,
                date,
                amount: valid.amount,
                status: WithdrawalStatus::Pending,
                destination: valid.destination,
                transaction_id,
                fee: self.fee,
            },
        );
        Ok(&self.withdrawals[0])
    }

    /// History, optionally restricted to one status, in stored order.
    pub fn history(&self, status: Option<WithdrawalStatus>) -> Vec<&WithdrawalRecord> {
        self.withdrawals
            .iter()
            .filter(|w| status.map_or(true, |s| w.status == s))
            .collect()
    }

    pub fn total_completed(&self) -> f64 {
        self.sum_status(WithdrawalStatus::Completed)
    }

    pub fn total_pending(&self) -> f64 {
        self.sum_status(WithdrawalStatus::Pending)
    }

    pub fn total_fees(&self) -> f64 {
        round2(self.withdrawals.iter().map(|w| w.fee).sum())
    }

    fn sum_status(&self, status: WithdrawalStatus) -> f64 {
        round2(
            self.withdrawals
                .iter()
                .filter(|w| w.status == status)
                .map(|w| w.amount)
                .sum(),
        )
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_breakdown, sample_withdrawals};

    fn desk() -> WithdrawalDesk {
        let mut cfg = Config::default();
        cfg.withdrawal_fee = 2.5;
        WithdrawalDesk::new(&cfg, sample_breakdown(), sample_withdrawals())
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    #[test]
    fn submit_queues_pending_and_debits_available() {
        let mut d = desk();
        let before = d.available();
        let rec = d
            .submit(&WithdrawalRequest::new(1200.0, "Chase ****4521"), day())
            .unwrap()
            .clone();
        assert_eq!(rec.status, WithdrawalStatus::Pending);
        assert_eq!(rec.fee, 2.5);
        assert_eq!(rec.id, "WD-0003");
        assert!(rec.transaction_id.starts_with("TX20250610"));
        assert_eq!(d.available(), before - 1200.0);
        assert_eq!(d.history(None)[0].id, rec.id);
        assert!(d.breakdown.is_consistent());
    }

    #[test]
    fn rejected_submit_changes_nothing() {
        let mut d = desk();
        let before = d.available();
        let err = d
            .submit(&WithdrawalRequest::new(before + 1.0, "bank"), day())
            .unwrap_err();
        assert!(matches!(err, WithdrawalError::ExceedsAvailable { .. }));
        assert_eq!(d.available(), before);
        assert_eq!(d.history(None).len(), 2);
    }

    #[test]
    fn totals_by_status() {
        let mut d = desk();
        assert_eq!(d.total_completed(), 1500.0);
        assert_eq!(d.total_pending(), 800.0);
        d.submit(&WithdrawalRequest::new(200.0, "bank"), day()).unwrap();
        assert_eq!(d.total_pending(), 1000.0);
        assert_eq!(d.history(Some(WithdrawalStatus::Pending)).len(), 2);
        assert_eq!(d.history(Some(WithdrawalStatus::Completed)).len(), 1);
    }

    #[test]
    fn recommendation_uses_configured_ratio_and_balance() {
        let d = desk();
        let r = d.recommendation(2000.0);
        assert_eq!(r.amount, 1200.0);
        let r = d.recommendation(1_000_000.0);
        assert_eq!(r.amount, d.available());
        assert!(r.capped_by_balance);
    }
}
