use serde::{Deserialize, Serialize};

/// Share of weekly profit suggested for withdrawal.
pub const DEFAULT_RATIO: f64 = 0.60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalRecommendation {
    pub weekly_profit: f64,
    pub ratio: f64,
    pub amount: f64,
    /// True when the raw suggestion was larger than the available balance.
    pub capped_by_balance: bool,
}

impl WithdrawalRecommendation {
    pub fn compute(weekly_profit: f64, ratio: f64, available_balance: f64) -> Self {
        let uncapped = raw_amount(weekly_profit, ratio);
        let amount = recommend_withdrawal(weekly_profit, ratio, available_balance);
        Self {
            weekly_profit,
            ratio: sanitize_ratio(ratio),
            amount,
            capped_by_balance: uncapped > amount,
        }
    }
}

/// `max(0, weekly_profit) * ratio`, rounded to cents and clamped to the
/// available balance. Always finite and non-negative.
pub fn recommend_withdrawal(weekly_profit: f64, ratio: f64, available_balance: f64) -> f64 {
    let available = if available_balance.is_finite() {
        available_balance.max(0.0)
    } else {
        0.0
    };
    raw_amount(weekly_profit, ratio).min(available)
}

fn raw_amount(weekly_profit: f64, ratio: f64) -> f64 {
    if !weekly_profit.is_finite() {
        return 0.0;
    }
    round2(weekly_profit.max(0.0) * sanitize_ratio(ratio))
}

fn sanitize_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
