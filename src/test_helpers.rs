use chrono::NaiveDate;

use crate::models::{
    AvailabilityBreakdown, OptionType, RiskLevel, TradeDetails, TradeRecord, TradeResult,
    WithdrawalRecord,
};
use crate::seed;

pub fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

/// A single trade with neutral details. `date` is `YYYY-MM-DD`.
pub fn make_record(
    id: &str,
    date: &str,
    option_type: OptionType,
    risk: RiskLevel,
    pnl: f64,
) -> TradeRecord {
    TradeRecord {
        id: id.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        option_type,
        strike: format!("$450{}", &option_type.as_str()[..1]),
        risk,
        volume: 5,
        result: TradeResult::Expired,
        pnl,
        details: TradeDetails {
            time: "10:30".to_string(),
            wait_time: "30m".to_string(),
            premium: 0.55,
            otm_pct: 2.5,
            delta: -0.15,
            gamma: 0.02,
            theta: -0.05,
            vega: 0.11,
            iv_rank: 42.0,
            stop_loss_ratio: 2.0,
            take_profit_ratio: 0.5,
            external_ref: String::new(),
            optimal_exit: false,
        },
    }
}

/// `n` varied trades ending on [`base_date`].
pub fn sample_records(n: usize) -> Vec<TradeRecord> {
    seed::trade_records(n, base_date())
}

/// total 50_000 = 30_000 available + 12_000 locked + 5_000 + 3_000 pending.
pub fn sample_breakdown() -> AvailabilityBreakdown {
    seed::breakdown(base_date())
}

/// One pending (800) and one completed (1500) withdrawal.
pub fn sample_withdrawals() -> Vec<WithdrawalRecord> {
    seed::withdrawals(base_date())
}
