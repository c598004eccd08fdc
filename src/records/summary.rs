use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::US::Eastern;
use serde::{Deserialize, Serialize};

use crate::models::{TradeRecord, TradeResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordsSummary {
    pub total_trades: usize,
    pub total_contracts: u64,
    pub total_pnl: f64,
    pub avg_pnl: f64,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
    pub expired: usize,
    pub stopped: usize,
    pub exercised: usize,
}

impl RecordsSummary {
    pub fn from_records(records: &[TradeRecord]) -> Self {
        let total_trades = records.len();
        if total_trades == 0 {
            return Self::default();
        }

        let total_pnl: f64 = records.iter().map(|r| r.pnl).sum();
        let winning_trades = records.iter().filter(|r| r.pnl > 0.0).count();
        let count = |res: TradeResult| records.iter().filter(|r| r.result == res).count();

        let best_trade = records
            .iter()
            .map(|r| r.pnl)
            .fold(f64::NEG_INFINITY, f64::max);
        let worst_trade = records
            .iter()
            .map(|r| r.pnl)
            .fold(f64::INFINITY, f64::min);

        Self {
            total_trades,
            total_contracts: records.iter().map(|r| r.volume as u64).sum(),
            total_pnl: round2(total_pnl),
            avg_pnl: round2(total_pnl / total_trades as f64),
            winning_trades,
            losing_trades: total_trades - winning_trades,
            win_rate: round2(winning_trades as f64 / total_trades as f64 * 100.0),
            best_trade,
            worst_trade,
            expired: count(TradeResult::Expired),
            stopped: count(TradeResult::Stopped),
            exercised: count(TradeResult::Exercised),
        }
    }
}

/// Monday of the trading week containing `now`, in US/Eastern.
pub fn trading_week_start(now: DateTime<Utc>) -> NaiveDate {
    let today = now.with_timezone(&Eastern).date_naive();
    today - Duration::days(today.weekday().num_days_from_monday() as i64)
}

/// Sum of PnL for records dated Monday..=today of the current trading week.
pub fn weekly_profit(records: &[TradeRecord], now: DateTime<Utc>) -> f64 {
    let today = now.with_timezone(&Eastern).date_naive();
    let week_start = trading_week_start(now);
    let sum: f64 = records
        .iter()
        .filter(|r| r.date >= week_start && r.date <= today)
        .map(|r| r.pnl)
        .sum();
    round2(sum)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OptionType, RiskLevel};
    use crate::test_helpers::make_record;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn empty_summary_is_zeroed() {
        let s = RecordsSummary::from_records(&[]);
        assert_eq!(s.total_trades, 0);
        assert_eq!(s.win_rate, 0.0);
        assert_eq!(s.best_trade, 0.0);
    }

    #[test]
    fn summary_counts_wins_and_results() {
        let mut records = vec![
            make_record("a", "2025-06-02", OptionType::Put, RiskLevel::Low, 55.0),
            make_record("b", "2025-06-03", OptionType::Call, RiskLevel::High, -120.0),
            make_record("c", "2025-06-04", OptionType::Both, RiskLevel::Moderate, 78.0),
            make_record("d", "2025-06-05", OptionType::Put, RiskLevel::Low, 0.0),
        ];
        records[1].result = TradeResult::Stopped;
        records[2].result = TradeResult::Exercised;

        let s = RecordsSummary::from_records(&records);
        assert_eq!(s.total_trades, 4);
        assert_eq!(s.winning_trades, 2);
        assert_eq!(s.losing_trades, 2);
        assert!((s.win_rate - 50.0).abs() < 1e-9);
        assert!((s.total_pnl - 13.0).abs() < 1e-9);
        assert_eq!(s.best_trade, 78.0);
        assert_eq!(s.worst_trade, -120.0);
        assert_eq!((s.expired, s.stopped, s.exercised), (2, 1, 1));
    }

    #[test]
    fn week_starts_monday_eastern() {
        // 2025-06-09 02:00 UTC is still Sunday 2025-06-08 in New York
        let start = trading_week_start(utc("2025-06-09T02:00:00Z"));
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());

        let start = trading_week_start(utc("2025-06-11T15:00:00Z"));
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 6, 9).unwrap());
    }

    #[test]
    fn weekly_profit_sums_current_week_only() {
        let records = vec![
            make_record("old", "2025-06-06", OptionType::Put, RiskLevel::Low, 900.0),
            make_record("mon", "2025-06-09", OptionType::Put, RiskLevel::Low, 1200.0),
            make_record("tue", "2025-06-10", OptionType::Call, RiskLevel::Low, 800.0),
            make_record("fut", "2025-06-12", OptionType::Call, RiskLevel::Low, 50.0),
        ];
        let profit = weekly_profit(&records, utc("2025-06-10T20:00:00Z"));
        assert!((profit - 2000.0).abs() < 1e-9);
    }
}
