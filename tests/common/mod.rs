use chrono::{DateTime, NaiveDate, Utc};
use options_desk::models::{OptionType, RiskLevel, TradeRecord};
use options_desk::seed;

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .unwrap()
        .with_timezone(&Utc)
}

/// Seeded trades with the given pnl/type/risk overrides applied in order.
pub fn records_with(overrides: &[(&str, OptionType, RiskLevel, f64)]) -> Vec<TradeRecord> {
    let mut records = seed::trade_records(overrides.len(), day("2025-06-10"));
    for (r, &(date, option_type, risk, pnl)) in records.iter_mut().zip(overrides) {
        r.date = day(date);
        r.option_type = option_type;
        r.risk = risk;
        r.pnl = pnl;
    }
    records
}
