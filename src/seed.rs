use chrono::{Duration, NaiveDate};

use crate::models::{
    AvailabilityBreakdown, OptionType, PendingRelease, RiskLevel, TradeDetails, TradeRecord,
    TradeResult, WithdrawalRecord, WithdrawalStatus,
};

const TYPES: [OptionType; 3] = [OptionType::Put, OptionType::Call, OptionType::Both];
const RISKS: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High];
const PNLS: [f64; 8] = [55.0, 78.0, -120.0, 142.5, 36.0, -64.0, 210.0, 12.75];

/// `count` trades, one per calendar day ending on `last_date`, oldest first.
pub fn trade_records(count: usize, last_date: NaiveDate) -> Vec<TradeRecord> {
    (0..count)
        .map(|i| {
            let date = last_date - Duration::days((count - 1 - i) as i64);
            let option_type = TYPES[i % TYPES.len()];
            let risk = RISKS[(i / 2) % RISKS.len()];
            let pnl = PNLS[i % PNLS.len()];
            let result = if pnl < 0.0 {
                TradeResult::Stopped
            } else if i % 5 == 4 {
                TradeResult::Exercised
            } else {
                TradeResult::Expired
            };
            let strike_price = 440 + (i % 7) as u32 * 5;
            let marker = match option_type {
                OptionType::Put => "P",
                OptionType::Call => "C",
                OptionType::Both => "P/C",
            };

            TradeRecord {
                id: format!("TR-{:04}", i + 1),
                date,
                option_type,
                strike: format!("${}{}", strike_price, marker),
                risk,
                volume: 1 + (i % 10) as u32,
                result,
                pnl,
                details: TradeDetails {
                    time: format!("{:02}:{:02}", 9 + i % 6, (i * 7) % 60),
                    wait_time: format!("{}m", 15 + (i % 4) * 15),
                    premium: 0.45 + (i % 5) as f64 * 0.1,
                    otm_pct: 1.5 + (i % 6) as f64 * 0.5,
                    delta: -0.12 - (i % 4) as f64 * 0.03,
                    gamma: 0.02,
                    theta: -0.05,
                    vega: 0.11,
                    iv_rank: 35.0 + (i % 9) as f64 * 5.0,
                    stop_loss_ratio: 2.0,
                    take_profit_ratio: 0.5,
                    external_ref: format!("EXT-{:06}", 100_000 + i * 37),
                    optimal_exit: pnl > 0.0 && i % 3 == 0,
                },
            }
        })
        .collect()
}

/// Newest first.
pub fn withdrawals(today: NaiveDate) -> Vec<WithdrawalRecord> {
    vec![
        WithdrawalRecord {
            id: "WD-0002".to_string(),
            date: today - Duration::days(2),
            amount: 800.0,
            status: WithdrawalStatus::Pending,
            destination: "Chase Checking ****4521".to_string(),
            transaction_id: "TX-88412".to_string(),
            fee: 0.0,
        },
        WithdrawalRecord {
            id: "WD-0001".to_string(),
            date: today - Duration::days(9),
            amount: 1500.0,
            status: WithdrawalStatus::Completed,
            destination: "Chase Checking ****4521".to_string(),
            transaction_id: "TX-87190".to_string(),
            fee: 2.5,
        },
    ]
}

pub fn breakdown(today: NaiveDate) -> AvailabilityBreakdown {
    AvailabilityBreakdown {
        total: 50_000.0,
        available: 30_000.0,
        locked: 12_000.0,
        pending_release: vec![
            PendingRelease {
                amount: 5_000.0,
                release_date: today + Duration::days(2),
                reason: "Option settlement (T+1)".to_string(),
            },
            PendingRelease {
                amount: 3_000.0,
                release_date: today + Duration::days(5),
                reason: "Margin release after expiry".to_string(),
            },
        ],
    }
}
