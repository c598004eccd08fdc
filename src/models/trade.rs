use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionType {
    Put,
    Call,
    Both,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Put => "PUT",
            OptionType::Call => "CALL",
            OptionType::Both => "BOTH",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<OptionType> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PUT" => Some(OptionType::Put),
            "CALL" => Some(OptionType::Call),
            "BOTH" => Some(OptionType::Both),
            _ => None,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Risk category. Variant order is the sort order: Low < Moderate < High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }

    pub fn ordinal(&self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Moderate => 2,
            RiskLevel::High => 3,
        }
    }

    pub fn from_str_loose(s: &str) -> Option<RiskLevel> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(RiskLevel::Low),
            "moderate" | "medium" => Some(RiskLevel::Moderate),
            "high" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeResult {
    Expired,
    Stopped,
    Exercised,
}

impl TradeResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeResult::Expired => "EXPIRED",
            TradeResult::Stopped => "STOPPED",
            TradeResult::Exercised => "EXERCISED",
        }
    }
}

impl fmt::Display for TradeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Greeks and execution metadata attached to a trade. Opaque to the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeDetails {
    pub time: String,
    pub wait_time: String,
    pub premium: f64,
    pub otm_pct: f64,
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub iv_rank: f64,
    pub stop_loss_ratio: f64,
    pub take_profit_ratio: f64,
    #[serde(default)]
    pub external_ref: String,
    #[serde(default)]
    pub optimal_exit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub option_type: OptionType,
    pub strike: String,
    pub risk: RiskLevel,
    pub volume: u32,
    pub result: TradeResult,
    pub pnl: f64,
    pub details: TradeDetails,
}

impl TradeRecord {
    /// Date as shown in the records table, e.g. `6/3/2025`.
    pub fn display_date(&self) -> String {
        self.date.format("%-m/%-d/%Y").to_string()
    }

    /// Case-insensitive substring match against the displayed date
    /// (`M/D/YYYY`), type, strike and risk. `needle` must already be
    /// lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let date_display = self.display_date();
        [
            date_display.as_str(),
            self.option_type.as_str(),
            self.strike.as_str(),
            self.risk.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}
