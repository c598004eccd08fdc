pub mod funds;
pub mod trade;

pub use funds::{AvailabilityBreakdown, PendingRelease, WithdrawalRecord, WithdrawalStatus};
pub use trade::{OptionType, RiskLevel, TradeDetails, TradeRecord, TradeResult};
