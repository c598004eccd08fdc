pub mod breakdown;
pub mod desk;
pub mod recommendation;
pub mod withdrawal;

pub use breakdown::ReleaseShare;
pub use desk::WithdrawalDesk;
pub use recommendation::{recommend_withdrawal, WithdrawalRecommendation};
pub use withdrawal::{ValidWithdrawal, WithdrawalError, WithdrawalRequest};
