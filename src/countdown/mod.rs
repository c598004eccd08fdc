pub mod timer;
pub mod waiting;

pub use timer::CountdownTimer;
pub use waiting::{CountdownPhase, WaitingPeriod, WaitingPeriodError};
