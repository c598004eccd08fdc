use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::countdown::waiting::{CountdownPhase, WaitingPeriod};

/// Background countdown for a [`WaitingPeriod`].
///
/// The ticking task is owned by this value: dropping it (or calling
/// [`CountdownTimer::cancel`]) aborts the task, so a torn-down view never
/// receives another tick.
pub struct CountdownTimer {
    handle: Option<JoinHandle<()>>,
    state: watch::Receiver<WaitingPeriod>,
}

impl CountdownTimer {
    /// Spawn the ticking task. Must be called inside a tokio runtime.
    pub fn start(period: WaitingPeriod, tick: Duration) -> Self {
        let (tx, rx) = watch::channel(period);
        let handle = tokio::spawn(run_countdown(tx, tick));
        Self {
            handle: Some(handle),
            state: rx,
        }
    }

    pub fn snapshot(&self) -> WaitingPeriod {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<WaitingPeriod> {
        self.state.clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait until the period completes. Returns the final snapshot, or the
    /// last seen snapshot if the timer was cancelled first.
    pub async fn wait_complete(&self) -> WaitingPeriod {
        let mut rx = self.state.clone();
        let finished = rx
            .wait_for(|p| p.phase() != CountdownPhase::Counting)
            .await
            .map(|p| p.clone());
        match finished {
            Ok(p) => p,
            Err(_) => rx.borrow().clone(),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                debug!("Countdown cancelled");
            }
            handle.abort();
        }
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_countdown(tx: watch::Sender<WaitingPeriod>, tick: Duration) {
    if tx.borrow().phase() != CountdownPhase::Counting {
        return;
    }

    let mut ticker = interval_at(Instant::now() + tick, tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let mut phase = CountdownPhase::Counting;
        tx.send_modify(|p| {
            phase = p.tick();
        });

        let snapshot = tx.borrow().clone();
        debug!(
            "Countdown tick: {} of {} min left ({:.1}%)",
            snapshot.remaining_time(), snapshot.total_time(), snapshot.progress()
        );

        if phase != CountdownPhase::Counting {
            info!("Waiting period complete: {}", snapshot.reason());
            break;
        }
    }
}
