use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Source of assistant replies. The demo uses [`SimulatedResponder`]; a
/// backend client or a test double can be swapped in without touching the
/// chat session.
#[async_trait]
pub trait ResponseProvider: Send + Sync {
    async fn respond(&self, prompt: &str) -> Result<String>;
}

/// Canned replies after a fixed delay.
pub struct SimulatedResponder {
    delay: Duration,
}

impl SimulatedResponder {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    fn reply_for(prompt: &str) -> &'static str {
        let p = prompt.to_lowercase();
        if p.contains("withdraw") {
            "Based on this week's performance I'd suggest withdrawing 60% of realised profit. \
             Open the Withdrawals panel to review the recommendation."
        } else if p.contains("record") || p.contains("history") {
            "Your trade records are in the Records dashboard. You can search by date, type, \
             strike or risk and sort by date, P&L or risk."
        } else if p.contains("wait") || p.contains("cool") {
            "A waiting period is in effect after each trade cycle. The countdown shows how long \
             until the next entry is allowed."
        } else if p.contains("put") || p.contains("call") {
            "I'm scanning for out-of-the-money strikes with favourable IV rank. I'll surface a \
             setup once delta and premium line up with your risk settings."
        } else {
            "I'm analysing current market conditions. Ask me about your records, treasury or \
             withdrawals."
        }
    }
}

#[async_trait]
impl ResponseProvider for SimulatedResponder {
    async fn respond(&self, prompt: &str) -> Result<String> {
        tokio::time::sleep(self.delay).await;
        Ok(Self::reply_for(prompt).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn waits_for_configured_delay() {
        let r = SimulatedResponder::new(Duration::from_millis(1500));
        let start = tokio::time::Instant::now();
        let reply = r.respond("Should I withdraw?").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1500));
        assert!(reply.contains("60%"));
    }

    #[test]
    fn fallback_reply() {
        let reply = SimulatedResponder::reply_for("hello");
        assert!(reply.contains("market conditions"));
    }
}
