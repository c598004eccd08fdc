use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

pub type SharedConfig = Arc<RwLock<Config>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelBounds {
    pub min_width: u32,
    pub max_width: u32,
    pub default_width: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Records
    pub records_page_size: usize,

    // Treasury
    pub withdrawal_ratio: f64,
    pub withdrawal_fee: f64,

    // Waiting period
    pub countdown_tick_secs: u64,
    pub waiting_period_minutes: u32,

    // Assistant
    pub chat_response_delay_ms: u64,

    // Context panel
    pub panel: PanelBounds,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let page_size: usize = env("RECORDS_PAGE_SIZE", "10").parse().unwrap_or(10);
        let min_width: u32 = env("PANEL_MIN_WIDTH", "280").parse().unwrap_or(280);
        let max_width: u32 = env("PANEL_MAX_WIDTH", "640")
            .parse::<u32>()
            .unwrap_or(640)
            .max(min_width);
        let default_width: u32 = env("PANEL_DEFAULT_WIDTH", "360")
            .parse::<u32>()
            .unwrap_or(360)
            .clamp(min_width, max_width);

        Config {
            records_page_size: if page_size == 0 { 10 } else { page_size },
            withdrawal_ratio: env("WITHDRAWAL_RATIO", "0.6").parse().unwrap_or(0.6), // 60% of weekly profit
            withdrawal_fee: env("WITHDRAWAL_FEE", "0.0").parse().unwrap_or(0.0),
            countdown_tick_secs: env("COUNTDOWN_TICK_SECS", "60").parse().unwrap_or(60),
            waiting_period_minutes: env("WAITING_PERIOD_MINUTES", "120")
                .parse()
                .unwrap_or(120),
            chat_response_delay_ms: env("CHAT_RESPONSE_DELAY_MS", "1500")
                .parse()
                .unwrap_or(1500),
            panel: PanelBounds {
                min_width,
                max_width,
                default_width,
            },
            log_level: env("LOG_LEVEL", "INFO"),
        }
    }

    /// One countdown tick. A zero setting falls back to one second so the
    /// timer never spins.
    pub fn countdown_tick(&self) -> Duration {
        Duration::from_secs(self.countdown_tick_secs.max(1))
    }

    pub fn chat_response_delay(&self) -> Duration {
        Duration::from_millis(self.chat_response_delay_ms)
    }

    pub fn shared(self) -> SharedConfig {
        Arc::new(RwLock::new(self))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            records_page_size: 10,
            withdrawal_ratio: 0.6,
            withdrawal_fee: 0.0,
            countdown_tick_secs: 60,
            waiting_period_minutes: 120,
            chat_response_delay_ms: 1500,
            panel: PanelBounds {
                min_width: 280,
                max_width: 640,
                default_width: 360,
            },
            log_level: "INFO".to_string(),
        }
    }
}
