use std::time::Duration;

use serde::{Deserialize, Serialize};

/// In-process configuration defaults. There is no config file and no
/// environment surface beyond `RUST_LOG`; these values exist so that the
/// policy numbers live in one place instead of being scattered through
/// the view code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Plan steps that must be complete before the pitch deck unlocks.
    pub pitch_unlock_threshold: usize,
    /// Operating days used to spread monthly break-even covers.
    pub operating_days_per_month: u32,
    /// Simulated assistant draft latency, in milliseconds.
    pub draft_delay_ms: u64,
    /// Average bowl price feeding the break-even formula.
    pub avg_bowl_price: f64,
    /// Gross margin fraction feeding the break-even formula.
    pub gross_margin: f64,
}

impl AppConfig {
    pub fn draft_delay(&self) -> Duration {
        Duration::from_millis(self.draft_delay_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pitch_unlock_threshold: 3,
            operating_days_per_month: 26,
            draft_delay_ms: 1200,
            avg_bowl_price: 16.0,
            gross_margin: 0.66,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_policy() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.pitch_unlock_threshold, 3);
        assert_eq!(cfg.operating_days_per_month, 26);
        assert_eq!(cfg.draft_delay(), Duration::from_millis(1200));
    }
}
