/// Runtime configuration for one pipeline run. Built once at startup and
/// passed into the driver; nothing reads the environment after this.
#[derive(Debug, Clone)]
pub struct PairConfig {
    /// The customer whose close drives the pair (e.g. NKE).
    pub primary_symbol: String,
    /// The supplier tracked against it (e.g. 9910.TW).
    pub secondary_symbol: String,
    /// Trailing price history to fetch, in calendar days.
    pub history_days: u32,
    /// Trailing rows used for the correlation.
    pub correlation_window: usize,
    /// Below this many aligned rows the correlation is insufficient data.
    pub min_points: usize,
    /// Fixed increment for earnings roll-forward, in days.
    pub quarter_days: i64,
    pub webhook_url: Option<String>,
}

impl Default for PairConfig {
    fn default() -> Self {
        Self {
            primary_symbol: "NKE".to_string(),
            secondary_symbol: "9910.TW".to_string(),
            history_days: 182,
            correlation_window: 30,
            min_points: 10,
            quarter_days: 91,
            webhook_url: None,
        }
    }
}

impl PairConfig {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        fn var(name: &str) -> Option<String> {
            std::env::var(name).ok().filter(|s| !s.is_empty())
        }

        Self {
            primary_symbol: var("PAIRWATCH_PRIMARY").unwrap_or(defaults.primary_symbol),
            secondary_symbol: var("PAIRWATCH_SECONDARY").unwrap_or(defaults.secondary_symbol),
            history_days: var("PAIRWATCH_HISTORY_DAYS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.history_days),
            correlation_window: var("PAIRWATCH_CORRELATION_WINDOW")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.correlation_window),
            min_points: var("PAIRWATCH_MIN_POINTS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.min_points),
            quarter_days: var("PAIRWATCH_QUARTER_DAYS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.quarter_days),
            webhook_url: var("DISCORD_WEBHOOK_URL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PairConfig::default();
        assert_eq!(config.primary_symbol, "NKE");
        assert_eq!(config.secondary_symbol, "9910.TW");
        assert_eq!(config.correlation_window, 30);
        assert_eq!(config.min_points, 10);
        assert_eq!(config.quarter_days, 91);
        assert!(config.webhook_url.is_none());
    }

    #[test]
    fn test_env_overrides_and_garbage_falls_back() {
        std::env::set_var("PAIRWATCH_PRIMARY", "AAPL");
        std::env::set_var("PAIRWATCH_CORRELATION_WINDOW", "45");
        std::env::set_var("PAIRWATCH_MIN_POINTS", "not-a-number");
        std::env::set_var("PAIRWATCH_SECONDARY", "");

        let config = PairConfig::from_env();

        std::env::remove_var("PAIRWATCH_PRIMARY");
        std::env::remove_var("PAIRWATCH_CORRELATION_WINDOW");
        std::env::remove_var("PAIRWATCH_MIN_POINTS");
        std::env::remove_var("PAIRWATCH_SECONDARY");

        assert_eq!(config.primary_symbol, "AAPL");
        assert_eq!(config.correlation_window, 45);
        // unparseable and empty values fall back to defaults
        assert_eq!(config.min_points, 10);
        assert_eq!(config.secondary_symbol, "9910.TW");
    }
}
