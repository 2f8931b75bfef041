use std::env;
use std::path::PathBuf;

use advisory_engine::{ExpertWeights, DEFAULT_TOP_PICKS};
use anyhow::{bail, Context, Result};
use notification_service::NotificationConfig;

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// JSON snapshot written by the data collector
    pub snapshot_path: PathBuf,
    pub weights: ExpertWeights,
    pub top_picks: usize,
    pub update_interval_secs: u64,  // 3600 (hourly)
    pub notifications: NotificationConfig,
}

impl MonitorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let weights = match get("EXPERT_WEIGHTS").filter(|s| !s.trim().is_empty()) {
            Some(raw) => raw
                .parse::<ExpertWeights>()
                .context("EXPERT_WEIGHTS must be five comma-separated weights summing to 1")?,
            None => ExpertWeights::default(),
        };

        let config = Self {
            snapshot_path: get("SNAPSHOT_PATH")
                .unwrap_or_else(|| "output/readings.json".to_string())
                .into(),
            weights,
            top_picks: get("TOP_PICKS")
                .unwrap_or_else(|| DEFAULT_TOP_PICKS.to_string())
                .parse()
                .context("TOP_PICKS must be a non-negative integer")?,
            update_interval_secs: get("UPDATE_INTERVAL_SECS")
                .unwrap_or_else(|| "3600".to_string())
                .parse()
                .context("UPDATE_INTERVAL_SECS must be a whole number of seconds")?,
            notifications: NotificationConfig::from_lookup(&get),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.update_interval_secs == 0 {
            bail!("UPDATE_INTERVAL_SECS must be greater than 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisory_core::ExpertKind;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<MonitorConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MonitorConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.snapshot_path, PathBuf::from("output/readings.json"));
        assert_eq!(config.weights, ExpertWeights::uniform());
        assert_eq!(config.top_picks, 5);
        assert_eq!(config.update_interval_secs, 3600);
        assert!(!config.notifications.telegram_configured());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SNAPSHOT_PATH", "/tmp/r.json"),
            ("EXPERT_WEIGHTS", "0.4,0.15,0.15,0.15,0.15"),
            ("TOP_PICKS", "3"),
            ("UPDATE_INTERVAL_SECS", "60"),
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "42"),
        ])
        .unwrap();
        assert_eq!(config.snapshot_path, PathBuf::from("/tmp/r.json"));
        assert_eq!(config.weights[ExpertKind::Trend], 0.4);
        assert_eq!(config.top_picks, 3);
        assert_eq!(config.update_interval_secs, 60);
        assert!(config.notifications.telegram_configured());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(load(&[("EXPERT_WEIGHTS", "1,1,1,1,1")]).is_err());
        assert!(load(&[("TOP_PICKS", "-1")]).is_err());
        assert!(load(&[("UPDATE_INTERVAL_SECS", "0")]).is_err());
        assert!(load(&[("UPDATE_INTERVAL_SECS", "hourly")]).is_err());
    }
}
