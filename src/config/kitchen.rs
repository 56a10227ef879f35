//! Kitchen scheduler configuration.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::AppResult;

/// Environment variable for [`KitchenConfig::tick_interval_ms`].
pub const ENV_TICK_INTERVAL_MS: &str = "KITCHEN_TICK_INTERVAL_MS";
/// Environment variable for [`KitchenConfig::redispatch_delay_ms`].
pub const ENV_REDISPATCH_DELAY_MS: &str = "KITCHEN_REDISPATCH_DELAY_MS";
/// Environment variable for [`KitchenConfig::backstop_interval_ms`]; `0` disables it.
pub const ENV_BACKSTOP_INTERVAL_MS: &str = "KITCHEN_BACKSTOP_INTERVAL_MS";
/// Environment variable for [`KitchenConfig::initial_chefs`], comma separated.
pub const ENV_CHEFS: &str = "KITCHEN_CHEFS";

/// Kitchen configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KitchenConfig {
    /// How often each preparation timer refreshes progress, in milliseconds.
    pub tick_interval_ms: u64,
    /// Pause between freeing a chef and the follow-up dispatch, in milliseconds.
    pub redispatch_delay_ms: u64,
    /// Period of the backstop dispatch loop; `None` disables it.
    pub backstop_interval_ms: Option<u64>,
    /// Chefs on the roster when the kitchen opens.
    pub initial_chefs: Vec<String>,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            redispatch_delay_ms: 100,
            backstop_interval_ms: Some(1_000),
            initial_chefs: vec!["Chef Alex".into(), "Chef Bailey".into()],
        }
    }
}

impl KitchenConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be greater than 0".into());
        }
        if self.redispatch_delay_ms == 0 {
            return Err("redispatch_delay_ms must be greater than 0".into());
        }
        if self.backstop_interval_ms == Some(0) {
            return Err("backstop_interval_ms must be greater than 0 when set".into());
        }
        if let Some(pos) = self.initial_chefs.iter().position(|n| n.trim().is_empty()) {
            return Err(format!("initial chef #{pos} has an empty name"));
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults overlaid with `KITCHEN_*` variables from the process
    /// environment and an optional `.env` file.
    pub fn from_env() -> AppResult<Self> {
        // A missing .env file is fine; the process environment still applies.
        let _ = dotenvy::dotenv();
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup` (an environment-like key/value source)
    /// and validate the result.
    pub fn with_overrides<F>(mut self, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_TICK_INTERVAL_MS) {
            self.tick_interval_ms = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{ENV_TICK_INTERVAL_MS}={raw}"))?;
        }
        if let Some(raw) = lookup(ENV_REDISPATCH_DELAY_MS) {
            self.redispatch_delay_ms = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{ENV_REDISPATCH_DELAY_MS}={raw}"))?;
        }
        if let Some(raw) = lookup(ENV_BACKSTOP_INTERVAL_MS) {
            let ms: u64 = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{ENV_BACKSTOP_INTERVAL_MS}={raw}"))?;
            self.backstop_interval_ms = (ms > 0).then_some(ms);
        }
        if let Some(raw) = lookup(ENV_CHEFS) {
            self.initial_chefs = raw
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect();
        }
        self.validate().map_err(anyhow::Error::msg)?;
        Ok(self)
    }
}
