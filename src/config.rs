//! Configuration for the bidding simulation
use crate::auction::{Amount, Item};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{path::Path, time::Duration};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub items: Vec<ItemConfig>,
    pub bidders: Vec<String>,
    /// How much a simulated bidder offers above the current winner
    pub bid_step: Amount,
    pub round_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemConfig {
    pub name: String,
    pub baseline: Amount,
    pub reserve: Amount,
}

impl From<&ItemConfig> for Item {
    fn from(c: &ItemConfig) -> Self {
        Item::new(c.name.clone(), c.baseline, c.reserve)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl LoggingConfig {
    /// Install the global tracing subscriber; `RUST_LOG` wins over `level`
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        fmt().with_env_filter(filter).init();
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let item = |name: &str, baseline, reserve| ItemConfig {
            name: name.into(),
            baseline,
            reserve,
        };
        Self {
            logging: LoggingConfig::default(),
            items: vec![
                item("Item 1", 100, 200),
                item("Item 2", 50, 75),
                item("Item 3", 10, 15),
                item("Item 4", 1000, 1500),
                item("Item 5", 300, 400),
            ],
            bidders: vec!["User 1".into(), "User 2".into(), "User 3".into()],
            bid_step: 5,
            round_delay_ms: 200,
        }
    }
}

impl Config {
    /// Load from the TOML file at `path`, or the defaults if there is none
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn round_delay(&self) -> Duration {
        Duration::from_millis(self.round_delay_ms)
    }

    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.items.iter().map(Item::from)
    }
}
