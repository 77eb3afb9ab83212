//! # Shop Configuration
//!
//! Pricing and storage settings, loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MUSEUM_TAX_RATE=10.2        MUSEUM_MEMBER_RATE=15                  │
//! │     MUSEUM_SHIPPING=25.00       MUSEUM_CONFLICT_POLICY=ask             │
//! │     MUSEUM_DB_PATH=/tmp/museum.db   MUSEUM_SESSION_MINUTES=60          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or shop.toml in the platform config dir           │
//! │     ~/.config/museum-shop/shop.toml (Linux)                            │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     10.20% tax, 15% members, $25.00 shipping, 0/5/10/15% tiers         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [pricing]
//! tax_rate_bps = 1020
//! member_rate_bps = 1500
//! shipping_cents = 2500
//! conflict_policy = "ask"   # ask | prefer_larger | prefer_member
//!
//! [[pricing.volume_tiers]]
//! min_cents = 0
//! rate_bps = 0
//!
//! [[pricing.volume_tiers]]
//! min_cents = 5000
//! rate_bps = 500
//!
//! [storage]
//! database_path = "/var/lib/museum/museum.db"
//! session_minutes = 60      # idle time before the discount choice is forgotten
//! ```
//!
//! Environment rates are percentages and the shipping fee is in dollars,
//! both parsed exactly. The file uses basis points and cents.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use museum_core::money::Money;
use museum_core::pricing::{
    ConflictPolicy, DiscountPolicy, OrderCalculator, VolumeSchedule, VolumeTier,
};
use museum_core::types::Rate;
use museum_core::{MEMBER_RATE_BPS, SHIPPING_FLAT_CENTS, TAX_RATE_BPS};
use museum_core::ValidationError;
use museum_db::DbConfig;

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override could not be parsed.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    /// The pricing table breaks a business rule.
    #[error("Invalid pricing configuration: {0}")]
    Pricing(#[from] ValidationError),

    #[error("Could not determine the application data directory")]
    NoDataDir,
}

// =============================================================================
// Settings
// =============================================================================

/// One row of the configured volume table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSetting {
    pub min_cents: i64,
    pub rate_bps: u32,
}

/// Pricing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Sales tax in basis points (1020 = 10.20%).
    #[serde(default = "default_tax_rate")]
    pub tax_rate_bps: u32,

    #[serde(default = "default_member_rate")]
    pub member_rate_bps: u32,

    /// Flat shipping per non-empty order, in cents.
    #[serde(default = "default_shipping")]
    pub shipping_cents: i64,

    /// What to do when member and volume discounts both apply.
    #[serde(default)]
    pub conflict_policy: ConflictPolicy,

    /// Ascending volume table. Leave empty to disable volume discounts.
    #[serde(default = "default_volume_tiers")]
    pub volume_tiers: Vec<TierSetting>,
}

fn default_tax_rate() -> u32 {
    TAX_RATE_BPS
}

fn default_member_rate() -> u32 {
    MEMBER_RATE_BPS
}

fn default_shipping() -> i64 {
    SHIPPING_FLAT_CENTS
}

fn default_volume_tiers() -> Vec<TierSetting> {
    VolumeSchedule::museum_default()
        .tiers()
        .iter()
        .map(|tier| TierSetting {
            min_cents: tier.min.cents(),
            rate_bps: tier.rate.bps(),
        })
        .collect()
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            tax_rate_bps: default_tax_rate(),
            member_rate_bps: default_member_rate(),
            shipping_cents: default_shipping(),
            conflict_policy: ConflictPolicy::default(),
            volume_tiers: default_volume_tiers(),
        }
    }
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. Defaults to `museum.db` in the platform data dir.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Minutes without a session write before the session area is cleared.
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u64,
}

fn default_session_minutes() -> u64 {
    60
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: None,
            session_minutes: default_session_minutes(),
        }
    }
}

/// Complete shop configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl ShopConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (an explicit path must exist; the default one may not)
    /// 3. Environment variables
    ///
    /// The result is validated by building the calculator once.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(path = %path.display(), "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.calculator()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading shop config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `MUSEUM_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let invalid = |key: &str, value: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        if let Some(value) = lookup("MUSEUM_TAX_RATE") {
            let rate = Rate::parse_percentage(&value)
                .ok_or_else(|| invalid("MUSEUM_TAX_RATE", &value))?;
            debug!(bps = rate.bps(), "Overriding tax rate from environment");
            self.pricing.tax_rate_bps = rate.bps();
        }

        if let Some(value) = lookup("MUSEUM_MEMBER_RATE") {
            let rate = Rate::parse_percentage(&value)
                .ok_or_else(|| invalid("MUSEUM_MEMBER_RATE", &value))?;
            debug!(bps = rate.bps(), "Overriding member rate from environment");
            self.pricing.member_rate_bps = rate.bps();
        }

        if let Some(value) = lookup("MUSEUM_SHIPPING") {
            let fee = Money::parse_decimal(&value)
                .ok_or_else(|| invalid("MUSEUM_SHIPPING", &value))?;
            debug!(cents = fee.cents(), "Overriding shipping from environment");
            self.pricing.shipping_cents = fee.cents();
        }

        if let Some(value) = lookup("MUSEUM_CONFLICT_POLICY") {
            self.pricing.conflict_policy = match value.trim().to_lowercase().as_str() {
                "ask" => ConflictPolicy::Ask,
                "prefer_larger" | "larger" => ConflictPolicy::PreferLarger,
                "prefer_member" | "member" => ConflictPolicy::PreferMember,
                _ => return Err(invalid("MUSEUM_CONFLICT_POLICY", &value)),
            };
        }

        if let Some(value) = lookup("MUSEUM_DB_PATH") {
            debug!(path = %value, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(value));
        }

        if let Some(value) = lookup("MUSEUM_SESSION_MINUTES") {
            let minutes = value
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid("MUSEUM_SESSION_MINUTES", &value))?;
            debug!(minutes, "Overriding session idle time from environment");
            self.storage.session_minutes = minutes;
        }

        Ok(())
    }

    /// Builds the calculator, validating every pricing setting.
    pub fn calculator(&self) -> Result<OrderCalculator, ConfigError> {
        let pricing = &self.pricing;

        let tiers = pricing
            .volume_tiers
            .iter()
            .map(|t| VolumeTier::new(Money::from_cents(t.min_cents), Rate::from_bps(t.rate_bps)))
            .collect();

        let discounts = DiscountPolicy::new(
            Rate::from_bps(pricing.member_rate_bps),
            VolumeSchedule::new(tiers)?,
            pricing.conflict_policy,
        )?;

        Ok(OrderCalculator::new(
            Rate::from_bps(pricing.tax_rate_bps),
            Money::from_cents(pricing.shipping_cents),
            discounts,
        )?)
    }

    /// The SQLite file to open, creating its directory when defaulted.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or(ConfigError::NoDataDir)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join("museum.db"))
    }

    /// How to open the storage: the database file and the session idle time.
    pub fn db_config(&self) -> Result<DbConfig, ConfigError> {
        let idle = Duration::from_secs(self.storage.session_minutes.saturating_mul(60));
        Ok(DbConfig::new(self.database_path()?).session_idle(idle))
    }

    /// `shop.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("shop.toml"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "museum", "museum-shop")
}
