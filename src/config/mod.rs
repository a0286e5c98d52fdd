use crate::core::{AppError, Result};
use std::env;
use std::str::FromStr;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Source of configuration values, keyed by environment variable name
pub type Lookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

/// Main configuration of the installment service
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub stripe: StripeConfig,
    pub webhook: WebhookConfig,
    pub installments: InstallmentSettings,
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
}

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Absent secret: the installment service rejects every webhook, the
    /// standalone receiver trusts payloads as-is.
    pub secret: Option<String>,
    pub tolerance_secs: u64,
}

#[derive(Debug, Clone)]
pub struct InstallmentSettings {
    pub currency: String,
    pub second_days_until_due: u32,
    pub deferred_send: DeferredSendConfig,
}

#[derive(Debug, Clone)]
pub struct DeferredSendConfig {
    pub enabled: bool,
    pub send_after_days: u32,
    pub interval_secs: u64,
}

/// Configuration of the standalone webhook receiver
#[derive(Debug, Clone)]
pub struct ReceiverConfig {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub webhook: WebhookConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();
        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    pub fn from_lookup(lookup: &Lookup<'_>) -> Result<Self> {
        Ok(Config {
            app: AppConfig::from_lookup(lookup),
            server: ServerConfig::from_lookup(lookup)?,
            stripe: StripeConfig {
                secret_key: lookup("STRIPE_SECRET_KEY").ok_or_else(|| {
                    AppError::Configuration("STRIPE_SECRET_KEY not set".to_string())
                })?,
                api_base: lookup("STRIPE_API_BASE")
                    .unwrap_or_else(|| "https://api.stripe.com".to_string()),
            },
            webhook: WebhookConfig::from_lookup(lookup)?,
            installments: InstallmentSettings {
                currency: lookup("INSTALLMENT_CURRENCY").unwrap_or_else(|| "usd".to_string()),
                second_days_until_due: parse_or(lookup, "SECOND_INSTALLMENT_DAYS_UNTIL_DUE", 45)?,
                deferred_send: DeferredSendConfig {
                    enabled: parse_or(lookup, "DEFERRED_SEND_ENABLED", true)?,
                    send_after_days: parse_or(lookup, "DEFERRED_SEND_AFTER_DAYS", 45)?,
                    interval_secs: parse_or(lookup, "DEFERRED_SEND_INTERVAL_SECS", 3600)?,
                },
            },
            database: DatabaseConfig::from_lookup(lookup)?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.stripe.secret_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "STRIPE_SECRET_KEY must not be empty".to_string(),
            ));
        }

        if self.installments.currency.len() != 3 {
            return Err(AppError::Configuration(
                "INSTALLMENT_CURRENCY must be a three-letter ISO code".to_string(),
            ));
        }

        if self.installments.deferred_send.enabled
            && self.installments.deferred_send.interval_secs == 0
        {
            return Err(AppError::Configuration(
                "DEFERRED_SEND_INTERVAL_SECS must be greater than 0".to_string(),
            ));
        }

        self.webhook.validate()
    }
}

impl ReceiverConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    pub fn from_lookup(lookup: &Lookup<'_>) -> Result<Self> {
        Ok(ReceiverConfig {
            app: AppConfig::from_lookup(lookup),
            server: ServerConfig::from_lookup(lookup)?,
            webhook: WebhookConfig::from_lookup(lookup)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.webhook.validate()
    }
}

impl AppConfig {
    fn from_lookup(lookup: &Lookup<'_>) -> Self {
        AppConfig {
            env: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
        }
    }
}

impl WebhookConfig {
    fn from_lookup(lookup: &Lookup<'_>) -> Result<Self> {
        Ok(WebhookConfig {
            secret: lookup("STRIPE_WEBHOOK_SECRET").filter(|s| !s.is_empty()),
            tolerance_secs: parse_or(lookup, "WEBHOOK_TOLERANCE_SECS", 300)?,
        })
    }

    fn validate(&self) -> Result<()> {
        if self.tolerance_secs == 0 {
            return Err(AppError::Configuration(
                "WEBHOOK_TOLERANCE_SECS must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse `key` with `FromStr`, falling back to `default` when unset
pub(crate) fn parse_or<T: FromStr>(lookup: &Lookup<'_>, key: &str, default: T) -> Result<T> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", key))),
        None => Ok(default),
    }
}
