//! Client configuration, read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use stockwatch_inventory::DEFAULT_THRESHOLD;
use stockwatch_observability::LogFormat;

pub const DEFAULT_RECIPIENT: &str = "17864516721";
pub const DEFAULT_SMS_TIMEOUT: Duration = Duration::from_secs(10);

/// Where inventory records are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub store: StoreLocation,
    pub alert_recipient: String,
    pub low_stock_threshold: u32,
    /// SMS webhook; alerts are only logged when unset.
    pub sms_webhook_url: Option<String>,
    /// Bearer token for the webhook. Never serialized or printed.
    #[serde(default, skip_serializing)]
    pub sms_webhook_token: Option<String>,
    pub sms_timeout: Duration,
    /// Answer the authorization prompt gives when asked.
    pub sms_authorized: bool,
    pub log_format: LogFormat,
}

impl ClientConfig {
    /// Build the configuration from `STOCKWATCH_*` environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let store = match get("STOCKWATCH_DB_PATH") {
            Some(path) if path.trim() == ":memory:" => StoreLocation::Memory,
            Some(path) => StoreLocation::File(PathBuf::from(path)),
            None => StoreLocation::File(default_db_path()?),
        };

        let low_stock_threshold = match get("STOCKWATCH_LOW_STOCK_THRESHOLD") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("invalid STOCKWATCH_LOW_STOCK_THRESHOLD: {raw:?}"))?,
            None => DEFAULT_THRESHOLD,
        };

        let sms_timeout = match get("STOCKWATCH_SMS_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("invalid STOCKWATCH_SMS_TIMEOUT_SECS: {raw:?}"))?,
            ),
            None => DEFAULT_SMS_TIMEOUT,
        };

        let sms_authorized = match get("STOCKWATCH_SMS_AUTHORIZED") {
            Some(raw) => parse_bool(&raw)
                .with_context(|| format!("invalid STOCKWATCH_SMS_AUTHORIZED: {raw:?}"))?,
            None => false,
        };

        let log_format = match get("STOCKWATCH_LOG_FORMAT") {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(anyhow::Error::msg)
                .context("invalid STOCKWATCH_LOG_FORMAT")?,
            None => LogFormat::default(),
        };

        Ok(Self {
            store,
            alert_recipient: get("STOCKWATCH_ALERT_RECIPIENT")
                .unwrap_or_else(|| DEFAULT_RECIPIENT.to_string()),
            low_stock_threshold,
            sms_webhook_url: get("STOCKWATCH_SMS_WEBHOOK_URL"),
            sms_webhook_token: get("STOCKWATCH_SMS_WEBHOOK_TOKEN"),
            sms_timeout,
            sms_authorized,
            log_format,
        })
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("store", &self.store)
            .field("alert_recipient", &self.alert_recipient)
            .field("low_stock_threshold", &self.low_stock_threshold)
            .field("sms_webhook_url", &self.sms_webhook_url)
            .field("sms_webhook_token", &self.sms_webhook_token.as_ref().map(|_| "***"))
            .field("sms_timeout", &self.sms_timeout)
            .field("sms_authorized", &self.sms_authorized)
            .field("log_format", &self.log_format)
            .finish()
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got {other:?}"),
    }
}

/// Resolve the default database path: `{app_data_dir}/stockwatch/inventory.db`.
fn default_db_path() -> anyhow::Result<PathBuf> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    dir.push("stockwatch");
    dir.push("inventory.db");
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ClientConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[("STOCKWATCH_DB_PATH", "/tmp/inv.db")]).unwrap();
        assert_eq!(cfg.store, StoreLocation::File(PathBuf::from("/tmp/inv.db")));
        assert_eq!(cfg.alert_recipient, DEFAULT_RECIPIENT);
        assert_eq!(cfg.low_stock_threshold, 3);
        assert_eq!(cfg.sms_webhook_url, None);
        assert_eq!(cfg.sms_timeout, DEFAULT_SMS_TIMEOUT);
        assert!(!cfg.sms_authorized);
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn overrides_are_read() {
        let cfg = config(&[
            ("STOCKWATCH_DB_PATH", ":memory:"),
            ("STOCKWATCH_ALERT_RECIPIENT", "+15550100"),
            ("STOCKWATCH_LOW_STOCK_THRESHOLD", "10"),
            ("STOCKWATCH_SMS_WEBHOOK_URL", "http://localhost:9000/sms"),
            ("STOCKWATCH_SMS_TIMEOUT_SECS", "2"),
            ("STOCKWATCH_SMS_AUTHORIZED", "yes"),
            ("STOCKWATCH_LOG_FORMAT", "compact"),
        ])
        .unwrap();

        assert_eq!(cfg.store, StoreLocation::Memory);
        assert_eq!(cfg.alert_recipient, "+15550100");
        assert_eq!(cfg.low_stock_threshold, 10);
        assert_eq!(cfg.sms_webhook_url.as_deref(), Some("http://localhost:9000/sms"));
        assert_eq!(cfg.sms_timeout, Duration::from_secs(2));
        assert!(cfg.sms_authorized);
        assert_eq!(cfg.log_format, LogFormat::Compact);
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(config(&[("STOCKWATCH_DB_PATH", ":memory:"), ("STOCKWATCH_LOW_STOCK_THRESHOLD", "-1")]).is_err());
        assert!(config(&[("STOCKWATCH_DB_PATH", ":memory:"), ("STOCKWATCH_SMS_AUTHORIZED", "maybe")]).is_err());
        assert!(config(&[("STOCKWATCH_DB_PATH", ":memory:"), ("STOCKWATCH_SMS_TIMEOUT_SECS", "soon")]).is_err());
    }

    #[test]
    fn config_serializes_for_diagnostics() {
        let cfg = config(&[("STOCKWATCH_DB_PATH", ":memory:")]).unwrap();
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["store"], "memory");
        assert_eq!(json["low_stock_threshold"], 3);
    }

    #[test]
    fn webhook_token_is_redacted_from_debug_and_json() {
        let cfg = config(&[
            ("STOCKWATCH_DB_PATH", ":memory:"),
            ("STOCKWATCH_SMS_WEBHOOK_TOKEN", "s3cr3t-token"),
        ])
        .unwrap();
        assert_eq!(cfg.sms_webhook_token.as_deref(), Some("s3cr3t-token"));

        let debug = format!("{cfg:?}");
        assert!(!debug.contains("s3cr3t-token"), "token printed: {debug}");
        assert!(debug.contains(r#"sms_webhook_token: Some("***")"#));

        let json = serde_json::to_string(&cfg).unwrap();
        assert!(!json.contains("s3cr3t-token"), "token serialized: {json}");
    }

    #[test]
    fn unset_token_debugs_as_none() {
        let cfg = config(&[("STOCKWATCH_DB_PATH", ":memory:")]).unwrap();
        assert!(format!("{cfg:?}").contains("sms_webhook_token: None"));
    }
}
