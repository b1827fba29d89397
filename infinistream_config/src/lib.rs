#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the Infinistream widget.
//!
//! - `Config` and its sections are deserialized from TOML and validated.
//! - Every section has defaults, so an empty file (or no file at all) yields
//!   the stock widget: levels `[0, 50, 100]`, port 8085, slow spinner on.
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::Path;

/// Default turbidity cut points in NTU.
pub const DEFAULT_TURBIDITY_LEVELS: [f64; 3] = [0.0, 50.0, 100.0];
/// Default webhook listener port.
pub const DEFAULT_WEBHOOK_PORT: u16 = 8085;

/// Which glyph family represents the turbidity tiers.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TurbidityIcons {
    /// water → cloud → smog
    #[default]
    Weather,
    /// thumbs-up → warning → skull
    Verdict,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayCfg {
    /// Ascending cut points `[t0, t1, t2]`; only `t1` and `t2` split tiers.
    pub turbidity_levels: Vec<f64>,
    /// Slow down the CONNECTING spinner (e-ink panels smear fast animation).
    pub slow_spinner: bool,
    pub turbidity_icons: TurbidityIcons,
}

impl Default for DisplayCfg {
    fn default() -> Self {
        Self {
            turbidity_levels: DEFAULT_TURBIDITY_LEVELS.to_vec(),
            slow_spinner: true,
            turbidity_icons: TurbidityIcons::Weather,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WebhookCfg {
    pub port: u16,
    /// Listen address. Also accepts alias "host".
    #[serde(alias = "host")]
    pub bind: String,
}

impl Default for WebhookCfg {
    fn default() -> Self {
        Self {
            port: DEFAULT_WEBHOOK_PORT,
            bind: "0.0.0.0".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub display: DisplayCfg,
    pub webhook: WebhookCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read and parse a config file. A missing file is not an error: the host
/// may run the widget with no configuration at all.
pub fn load_file(path: &Path) -> eyre::Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {}: {}", path.display(), e))?;
    load_toml(&text).map_err(|e| eyre::eyre!("parse config {}: {}", path.display(), e))
}

impl DisplayCfg {
    /// Levels as a fixed triple. Only meaningful after `Config::validate`.
    pub fn levels(&self) -> [f64; 3] {
        match self.turbidity_levels.as_slice() {
            [a, b, c] => [*a, *b, *c],
            _ => DEFAULT_TURBIDITY_LEVELS,
        }
    }
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Display
        let levels = &self.display.turbidity_levels;
        if levels.len() != 3 {
            eyre::bail!(
                "display.turbidity_levels must have exactly 3 entries, got {}",
                levels.len()
            );
        }
        if levels.iter().any(|v| !v.is_finite()) {
            eyre::bail!("display.turbidity_levels must be finite numbers");
        }
        if levels.iter().any(|v| *v < 0.0) {
            eyre::bail!("display.turbidity_levels must be >= 0");
        }
        if levels.windows(2).any(|w| w[1] < w[0]) {
            eyre::bail!("display.turbidity_levels must be in ascending order");
        }

        // Webhook
        if self.webhook.port == 0 {
            eyre::bail!("webhook.port must be >= 1");
        }
        if self.webhook.bind.parse::<IpAddr>().is_err() {
            eyre::bail!(
                "webhook.bind must be an IP address, got {:?}",
                self.webhook.bind
            );
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly, got {rot:?}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = load_toml("").expect("parse empty");
        assert_eq!(cfg.display.levels(), DEFAULT_TURBIDITY_LEVELS);
        assert!(cfg.display.slow_spinner);
        assert_eq!(cfg.display.turbidity_icons, TurbidityIcons::Weather);
        assert_eq!(cfg.webhook.port, 8085);
        cfg.validate().expect("defaults validate");
    }

    #[test]
    fn icon_family_serializes_as_lowercase_name() {
        let v = toml::Value::try_from(TurbidityIcons::Verdict).expect("serialize");
        assert_eq!(v.as_str(), Some("verdict"));
        let v = toml::Value::try_from(TurbidityIcons::Weather).expect("serialize");
        assert_eq!(v.as_str(), Some("weather"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = load_file(Path::new("/definitely/not/here.toml")).expect("defaults");
        assert_eq!(cfg.webhook.port, DEFAULT_WEBHOOK_PORT);
    }
}
