//! Human-readable error descriptions and structured JSON error formatting.

use std::net::SocketAddr;
use thiserror::Error;

/// Failures the CLI itself raises; each has a stable exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("cannot listen on {addr}: {reason}")]
    Bind { addr: SocketAddr, reason: String },
    #[error("widget unreachable at {url}: {reason}")]
    Unreachable { url: String, reason: String },
    #[error("widget rejected the update (HTTP {0})")]
    Rejected(u16),
    #[error("turbidity must be a number >= 0, got {0}")]
    NegativeTurbidity(f64),
}

impl CliError {
    pub fn reason_name(&self) -> &'static str {
        match self {
            CliError::Config(_) => "Config",
            CliError::Bind { .. } => "Bind",
            CliError::Unreachable { .. } => "Unreachable",
            CliError::Rejected(_) => "Rejected",
            CliError::NegativeTurbidity(_) => "NegativeTurbidity",
        }
    }
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    if let Some(ce) = err.downcast_ref::<CliError>() {
        return match ce {
            CliError::Config(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Out-of-range values in the TOML.\nHow to fix: Edit the config file (or run `infinistream check-config`), then rerun."
            ),
            CliError::Bind { addr, reason } => format!(
                "What happened: Could not listen on {addr} ({reason}).\nLikely causes: Another process (or another widget instance) already uses the port, or the address is not local.\nHow to fix: Stop the other listener or pick a different webhook.port / --port."
            ),
            CliError::Unreachable { url, .. } => format!(
                "What happened: No widget answered at {url}.\nLikely causes: The widget is not running, or host/port are wrong.\nHow to fix: Start `infinistream serve` and check --host / --port."
            ),
            CliError::Rejected(code) => format!(
                "What happened: The widget refused the update (HTTP {code}).\nLikely causes: The body was missing `mode` or `turbidity`.\nHow to fix: Send both fields; turbidity must be a number >= 0."
            ),
            CliError::NegativeTurbidity(v) => format!(
                "What happened: Turbidity {v} is not a valid reading.\nHow to fix: Pass a number >= 0 to --turbidity."
            ),
        };
    }

    // Generic fallback
    let msg = err.to_string();
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes; anything untyped returns 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match err.downcast_ref::<CliError>() {
        Some(CliError::Config(_)) => 2,
        Some(CliError::Bind { .. }) => 3,
        Some(CliError::Unreachable { .. }) => 4,
        Some(CliError::Rejected(_)) => 5,
        Some(CliError::NegativeTurbidity(_)) => 6,
        None => 1,
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let reason = err
        .downcast_ref::<CliError>()
        .map_or("Error", CliError::reason_name);
    json!({ "reason": reason, "message": humanize(err) }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_errors_get_distinct_codes() {
        let codes: Vec<i32> = [
            CliError::Config("x".into()),
            CliError::Bind {
                addr: "127.0.0.1:8085".parse().unwrap(),
                reason: "in use".into(),
            },
            CliError::Unreachable {
                url: "http://x".into(),
                reason: "refused".into(),
            },
            CliError::Rejected(400),
            CliError::NegativeTurbidity(-1.0),
        ]
        .into_iter()
        .map(|e| exit_code_for_error(&eyre::Report::new(e)))
        .collect();
        assert_eq!(codes, vec![2, 3, 4, 5, 6]);
        assert_eq!(exit_code_for_error(&eyre::eyre!("boom")), 1);
    }

    #[test]
    fn json_error_names_the_reason() {
        let err = eyre::Report::new(CliError::Rejected(400));
        let v: serde_json::Value = serde_json::from_str(&format_error_json(&err)).unwrap();
        assert_eq!(v["reason"], "Rejected");
        assert!(v["message"].as_str().unwrap().contains("HTTP 400"));
    }
}
