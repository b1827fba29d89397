//! `infinistream send`: act as the external controller for manual testing.

use crate::error_fmt::CliError;
use crate::serve::UPDATE_PATH;
use infinistream_core::OperatingMode;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct UpdateBody {
    mode: &'static str,
    turbidity: f64,
}

pub fn update_url(host: &str, port: u16) -> String {
    format!("http://{host}:{port}{UPDATE_PATH}")
}

pub fn send_update(host: &str, port: u16, mode: OperatingMode, turbidity: f64) -> eyre::Result<()> {
    if !(turbidity.is_finite() && turbidity >= 0.0) {
        return Err(CliError::NegativeTurbidity(turbidity).into());
    }
    let url = update_url(host, port);
    let body = UpdateBody {
        mode: mode.as_str(),
        turbidity,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;
    let res = client
        .post(&url)
        .json(&body)
        .send()
        .map_err(|e| CliError::Unreachable {
            url: url.clone(),
            reason: e.to_string(),
        })?;

    let status = res.status();
    if !status.is_success() {
        return Err(CliError::Rejected(status.as_u16()).into());
    }
    tracing::info!(%url, mode = mode.as_str(), turbidity, "update sent");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_targets_update_path() {
        assert_eq!(
            update_url("mirror.local", 8085),
            "http://mirror.local:8085/shower-update"
        );
    }

    #[test]
    fn body_uses_upper_case_mode() {
        let body = UpdateBody {
            mode: OperatingMode::Sanitize.as_str(),
            turbidity: 4.0,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v, serde_json::json!({"mode": "SANITIZE", "turbidity": 4.0}));
    }

    #[test]
    fn negative_turbidity_is_refused_before_sending() {
        let err = send_update("127.0.0.1", 1, OperatingMode::Drain, -3.0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::NegativeTurbidity(_))
        ));
    }
}
