//! Update ingress: the single path that mutates widget state.
//!
//! `mode` must be a non-empty string and `turbidity` a non-negative number.
//! The mode name is not checked against the known set: unknown names are
//! stored as-is and rendered with the fallback icon.

use crate::display::DisplaySink;
use crate::error::{IngressError, MalformedUpdate};
use crate::mode::ReportedMode;
use crate::state::{StateReader, StateWriter, WidgetState};
use serde_json::Value;

/// Parse and validate a webhook body into the next state pair.
pub fn parse_update(body: &[u8]) -> Result<WidgetState, MalformedUpdate> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| MalformedUpdate::NotJson(e.to_string()))?;
    let Value::Object(map) = value else {
        return Err(MalformedUpdate::NotAnObject);
    };

    let mode = match map.get("mode") {
        None | Some(Value::Null) => return Err(MalformedUpdate::MissingMode),
        Some(Value::String(s)) if s.is_empty() => return Err(MalformedUpdate::EmptyMode),
        Some(Value::String(s)) => ReportedMode::classify(s),
        Some(_) => return Err(MalformedUpdate::ModeNotString),
    };

    let turbidity = match map.get("turbidity") {
        None | Some(Value::Null) => return Err(MalformedUpdate::MissingTurbidity),
        Some(Value::Number(n)) => n.as_f64().ok_or(MalformedUpdate::TurbidityNotNumber)?,
        Some(_) => return Err(MalformedUpdate::TurbidityNotNumber),
    };
    if turbidity < 0.0 {
        return Err(MalformedUpdate::NegativeTurbidity);
    }

    Ok(WidgetState { mode, turbidity })
}

/// Owns the state writer. Updates only get in through `receive_update`,
/// so every stored pair has passed `parse_update`:
///
/// ```compile_fail
/// use infinistream_core::mocks::RecordingSink;
/// use infinistream_core::{Ingress, OperatingMode, WidgetState, new_state};
///
/// let (writer, _reader) = new_state();
/// let mut ingress = Ingress::new(writer, RecordingSink::default());
/// ingress.apply(WidgetState::new(OperatingMode::Shower, -5.0));
/// ```
pub struct Ingress<S: DisplaySink> {
    writer: StateWriter,
    sink: S,
}

impl<S: DisplaySink> Ingress<S> {
    pub fn new(writer: StateWriter, sink: S) -> Self {
        Self { writer, sink }
    }

    pub fn reader(&self) -> StateReader {
        self.writer.reader()
    }

    /// Handle one webhook body. On error nothing changes and nothing is sent.
    pub fn receive_update(&mut self, body: &[u8]) -> Result<WidgetState, IngressError> {
        match parse_update(body) {
            Ok(update) => {
                self.apply(update.clone());
                Ok(update)
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejected shower update");
                Err(e.into())
            }
        }
    }

    /// Replace the pair and notify the display.
    fn apply(&mut self, update: WidgetState) {
        if let ReportedMode::Unrecognized(raw) = &update.mode {
            tracing::warn!(mode = %raw, "unrecognized mode accepted; rendering fallback");
        }
        tracing::info!(mode = %update.mode, turbidity = update.turbidity, "shower update");
        self.writer.replace(update.clone());
        self.push(&update);
    }

    /// "Widget started": push the current pair once so the display does not
    /// wait for the first webhook.
    pub fn announce(&self) {
        let current = self.writer.snapshot();
        tracing::info!(mode = %current.mode, turbidity = current.turbidity, "announcing state");
        self.push(&current);
    }

    fn push(&self, update: &WidgetState) {
        // Fire-and-forget.
        if let Err(e) = self.sink.notify(update) {
            tracing::warn!(error = %e, "display notification dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::OperatingMode;

    #[test]
    fn accepts_integer_and_float_turbidity() {
        let a = parse_update(br#"{"mode":"FLUSH","turbidity":3}"#).unwrap();
        let b = parse_update(br#"{"mode":"FLUSH","turbidity":3.0}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.mode, ReportedMode::Known(OperatingMode::Flush));
    }

    #[test]
    fn extra_fields_are_ignored() {
        let u = parse_update(br#"{"mode":"DRAIN","turbidity":1,"ts":123}"#).unwrap();
        assert_eq!(u, WidgetState::new(OperatingMode::Drain, 1.0));
    }

    #[test]
    fn null_counts_as_missing() {
        assert_eq!(
            parse_update(br#"{"mode":"DRAIN","turbidity":null}"#),
            Err(MalformedUpdate::MissingTurbidity)
        );
        assert_eq!(
            parse_update(br#"{"mode":null,"turbidity":1}"#),
            Err(MalformedUpdate::MissingMode)
        );
    }
}
