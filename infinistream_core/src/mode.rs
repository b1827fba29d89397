//! Operating modes of the appliance and the lenient wire form the webhook stores.

use serde::Serialize;
use serde::ser::Serializer;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the five mutually exclusive appliance states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum OperatingMode {
    /// Nothing heard from the controller yet.
    #[default]
    Connecting,
    Shower,
    Flush,
    Drain,
    Sanitize,
}

impl OperatingMode {
    pub const ALL: [OperatingMode; 5] = [
        OperatingMode::Connecting,
        OperatingMode::Shower,
        OperatingMode::Flush,
        OperatingMode::Drain,
        OperatingMode::Sanitize,
    ];

    /// Upper-case name used on the wire and in the readout.
    pub const fn as_str(self) -> &'static str {
        match self {
            OperatingMode::Connecting => "CONNECTING",
            OperatingMode::Shower => "SHOWER",
            OperatingMode::Flush => "FLUSH",
            OperatingMode::Drain => "DRAIN",
            OperatingMode::Sanitize => "SANITIZE",
        }
    }

    #[inline]
    pub(crate) const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown mode name; carries the offending string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown operating mode {0:?}")]
pub struct UnknownMode(pub String);

impl FromStr for OperatingMode {
    type Err = UnknownMode;

    /// Exact, case-sensitive match on the upper-case wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperatingMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}

/// Mode as reported by the controller.
///
/// The ingress does not reject unknown names; they are kept verbatim so the
/// readout can echo them, and rendering takes the `Unrecognized` arm.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReportedMode {
    Known(OperatingMode),
    Unrecognized(String),
}

impl ReportedMode {
    pub fn classify(s: &str) -> Self {
        match s.parse::<OperatingMode>() {
            Ok(m) => ReportedMode::Known(m),
            Err(UnknownMode(raw)) => ReportedMode::Unrecognized(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReportedMode::Known(m) => m.as_str(),
            ReportedMode::Unrecognized(raw) => raw,
        }
    }
}

impl Default for ReportedMode {
    fn default() -> Self {
        ReportedMode::Known(OperatingMode::default())
    }
}

impl From<OperatingMode> for ReportedMode {
    fn from(m: OperatingMode) -> Self {
        ReportedMode::Known(m)
    }
}

impl fmt::Display for ReportedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ReportedMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
