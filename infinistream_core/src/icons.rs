//! Icon selection for the mode and turbidity readouts.
//!
//! Glyph names are Font Awesome classes; the host ships the font.

use crate::mode::{OperatingMode, ReportedMode};
use infinistream_config::TurbidityIcons;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

const FA_STYLE: &str = "fa-solid";
const FA_SPIN: &str = "fa-spin";
const SPIN_SLOW: &str = "spin-slow";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Glyph {
    Spinner,
    Shower,
    FaucetDrip,
    Sun,
    Question,
    Water,
    Cloud,
    Smog,
    ThumbsUp,
    TriangleExclamation,
    Skull,
}

impl Glyph {
    pub const fn class(self) -> &'static str {
        match self {
            Glyph::Spinner => "fa-spinner",
            Glyph::Shower => "fa-shower",
            Glyph::FaucetDrip => "fa-faucet-drip",
            Glyph::Sun => "fa-sun",
            Glyph::Question => "fa-question",
            Glyph::Water => "fa-water",
            Glyph::Cloud => "fa-cloud",
            Glyph::Smog => "fa-smog",
            Glyph::ThumbsUp => "fa-thumbs-up",
            Glyph::TriangleExclamation => "fa-triangle-exclamation",
            Glyph::Skull => "fa-skull",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Spin {
    Normal,
    Slow,
}

/// Glyph plus optional animation for the mode readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeIcon {
    pub glyph: Glyph,
    pub spin: Option<Spin>,
}

impl ModeIcon {
    pub fn classes(&self) -> Vec<&'static str> {
        let mut out = vec![FA_STYLE, self.glyph.class()];
        match self.spin {
            Some(Spin::Normal) => out.push(FA_SPIN),
            Some(Spin::Slow) => out.extend([FA_SPIN, SPIN_SLOW]),
            None => {}
        }
        out
    }
}

impl Serialize for ModeIcon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("ModeIcon", 3)?;
        st.serialize_field("glyph", &self.glyph)?;
        st.serialize_field("spin", &self.spin)?;
        st.serialize_field("classes", &self.classes())?;
        st.end()
    }
}

pub fn mode_icon(mode: &ReportedMode, slow_spinner: bool) -> ModeIcon {
    let glyph = match mode {
        ReportedMode::Known(OperatingMode::Connecting) => Glyph::Spinner,
        ReportedMode::Known(OperatingMode::Shower) => Glyph::Shower,
        ReportedMode::Known(OperatingMode::Drain | OperatingMode::Flush) => Glyph::FaucetDrip,
        ReportedMode::Known(OperatingMode::Sanitize) => Glyph::Sun,
        ReportedMode::Unrecognized(_) => Glyph::Question,
    };
    let spin = match mode {
        ReportedMode::Known(OperatingMode::Connecting) if slow_spinner => Some(Spin::Slow),
        ReportedMode::Known(OperatingMode::Connecting) => Some(Spin::Normal),
        _ => None,
    };
    ModeIcon { glyph, spin }
}

/// Turbidity severity, 0 = clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TurbidityTier {
    Clear,
    Cloudy,
    Murky,
}

impl TurbidityTier {
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Tier for `value` against `[t0, t1, t2]`. Each upper tier includes its
/// lower bound; `t0` does not split anything. NaN stays `Clear`.
pub fn turbidity_tier(value: f64, levels: [f64; 3]) -> TurbidityTier {
    let mut tier = TurbidityTier::Clear;
    if value >= levels[1] {
        tier = TurbidityTier::Cloudy;
    }
    if value >= levels[2] {
        tier = TurbidityTier::Murky;
    }
    tier
}

pub fn turbidity_glyph(tier: TurbidityTier, family: TurbidityIcons) -> Glyph {
    match (family, tier) {
        (TurbidityIcons::Weather, TurbidityTier::Clear) => Glyph::Water,
        (TurbidityIcons::Weather, TurbidityTier::Cloudy) => Glyph::Cloud,
        (TurbidityIcons::Weather, TurbidityTier::Murky) => Glyph::Smog,
        (TurbidityIcons::Verdict, TurbidityTier::Clear) => Glyph::ThumbsUp,
        (TurbidityIcons::Verdict, TurbidityTier::Cloudy) => Glyph::TriangleExclamation,
        (TurbidityIcons::Verdict, TurbidityTier::Murky) => Glyph::Skull,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_classes_include_slow_variant() {
        let icon = mode_icon(&ReportedMode::default(), true);
        assert_eq!(
            icon.classes(),
            vec!["fa-solid", "fa-spinner", "fa-spin", "spin-slow"]
        );
        let icon = mode_icon(&ReportedMode::default(), false);
        assert_eq!(icon.classes(), vec!["fa-solid", "fa-spinner", "fa-spin"]);
    }

    #[test]
    fn only_connecting_spins() {
        for m in OperatingMode::ALL {
            let icon = mode_icon(&m.into(), true);
            assert_eq!(icon.spin.is_some(), m == OperatingMode::Connecting);
        }
    }

    #[test]
    fn collapsed_levels_skip_the_middle_tier() {
        assert_eq!(turbidity_tier(10.0, [0.0, 10.0, 10.0]), TurbidityTier::Murky);
        assert_eq!(turbidity_tier(9.9, [0.0, 10.0, 10.0]), TurbidityTier::Clear);
    }

    #[test]
    fn nan_reads_as_clear() {
        assert_eq!(turbidity_tier(f64::NAN, [0.0, 50.0, 100.0]), TurbidityTier::Clear);
    }
}
