//! The fixed pipe diagram and its visibility rule.
//!
//! ```text
//!  SHOWER:   tank -> heater -> shower -> filter -> UV -> tank
//!  FLUSH:    tank -> filter -> faucet
//!  DRAIN:    tank -> faucet
//!  SANITIZE: tank -> UV -> tank
//! ```
//!
//! Components are always drawn. A connector is drawn only when its mode tag
//! set contains the active mode. CONNECTING draws the whole diagram; an
//! unrecognized mode draws the components alone.

use crate::mode::{OperatingMode, ReportedMode};
use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Component,
    Connector,
}

/// A named element of the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FlowSegment {
    Tank,
    Heater,
    Shower,
    Filter,
    Uv,
    Faucet,
    TankToHeater,
    HeaterToShower,
    ShowerToFilter,
    FilterToUv,
    UvToTank,
    TankToFilter,
    FilterToFaucet,
    TankToFaucet,
    TankToUv,
}

impl FlowSegment {
    pub const COUNT: usize = 15;

    pub const ALL: [FlowSegment; Self::COUNT] = [
        FlowSegment::Tank,
        FlowSegment::Heater,
        FlowSegment::Shower,
        FlowSegment::Filter,
        FlowSegment::Uv,
        FlowSegment::Faucet,
        FlowSegment::TankToHeater,
        FlowSegment::HeaterToShower,
        FlowSegment::ShowerToFilter,
        FlowSegment::FilterToUv,
        FlowSegment::UvToTank,
        FlowSegment::TankToFilter,
        FlowSegment::FilterToFaucet,
        FlowSegment::TankToFaucet,
        FlowSegment::TankToUv,
    ];

    /// Element id the presentation layer keys its nodes on.
    pub const fn id(self) -> &'static str {
        match self {
            FlowSegment::Tank => "comp-tank",
            FlowSegment::Heater => "comp-heater",
            FlowSegment::Shower => "comp-shower",
            FlowSegment::Filter => "comp-filter",
            FlowSegment::Uv => "comp-uv",
            FlowSegment::Faucet => "comp-faucet",
            FlowSegment::TankToHeater => "arrow-tank-heater",
            FlowSegment::HeaterToShower => "arrow-heater-shower",
            FlowSegment::ShowerToFilter => "arrow-shower-filter",
            FlowSegment::FilterToUv => "arrow-filter-uv",
            FlowSegment::UvToTank => "arrow-uv-tank-up",
            FlowSegment::TankToFilter => "arrow-tank-filter",
            FlowSegment::FilterToFaucet => "arrow-filter-faucet",
            FlowSegment::TankToFaucet => "arrow-tank-faucet",
            FlowSegment::TankToUv => "arrow-tank-uv",
        }
    }

    pub const fn kind(self) -> SegmentKind {
        match self {
            FlowSegment::Tank
            | FlowSegment::Heater
            | FlowSegment::Shower
            | FlowSegment::Filter
            | FlowSegment::Uv
            | FlowSegment::Faucet => SegmentKind::Component,
            _ => SegmentKind::Connector,
        }
    }

    #[inline]
    pub const fn is_component(self) -> bool {
        matches!(self.kind(), SegmentKind::Component)
    }

    /// Static tag table: the modes in which this segment is drawn.
    pub const fn modes(self) -> ModeSet {
        use OperatingMode::*;
        match self {
            FlowSegment::Tank
            | FlowSegment::Heater
            | FlowSegment::Shower
            | FlowSegment::Filter
            | FlowSegment::Uv
            | FlowSegment::Faucet => ModeSet::ALL,
            FlowSegment::TankToHeater
            | FlowSegment::HeaterToShower
            | FlowSegment::ShowerToFilter
            | FlowSegment::FilterToUv => ModeSet::EMPTY.with(Shower),
            FlowSegment::UvToTank => ModeSet::EMPTY.with(Shower).with(Sanitize),
            FlowSegment::TankToFilter | FlowSegment::FilterToFaucet => ModeSet::EMPTY.with(Flush),
            FlowSegment::TankToFaucet => ModeSet::EMPTY.with(Drain),
            FlowSegment::TankToUv => ModeSet::EMPTY.with(Sanitize),
        }
    }

    #[inline]
    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for FlowSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl Serialize for FlowSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// Set of operating modes, one bit per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeSet(u8);

impl ModeSet {
    pub const EMPTY: ModeSet = ModeSet(0);
    pub const ALL: ModeSet = ModeSet(0b1_1111);

    #[must_use]
    pub const fn with(self, m: OperatingMode) -> ModeSet {
        ModeSet(self.0 | m.bit())
    }

    #[inline]
    pub const fn contains(self, m: OperatingMode) -> bool {
        self.0 & m.bit() != 0
    }

    pub fn iter(self) -> impl Iterator<Item = OperatingMode> {
        OperatingMode::ALL
            .into_iter()
            .filter(move |m| self.contains(*m))
    }
}

/// Declarative set of drawn segments, iterated in diagram order.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleSet(u16);

impl VisibleSet {
    const FULL: u16 = (1 << FlowSegment::COUNT) - 1;

    pub const fn empty() -> Self {
        VisibleSet(0)
    }

    pub const fn all() -> Self {
        VisibleSet(Self::FULL)
    }

    pub fn components() -> Self {
        FlowSegment::ALL
            .into_iter()
            .filter(|s| s.is_component())
            .collect()
    }

    pub fn insert(&mut self, s: FlowSegment) {
        self.0 |= s.bit();
    }

    #[inline]
    pub const fn contains(&self, s: FlowSegment) -> bool {
        self.0 & s.bit() != 0
    }

    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Segments not in this set; what the host marks hidden.
    #[must_use]
    pub const fn complement(&self) -> Self {
        VisibleSet(!self.0 & Self::FULL)
    }

    pub fn iter(&self) -> impl Iterator<Item = FlowSegment> + '_ {
        FlowSegment::ALL
            .into_iter()
            .filter(move |s| self.contains(*s))
    }

    pub fn connectors(&self) -> impl Iterator<Item = FlowSegment> + '_ {
        self.iter().filter(|s| !s.is_component())
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.iter().map(FlowSegment::id).collect()
    }
}

impl FromIterator<FlowSegment> for VisibleSet {
    fn from_iter<I: IntoIterator<Item = FlowSegment>>(iter: I) -> Self {
        let mut set = VisibleSet::empty();
        for s in iter {
            set.insert(s);
        }
        set
    }
}

impl fmt::Debug for VisibleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(FlowSegment::id)).finish()
    }
}

impl Serialize for VisibleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for s in self.iter() {
            seq.serialize_element(s.id())?;
        }
        seq.end()
    }
}

/// Resolve which segments are drawn for `mode`.
///
/// Pure: depends on `mode` and the static tag table only.
pub fn visible_segments(mode: &ReportedMode) -> VisibleSet {
    match mode {
        ReportedMode::Known(OperatingMode::Connecting) => VisibleSet::all(),
        ReportedMode::Known(active) => FlowSegment::ALL
            .into_iter()
            .filter(|s| s.modes().contains(*active))
            .collect(),
        ReportedMode::Unrecognized(_) => VisibleSet::components(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_segment_has_a_unique_bit_and_id() {
        let mut bits = 0u16;
        let mut ids = std::collections::HashSet::new();
        for s in FlowSegment::ALL {
            assert_eq!(bits & s.bit(), 0, "{s} reuses a bit");
            bits |= s.bit();
            assert!(ids.insert(s.id()), "{s} reuses an id");
        }
        assert_eq!(bits, VisibleSet::all().0);
    }

    #[test]
    fn every_connector_is_tagged_with_some_mode() {
        for s in FlowSegment::ALL.into_iter().filter(|s| !s.is_component()) {
            assert_ne!(s.modes(), ModeSet::EMPTY, "{s} is never drawn");
            assert!(!s.modes().contains(OperatingMode::Connecting));
        }
    }

    #[test]
    fn complement_partitions_the_diagram() {
        let v = visible_segments(&OperatingMode::Drain.into());
        let h = v.complement();
        assert_eq!(v.len() + h.len(), FlowSegment::COUNT);
        assert!(v.iter().all(|s| !h.contains(s)));
    }

    #[test]
    fn mode_set_iterates_in_declaration_order() {
        let set = FlowSegment::UvToTank.modes();
        let modes: Vec<_> = set.iter().collect();
        assert_eq!(modes, vec![OperatingMode::Shower, OperatingMode::Sanitize]);
    }
}
