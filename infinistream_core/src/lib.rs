#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Core logic of the Infinistream shower status widget (host-agnostic).
//!
//! The widget shows which path water takes through the appliance for the
//! current operating mode, and how cloudy the recycled water is.
//!
//! ## Architecture
//!
//! - **Modes**: the five appliance states plus the lenient wire form (`mode`)
//! - **Flow**: the fixed pipe diagram and its visibility rule (`flow`)
//! - **Icons**: mode glyph and three-tier turbidity glyph (`icons`)
//! - **Render**: pure `(state, cfg) -> DisplayTree` (`render`)
//! - **State**: single-writer `(mode, turbidity)` pair (`state`)
//! - **Ingress**: webhook body validation and the only mutation path (`ingress`)
//! - **Display**: notification channel and the redraw thread (`display`)
//!
//! Nothing here touches a real display or network socket; the host (see the
//! `infinistream` binary) supplies both.

pub mod config;
pub mod conversions;
pub mod display;
pub mod error;
pub mod flow;
pub mod icons;
pub mod ingress;
pub mod mocks;
pub mod mode;
pub mod render;
pub mod state;

pub use config::{RenderCfg, TurbidityIcons};
pub use display::{ChannelSink, Display, DisplaySink, Presenter, display_channel};
pub use error::{DisplayError, IngressError, MalformedUpdate};
pub use flow::{FlowSegment, ModeSet, SegmentKind, VisibleSet, visible_segments};
pub use icons::{Glyph, ModeIcon, Spin, TurbidityTier, mode_icon, turbidity_tier};
pub use ingress::{Ingress, parse_update};
pub use mode::{OperatingMode, ReportedMode};
pub use render::{DisplayTree, render};
pub use state::{StateReader, StateWriter, WidgetState, new_state};
