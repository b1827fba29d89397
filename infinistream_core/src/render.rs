//! Mode-flow renderer: state pair in, declarative display description out.

use crate::config::RenderCfg;
use crate::flow::{VisibleSet, visible_segments};
use crate::icons::{Glyph, ModeIcon, TurbidityTier, mode_icon, turbidity_glyph, turbidity_tier};
use crate::state::WidgetState;
use serde::Serialize;

/// Everything the host needs for one repaint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayTree {
    /// Mode string as reported, unknown names included.
    pub mode: String,
    pub turbidity: f64,
    pub mode_label: String,
    pub turbidity_label: String,
    pub mode_icon: ModeIcon,
    pub turbidity_tier: TurbidityTier,
    pub turbidity_icon: Glyph,
    pub visible: VisibleSet,
    pub hidden: VisibleSet,
}

/// Pure: same `(state, cfg)` always yields the same tree. No I/O.
pub fn render(state: &WidgetState, cfg: &RenderCfg) -> DisplayTree {
    let tier = turbidity_tier(state.turbidity, cfg.turbidity_levels);
    let visible = visible_segments(&state.mode);
    DisplayTree {
        mode: state.mode.as_str().to_string(),
        turbidity: state.turbidity,
        mode_label: format!("Mode: {}", state.mode),
        turbidity_label: format!("Turbidity: {}", state.turbidity),
        mode_icon: mode_icon(&state.mode, cfg.slow_spinner),
        turbidity_tier: tier,
        turbidity_icon: turbidity_glyph(tier, cfg.turbidity_icons),
        visible,
        hidden: visible.complement(),
    }
}
