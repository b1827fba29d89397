//! Runtime configuration for the renderer.
//!
//! Separate from the TOML schema in `infinistream_config`; see `conversions`.

pub use infinistream_config::TurbidityIcons;

/// What `render` needs besides the state pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCfg {
    /// Ascending cut points `[t0, t1, t2]` in NTU.
    pub turbidity_levels: [f64; 3],
    /// Use the slow spinner while CONNECTING.
    pub slow_spinner: bool,
    pub turbidity_icons: TurbidityIcons,
}

impl Default for RenderCfg {
    fn default() -> Self {
        Self {
            turbidity_levels: infinistream_config::DEFAULT_TURBIDITY_LEVELS,
            slow_spinner: true,
            turbidity_icons: TurbidityIcons::Weather,
        }
    }
}
