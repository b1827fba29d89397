//! `From` implementations bridging `infinistream_config` types to core types.

use crate::config::RenderCfg;

impl From<&infinistream_config::DisplayCfg> for RenderCfg {
    fn from(c: &infinistream_config::DisplayCfg) -> Self {
        Self {
            turbidity_levels: c.levels(),
            slow_spinner: c.slow_spinner,
            turbidity_icons: c.turbidity_icons,
        }
    }
}

impl From<&infinistream_config::Config> for RenderCfg {
    fn from(c: &infinistream_config::Config) -> Self {
        (&c.display).into()
    }
}
