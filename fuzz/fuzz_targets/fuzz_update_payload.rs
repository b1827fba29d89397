#![no_main]
use infinistream_core::{RenderCfg, parse_update, render};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Whatever the controller posts, parsing must not panic and an
    // accepted update must always render.
    if let Ok(state) = parse_update(data) {
        assert!(state.turbidity >= 0.0);
        let tree = render(&state, &RenderCfg::default());
        assert_eq!(tree.visible.len() + tree.hidden.len(), 15);
    }
});
