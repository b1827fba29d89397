//! Terminal presenters: how the CLI "host" paints a `DisplayTree`.

use infinistream_core::{DisplayTree, Presenter};
use std::io::Write;

/// Human-readable frame, one block per redraw.
pub struct TextPresenter<W: Write> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

pub fn format_text(tree: &DisplayTree) -> String {
    let connectors: Vec<&str> = tree.visible.connectors().map(|s| s.id()).collect();
    let flow = if connectors.is_empty() {
        "-".to_string()
    } else {
        connectors.join(" ")
    };
    format!(
        "{} [{}]\n{} [{}] ({:?})\nFlow: {}\n",
        tree.mode_label,
        tree.mode_icon.classes().join(" "),
        tree.turbidity_label,
        tree.turbidity_icon.class(),
        tree.turbidity_tier,
        flow,
    )
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, tree: &DisplayTree) {
        let res = self
            .out
            .write_all(format_text(tree).as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(e) = res {
            tracing::warn!(error = %e, "failed to paint frame");
        }
    }
}

/// One JSON object per line, for hosts that consume the tree directly.
pub struct JsonPresenter<W: Write> {
    out: W,
}

impl<W: Write> JsonPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn present(&mut self, tree: &DisplayTree) {
        let res = serde_json::to_writer(&mut self.out, tree)
            .map_err(std::io::Error::from)
            .and_then(|()| writeln!(self.out))
            .and_then(|()| self.out.flush());
        if let Err(e) = res {
            tracing::warn!(error = %e, "failed to paint frame");
        }
    }
}

/// Picks the presenter for `--json`.
pub fn stdout_presenter(json: bool) -> Box<dyn Presenter + Send> {
    if json {
        Box::new(JsonPresenter::new(std::io::stdout()))
    } else {
        Box::new(TextPresenter::new(std::io::stdout()))
    }
}
