//! Core-to-display notification path.
//!
//! The ingress pushes each accepted `WidgetState` into a `DisplaySink`. The
//! stock sink is a crossbeam channel drained by a `Display` thread, which
//! renders and hands the tree to a host-supplied `Presenter`.
//!
//! Each `Display` owns exactly one thread; `finish` (or drop) presents
//! whatever is still queued, then joins it.
use crate::config::RenderCfg;
use crate::error::DisplayError;
use crate::render::{DisplayTree, render};
use crate::state::WidgetState;
use crossbeam_channel as xch;

/// Receives `{mode, turbidity}` after every state change.
pub trait DisplaySink {
    fn notify(&self, update: &WidgetState) -> Result<(), DisplayError>;
}

/// Host side of the widget: paints a rendered tree.
pub trait Presenter {
    fn present(&mut self, tree: &DisplayTree);
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn present(&mut self, tree: &DisplayTree) {
        (**self).present(tree);
    }
}

#[derive(Clone)]
pub struct ChannelSink {
    tx: xch::Sender<WidgetState>,
}

impl DisplaySink for ChannelSink {
    fn notify(&self, update: &WidgetState) -> Result<(), DisplayError> {
        self.tx
            .send(update.clone())
            .map_err(|_| DisplayError::Disconnected)
    }
}

/// Unbounded: the ingress must never block on a slow repaint.
pub fn display_channel() -> (ChannelSink, xch::Receiver<WidgetState>) {
    let (tx, rx) = xch::unbounded();
    (ChannelSink { tx }, rx)
}

pub struct Display<P: Presenter + Send + 'static> {
    stop_tx: Option<xch::Sender<()>>,
    join_handle: Option<std::thread::JoinHandle<P>>,
}

impl<P: Presenter + Send + 'static> Display<P> {
    pub fn spawn(rx: xch::Receiver<WidgetState>, cfg: RenderCfg, mut presenter: P) -> Self {
        let (stop_tx, stop_rx) = xch::bounded::<()>(1);

        let join_handle = std::thread::spawn(move || {
            let mut redraw = |update: WidgetState| {
                let tree = render(&update, &cfg);
                tracing::debug!(
                    mode = %tree.mode,
                    turbidity = tree.turbidity,
                    tier = ?tree.turbidity_tier,
                    visible = tree.visible.len(),
                    "redraw"
                );
                presenter.present(&tree);
            };
            loop {
                xch::select! {
                    recv(rx) -> msg => match msg {
                        Ok(update) => redraw(update),
                        Err(_) => {
                            tracing::debug!("display senders gone, exiting thread");
                            break;
                        }
                    },
                    recv(stop_rx) -> _ => {
                        // Anything queued before the stop request still gets painted.
                        for update in rx.try_iter() {
                            redraw(update);
                        }
                        break;
                    }
                }
            }
            tracing::trace!("display thread exiting cleanly");
            presenter
        });

        Self {
            stop_tx: Some(stop_tx),
            join_handle: Some(join_handle),
        }
    }

    /// Stop the thread and hand the presenter back. `None` if it panicked.
    pub fn finish(mut self) -> Option<P> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Option<P> {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        let handle = self.join_handle.take()?;
        match handle.join() {
            Ok(p) => Some(p),
            Err(e) => {
                tracing::warn!(?e, "display thread panicked during shutdown");
                None
            }
        }
    }
}

impl<P: Presenter + Send + 'static> Drop for Display<P> {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}
