//! Test and helper mocks for infinistream_core

use crate::display::{DisplaySink, Presenter};
use crate::error::DisplayError;
use crate::render::DisplayTree;
use crate::state::WidgetState;
use std::sync::{Arc, Mutex, PoisonError};

/// Sink that keeps every notification; clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingSink {
    seen: Arc<Mutex<Vec<WidgetState>>>,
}

impl RecordingSink {
    pub fn notifications(&self) -> Vec<WidgetState> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DisplaySink for RecordingSink {
    fn notify(&self, update: &WidgetState) -> Result<(), DisplayError> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(update.clone());
        Ok(())
    }
}

/// Sink whose display has already gone away.
pub struct ClosedSink;

impl DisplaySink for ClosedSink {
    fn notify(&self, _update: &WidgetState) -> Result<(), DisplayError> {
        Err(DisplayError::Disconnected)
    }
}

/// Presenter that collects every tree it is handed.
#[derive(Default)]
pub struct RecordingPresenter {
    pub frames: Vec<DisplayTree>,
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, tree: &DisplayTree) {
        self.frames.push(tree.clone());
    }
}
