//! Delivery through an embedded frame slot.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::probe::Outcome;
use crate::surface::{FrameGrid, Navigator};
use crate::task::Task;

use super::Transport;

/// Each worker owns one frame slot for the whole run. Frame content cannot
/// be inspected after the load, so any completed navigation counts as
/// accepted the moment it completes; there is no settle dwell and no title
/// probe. Only a navigation error or a missing slot is a failure.
pub struct FrameTransport {
    slot: usize,
    frames: Arc<FrameGrid>,
    navigator: Arc<dyn Navigator>,
}

impl FrameTransport {
    pub fn new(slot: usize, frames: Arc<FrameGrid>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            slot,
            frames,
            navigator,
        }
    }
}

#[async_trait]
impl Transport for FrameTransport {
    async fn dispatch(&self, task: &Task) -> Outcome {
        if !self.frames.has(self.slot) {
            debug!(slot = self.slot, "frame slot is gone, recording failure");
            return Outcome::Failure;
        }
        match self.navigator.load(&task.archive_url).await {
            Ok(_) => Outcome::Success,
            Err(e) => {
                debug!(error = %e, url = %task.archive_url, "frame navigation failed");
                Outcome::Failure
            }
        }
    }
}
