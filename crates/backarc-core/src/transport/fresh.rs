//! Delivery through a new window per task.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::probe::{self, Outcome};
use crate::surface::{Navigator, WindowKind, WindowOpener, WindowRegistry};
use crate::task::Task;

use super::{settle_and_probe, Transport};

/// Opens a window, drives the submission, probes the title, closes the
/// window. A blocked open fails the task without retrying.
pub struct FreshWindowTransport {
    kind: WindowKind,
    windows: Arc<WindowRegistry>,
    opener: Arc<dyn WindowOpener>,
    navigator: Arc<dyn Navigator>,
}

impl FreshWindowTransport {
    pub fn new(
        kind: WindowKind,
        windows: Arc<WindowRegistry>,
        opener: Arc<dyn WindowOpener>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            kind,
            windows,
            opener,
            navigator,
        }
    }
}

#[async_trait]
impl Transport for FreshWindowTransport {
    async fn dispatch(&self, task: &Task) -> Outcome {
        let window = match self.opener.open(&self.windows, self.kind) {
            Ok(w) => w,
            Err(e) => {
                debug!(error = %e, url = %task.archive_url, "window open refused");
                return Outcome::Failure;
            }
        };

        let outcome = match settle_and_probe(self.navigator.as_ref(), &task.archive_url).await {
            Ok(reading) => probe::judge(&reading),
            Err(e) => {
                debug!(error = %e, url = %task.archive_url, "window navigation failed");
                Outcome::Failure
            }
        };

        window.close();
        outcome
    }
}
