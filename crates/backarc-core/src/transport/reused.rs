//! Delivery through one long-lived window per worker.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::probe::{self, Outcome};
use crate::surface::{Navigator, WindowHandle, WindowKind, WindowOpener, WindowRegistry};
use crate::task::Task;

use super::{settle_and_probe, Transport};

/// Opens a window on first use and navigates it in place for every
/// subsequent task. A window closed out from under us (by a stop sweep) is
/// replaced on the next dispatch. The window stays open between tasks; the
/// registry sweep at the end of the run closes it.
pub struct ReusedWindowTransport {
    kind: WindowKind,
    windows: Arc<WindowRegistry>,
    opener: Arc<dyn WindowOpener>,
    navigator: Arc<dyn Navigator>,
    current: Mutex<Option<Arc<WindowHandle>>>,
}

impl ReusedWindowTransport {
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
            current: Mutex::new(None),
        }
    }

    fn window(&self) -> Option<Arc<WindowHandle>> {
        let mut current = self.current.lock().unwrap();
        if let Some(w) = current.as_ref().filter(|w| !w.is_closed()) {
            return Some(Arc::clone(w));
        }
        match self.opener.open(&self.windows, self.kind) {
            Ok(w) => {
                *current = Some(Arc::clone(&w));
                Some(w)
            }
            Err(e) => {
                debug!(error = %e, "window open refused");
                *current = None;
                None
            }
        }
    }
}

#[async_trait]
impl Transport for ReusedWindowTransport {
    async fn dispatch(&self, task: &Task) -> Outcome {
        let Some(_window) = self.window() else {
            return Outcome::Failure;
        };

        match settle_and_probe(self.navigator.as_ref(), &task.archive_url).await {
            Ok(reading) => probe::judge(&reading),
            Err(e) => {
                debug!(error = %e, url = %task.archive_url, "window navigation failed");
                Outcome::Failure
            }
        }
    }
}
