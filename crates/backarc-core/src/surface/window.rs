//! Window handles and the opener seam.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use crate::error::OpenBlocked;

use super::registry::WindowRegistry;

/// How a window is opened: a sized popup or a full browser tab. Openers may
/// treat them differently; the scheduler only cares that a window exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Popup,
    Tab,
}

/// One open submission window. Closing is idempotent and removes the
/// window from its registry.
pub struct WindowHandle {
    id: u64,
    kind: WindowKind,
    closed: AtomicBool,
    registry: Weak<WindowRegistry>,
}

impl WindowHandle {
    pub(super) fn new(id: u64, kind: WindowKind, registry: Weak<WindowRegistry>) -> Arc<Self> {
        Arc::new(Self {
            id,
            kind,
            closed: AtomicBool::new(false),
            registry,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            if let Some(registry) = self.registry.upgrade() {
                registry.deregister(self.id);
            }
        }
    }
}

/// Opens windows into a registry. An open can be refused outright (the
/// blocked case); a refusal fails the one task, never the run.
pub trait WindowOpener: Send + Sync + 'static {
    fn open(
        &self,
        registry: &Arc<WindowRegistry>,
        kind: WindowKind,
    ) -> Result<Arc<WindowHandle>, OpenBlocked>;
}

/// Opener that always succeeds.
#[derive(Default)]
pub struct HeadlessOpener;

impl WindowOpener for HeadlessOpener {
    fn open(
        &self,
        registry: &Arc<WindowRegistry>,
        kind: WindowKind,
    ) -> Result<Arc<WindowHandle>, OpenBlocked> {
        Ok(registry.register(kind))
    }
}
