//! Shared registry of open windows. A stop sweep closes everything here so
//! no window outlives its run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, Weak};

use super::window::{WindowHandle, WindowKind};

#[derive(Default)]
pub struct WindowRegistry {
    next_id: AtomicU64,
    windows: RwLock<HashMap<u64, Weak<WindowHandle>>>,
}

impl WindowRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Create and track a new window handle.
    pub fn register(self: &Arc<Self>, kind: WindowKind) -> Arc<WindowHandle> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let handle = WindowHandle::new(id, kind, Arc::downgrade(self));
        self.windows
            .write()
            .unwrap()
            .insert(id, Arc::downgrade(&handle));
        handle
    }

    pub(super) fn deregister(&self, id: u64) {
        self.windows.write().unwrap().remove(&id);
    }

    /// Windows still open right now.
    pub fn live_count(&self) -> usize {
        self.windows
            .read()
            .unwrap()
            .values()
            .filter(|w| w.upgrade().is_some())
            .count()
    }

    /// Close every tracked window. Handles are collected before closing so
    /// the deregistration inside `close` does not run under the map lock.
    pub fn close_all(&self) {
        let handles: Vec<Arc<WindowHandle>> = self
            .windows
            .read()
            .unwrap()
            .values()
            .filter_map(Weak::upgrade)
            .collect();
        for handle in handles {
            handle.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_all_sweeps_every_window() {
        let registry = WindowRegistry::new();
        let a = registry.register(WindowKind::Popup);
        let b = registry.register(WindowKind::Tab);
        let c = registry.register(WindowKind::Popup);
        assert_eq!(registry.live_count(), 3);

        registry.close_all();
        assert_eq!(registry.live_count(), 0);
        assert!(a.is_closed() && b.is_closed() && c.is_closed());
    }

    #[test]
    fn dropped_handles_do_not_count_as_live() {
        let registry = WindowRegistry::new();
        let a = registry.register(WindowKind::Popup);
        {
            let _b = registry.register(WindowKind::Popup);
        }
        assert_eq!(registry.live_count(), 1);
        a.close();
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn ids_are_unique() {
        let registry = WindowRegistry::new();
        let a = registry.register(WindowKind::Popup);
        let b = registry.register(WindowKind::Popup);
        assert_ne!(a.id(), b.id());
    }
}
