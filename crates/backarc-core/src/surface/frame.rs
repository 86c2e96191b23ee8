//! Embedded frame slots for iframe delivery.
//!
//! Built once at run start, one slot per worker. A stop sweep clears the
//! grid; a dispatch that then looks up its slot finds it gone and records a
//! failure instead of touching a stale surface.

use std::sync::RwLock;

#[derive(Default)]
pub struct FrameGrid {
    slots: RwLock<usize>,
}

impl FrameGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the grid with `count` slots.
    pub fn build(&self, count: usize) {
        *self.slots.write().unwrap() = count;
    }

    /// Tear down every slot.
    pub fn clear(&self) {
        *self.slots.write().unwrap() = 0;
    }

    pub fn has(&self, slot: usize) -> bool {
        slot < *self.slots.read().unwrap()
    }

    pub fn len(&self) -> usize {
        *self.slots.read().unwrap()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_then_clear() {
        let grid = FrameGrid::new();
        assert!(grid.is_empty());

        grid.build(4);
        assert_eq!(grid.len(), 4);
        assert!(grid.has(0));
        assert!(grid.has(3));
        assert!(!grid.has(4));

        grid.clear();
        assert!(grid.is_empty());
        assert!(!grid.has(0));
    }

    #[test]
    fn rebuild_replaces_slot_count() {
        let grid = FrameGrid::new();
        grid.build(2);
        grid.build(5);
        assert_eq!(grid.len(), 5);
    }
}
