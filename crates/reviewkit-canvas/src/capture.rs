//! Pointer capture registry.
//!
//! Drags that must keep tracking after the pointer leaves the surface (pin
//! relocation, the wipe divider) subscribe to document-level move/up events
//! for the lifetime of the gesture. Each subscription is a [`CaptureGuard`];
//! dropping the guard unsubscribes, so every exit path releases it.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct CaptureTable {
    next_id: AtomicU64,
    active: Mutex<BTreeMap<u64, &'static str>>,
}

/// Shared registry of active document-level pointer subscriptions.
#[derive(Debug, Clone, Default)]
pub struct PointerCapture {
    table: Arc<CaptureTable>,
}

impl PointerCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe for the duration of one gesture.
    pub fn acquire(&self, label: &'static str) -> CaptureGuard {
        let id = self.table.next_id.fetch_add(1, Ordering::Relaxed);
        self.table.active.lock().insert(id, label);
        tracing::trace!("Pointer capture {} acquired ({})", id, label);
        CaptureGuard {
            id,
            label,
            table: Arc::clone(&self.table),
        }
    }

    /// Number of subscriptions currently held.
    pub fn active_count(&self) -> usize {
        self.table.active.lock().len()
    }

    /// Labels of the subscriptions currently held, oldest first.
    pub fn active_labels(&self) -> Vec<&'static str> {
        self.table.active.lock().values().copied().collect()
    }
}

/// Releases its subscription on drop.
#[derive(Debug)]
pub struct CaptureGuard {
    id: u64,
    label: &'static str,
    table: Arc<CaptureTable>,
}

impl CaptureGuard {
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        if self.table.active.lock().remove(&self.id).is_some() {
            tracing::debug!("Pointer capture {} released ({})", self.id, self.label);
        }
    }
}
