//! Drawer open/close state

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Commands a child view may issue to the drawer it lives in
pub trait DrawerController: Send + Sync {
    fn open(&self);
    fn close(&self);
    fn toggle(&self);
    fn is_open(&self) -> bool;
}

/// Drawer state owned by the parent view
///
/// Clones share the same flag, so a clone handed to a child controls the
/// parent's drawer.
#[derive(Debug, Clone, Default)]
pub struct Drawer {
    open: Arc<AtomicBool>,
}

impl Drawer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for a child view
    pub fn controller(&self) -> Arc<dyn DrawerController> {
        Arc::new(self.clone())
    }

    fn set(&self, open: bool) {
        let was = self.open.swap(open, Ordering::SeqCst);
        if was != open {
            tracing::debug!(open, "Drawer state changed");
        }
    }
}

impl DrawerController for Drawer {
    fn open(&self) {
        self.set(true);
    }

    fn close(&self) {
        self.set(false);
    }

    fn toggle(&self) {
        let now_open = !self.open.fetch_xor(true, Ordering::SeqCst);
        tracing::debug!(open = now_open, "Drawer toggled");
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}
