//! Swipe Detector - horizontal touch gesture to drawer-open intent
//!
//! Converts raw touch-start/touch-end pairs into a single open-drawer
//! intent. The start abscissa is ephemeral: captured at touch-start,
//! consumed by the matching touch-end, never persisted. The drawer-open flag
//! is read at release time, so a gesture finishing while the drawer is
//! already open emits nothing.

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::Signal;

/// Minimum leftward travel for a gesture to register as a swipe.
pub const SWIPE_THRESHOLD: f32 = 25.0;

/// Turns touch gestures into open intents for the drawer.
pub struct SwipeDetector {
    start_x: Cell<Option<f32>>,
    drawer_open: Signal<bool>,
    on_open: Rc<dyn Fn()>,
}

impl SwipeDetector {
    /// `drawer_open` is a read-only clone of the drawer's open flag;
    /// `on_open` is the intent sink.
    pub fn new(drawer_open: Signal<bool>, on_open: Rc<dyn Fn()>) -> Self {
        Self {
            start_x: Cell::new(None),
            drawer_open,
            on_open,
        }
    }

    /// Capture the start abscissa of a touch gesture.
    pub fn on_touch_start(&self, x: f32) {
        self.start_x.set(Some(x));
    }

    /// Consume the pending start, if any, and emit an open intent when the
    /// leftward travel exceeds [`SWIPE_THRESHOLD`] and the drawer is closed.
    ///
    /// A touch-end with no matching touch-start is ignored.
    pub fn on_touch_end(&self, x: f32) {
        let Some(start) = self.start_x.take() else {
            return;
        };
        if start - x > SWIPE_THRESHOLD && !self.drawer_open.get() {
            (self.on_open)();
        }
    }

    /// Whether a touch-start is waiting for its touch-end.
    pub fn has_pending_start(&self) -> bool {
        self.start_x.get().is_some()
    }
}
