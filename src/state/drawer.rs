//! Drawer Controller - off-canvas navigation panel state machine
//!
//! Owns the drawer's open/closed state and the in-progress drag offset.
//! Opening is synchronous (the entry animation is purely visual and never
//! blocks state). Closing is a two-phase async action: the backdrop leg
//! runs first, then the panel leg slides from the live drag offset out to
//! the measured panel width, and only after both legs does the state commit
//! to closed.
//!
//! # Drag geometry
//!
//! Offset 0 is the open rest position. Positive offset moves the panel
//! toward its closed position; that direction is damped by the elastic
//! factor. Negative displacement (past fully open) is hard-clamped to 0.
//! Releasing past the close threshold commits the close from wherever the
//! panel currently is; releasing short of it springs the panel back.
//!
//! # Example
//!
//! ```ignore
//! use curtain::state::{drawer::DrawerController, timers};
//!
//! let drawer = DrawerController::default();
//! drawer.open();
//! drawer.set_measured_width(280.0);
//!
//! drawer.close();
//! timers::advance(1000); // both legs
//! assert!(!drawer.is_open());
//! ```

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::state::timers::TimerScope;

// =============================================================================
// TYPES
// =============================================================================

/// Drawer state machine phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawerPhase {
    #[default]
    Closed,
    Open,
    /// Close animation in flight; commits to `Closed` after both legs.
    Closing,
}

/// Configuration for drawer behavior.
#[derive(Debug, Clone, Copy)]
pub struct DrawerProps {
    /// Drag offset beyond which a release commits the close.
    pub close_threshold: f32,
    /// Damping factor applied to displacement toward the closed position.
    pub elastic: f32,
    /// Slide distance used when no width measurement has arrived.
    pub fallback_width: f32,
    /// Duration of each close-animation leg.
    pub leg_duration: u64,
}

impl Default for DrawerProps {
    fn default() -> Self {
        Self {
            close_threshold: 50.0,
            elastic: 0.5,
            fallback_width: 320.0,
            leg_duration: 500,
        }
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Owns drawer open/closed state and the in-progress drag offset.
pub struct DrawerController {
    phase: Signal<DrawerPhase>,
    open: Signal<bool>,
    drag_offset: Signal<f32>,
    measured_width: Signal<Option<f32>>,
    props: DrawerProps,
    timers: TimerScope,
    drag_anchor: Cell<Option<f32>>,
    drag_base: Cell<f32>,
    close_motion: Rc<Cell<Option<(f32, f32)>>>,
}

impl DrawerController {
    pub fn new(props: DrawerProps) -> Self {
        Self {
            phase: signal(DrawerPhase::Closed),
            open: signal(false),
            drag_offset: signal(0.0),
            measured_width: signal(None),
            props,
            timers: TimerScope::new(),
            drag_anchor: Cell::new(None),
            drag_base: Cell::new(0.0),
            close_motion: Rc::new(Cell::new(None)),
        }
    }

    // =========================================================================
    // OPEN / CLOSE
    // =========================================================================

    /// Open the drawer. Synchronous: `is_open` is true on return.
    ///
    /// A no-op while already open. An open request during a close animation
    /// is ignored; the close always runs to its commit.
    pub fn open(&self) {
        if self.phase.get() != DrawerPhase::Closed {
            return;
        }
        self.drag_offset.set(0.0);
        self.phase.set(DrawerPhase::Open);
        self.open.set(true);
    }

    /// Request the close sequence. Idempotent: at most one close animation
    /// is in flight, and a second request while closing is a no-op.
    pub fn close(&self) {
        if self.phase.get() != DrawerPhase::Open {
            return;
        }
        self.begin_close();
    }

    /// The menu button path: open when closed, close when open.
    pub fn toggle(&self) {
        match self.phase.get() {
            DrawerPhase::Closed => self.open(),
            DrawerPhase::Open => self.close(),
            DrawerPhase::Closing => {}
        }
    }

    /// Record the measured panel width from the layout collaborator.
    ///
    /// Used as the distance target of the close animation's panel leg; until
    /// a measurement arrives, closes use the configured fallback.
    pub fn set_measured_width(&self, width: f32) {
        self.measured_width.set(Some(width));
    }

    // =========================================================================
    // DRAG SESSION
    // =========================================================================

    /// Begin a drag session at the given pointer abscissa.
    ///
    /// Ignored unless the drawer is open.
    pub fn drag_start(&self, x: f32) {
        if self.phase.get() != DrawerPhase::Open {
            return;
        }
        self.drag_anchor.set(Some(x));
        // Resume from the current raw displacement so a re-grab mid-return
        // does not jump.
        let offset = self.drag_offset.get();
        let raw = if self.props.elastic > 0.0 {
            offset / self.props.elastic
        } else {
            0.0
        };
        self.drag_base.set(raw);
    }

    /// Update the live drag offset from pointer movement.
    ///
    /// Displacement toward closed is damped by the elastic factor;
    /// displacement past fully open is clamped to 0. Ignored without a
    /// matching [`drag_start`].
    ///
    /// [`drag_start`]: DrawerController::drag_start
    pub fn drag_move(&self, x: f32) {
        let Some(anchor) = self.drag_anchor.get() else {
            return;
        };
        if self.phase.get() != DrawerPhase::Open {
            return;
        }
        let raw = self.drag_base.get() + (x - anchor);
        let offset = if raw <= 0.0 {
            0.0
        } else {
            raw * self.props.elastic
        };
        self.drag_offset.set(offset);
    }

    /// End the drag session. Past the threshold the close sequence starts
    /// from the live offset; short of it the panel springs back to rest.
    pub fn drag_end(&self) {
        if self.drag_anchor.take().is_none() {
            return;
        }
        if self.phase.get() != DrawerPhase::Open {
            return;
        }
        if self.drag_offset.get() > self.props.close_threshold {
            self.begin_close();
        } else {
            self.drag_offset.set(0.0);
        }
    }

    // =========================================================================
    // STATE ACCESS
    // =========================================================================

    /// Whether the drawer is open (stays true through the close animation).
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Open flag signal, for reactive consumers (the swipe detector's gate).
    pub fn open_signal(&self) -> Signal<bool> {
        self.open.clone()
    }

    /// Current state machine phase.
    pub fn phase(&self) -> DrawerPhase {
        self.phase.get()
    }

    /// Phase signal, for reactive consumers.
    pub fn phase_signal(&self) -> Signal<DrawerPhase> {
        self.phase.clone()
    }

    /// Live drag offset. Only meaningful while the drawer is open.
    pub fn drag_offset(&self) -> f32 {
        self.drag_offset.get()
    }

    /// Drag offset signal, for positioning the panel.
    pub fn drag_offset_signal(&self) -> Signal<f32> {
        self.drag_offset.clone()
    }

    /// Last measured panel width, if any.
    pub fn measured_width(&self) -> Option<f32> {
        self.measured_width.get()
    }

    /// Endpoints of the panel leg while closing: `(from, to)` where `from`
    /// is the offset captured when the close began and `to` the measured
    /// width or the fallback. `None` outside the close animation.
    pub fn close_motion(&self) -> Option<(f32, f32)> {
        self.close_motion.get()
    }

    /// Cancel any in-flight close animation and release the scope.
    ///
    /// An interrupted close simply never commits; no state mutation can
    /// happen after teardown.
    pub fn teardown(&self) {
        self.timers.dispose();
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    fn begin_close(&self) {
        self.phase.set(DrawerPhase::Closing);
        let from = self.drag_offset.get();
        let to = self.measured_width.get().unwrap_or(self.props.fallback_width);
        self.close_motion.set(Some((from, to)));

        let leg = self.props.leg_duration;
        let scope = self.timers.clone();
        let phase = self.phase.clone();
        let open = self.open.clone();
        let offset = self.drag_offset.clone();
        let motion = Rc::clone(&self.close_motion);
        self.timers.timeout(leg, move || {
            // Backdrop leg settled; the panel leg starts from the captured
            // offset and commits the state once it lands.
            scope.timeout(leg, move || {
                phase.set(DrawerPhase::Closed);
                open.set(false);
                offset.set(0.0);
                motion.set(None);
            });
        });
    }
}

impl Default for DrawerController {
    fn default() -> Self {
        Self::new(DrawerProps::default())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::timers::{advance, pending_timers, reset_timer_state};

    const LEG: u64 = 500;

    fn setup() -> DrawerController {
        reset_timer_state();
        DrawerController::default()
    }

    #[test]
    fn test_open_is_synchronous() {
        let drawer = setup();
        assert!(!drawer.is_open());
        assert_eq!(drawer.phase(), DrawerPhase::Closed);

        drawer.open();
        assert!(drawer.is_open());
        assert_eq!(drawer.phase(), DrawerPhase::Open);
        assert_eq!(drawer.drag_offset(), 0.0);
    }

    #[test]
    fn test_close_commits_only_after_both_legs() {
        let drawer = setup();
        drawer.open();
        drawer.close();
        assert_eq!(drawer.phase(), DrawerPhase::Closing);
        assert!(drawer.is_open()); // still visible during the animation

        advance(LEG);
        assert!(drawer.is_open()); // first leg done, second in flight

        advance(LEG - 1);
        assert!(drawer.is_open());
        advance(1);
        assert!(!drawer.is_open());
        assert_eq!(drawer.phase(), DrawerPhase::Closed);
        assert_eq!(drawer.drag_offset(), 0.0);
    }

    #[test]
    fn test_close_is_idempotent() {
        let drawer = setup();
        drawer.open();
        drawer.close();
        drawer.close();
        drawer.close();
        assert_eq!(pending_timers(), 1); // a single close chain in flight

        advance(2 * LEG);
        assert_eq!(drawer.phase(), DrawerPhase::Closed);
        assert_eq!(pending_timers(), 0);
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let drawer = setup();
        drawer.close();
        assert_eq!(drawer.phase(), DrawerPhase::Closed);
        assert_eq!(pending_timers(), 0);
    }

    #[test]
    fn test_open_during_closing_is_ignored() {
        let drawer = setup();
        drawer.open();
        drawer.close();

        advance(LEG / 2);
        drawer.open();
        assert_eq!(drawer.phase(), DrawerPhase::Closing);

        advance(2 * LEG);
        assert!(!drawer.is_open()); // the close ran to its commit
    }

    #[test]
    fn test_toggle_routes_by_phase() {
        let drawer = setup();
        drawer.toggle();
        assert!(drawer.is_open());

        drawer.toggle();
        assert_eq!(drawer.phase(), DrawerPhase::Closing);

        drawer.toggle(); // ignored mid-close
        advance(2 * LEG);
        assert!(!drawer.is_open());
    }

    #[test]
    fn test_drag_is_elastic_toward_closed() {
        let drawer = setup();
        drawer.open();

        drawer.drag_start(200.0);
        drawer.drag_move(300.0); // raw 100, damped by 0.5
        assert_eq!(drawer.drag_offset(), 50.0);
    }

    #[test]
    fn test_drag_clamps_at_open_rest() {
        let drawer = setup();
        drawer.open();

        drawer.drag_start(200.0);
        drawer.drag_move(100.0); // past fully open
        assert_eq!(drawer.drag_offset(), 0.0);

        // Coming back through the bound resumes damping.
        drawer.drag_move(240.0);
        assert_eq!(drawer.drag_offset(), 20.0);
    }

    #[test]
    fn test_release_past_threshold_closes() {
        let drawer = setup();
        drawer.open();

        drawer.drag_start(0.0);
        drawer.drag_move(102.0); // offset 51 > 50
        drawer.drag_end();
        assert_eq!(drawer.phase(), DrawerPhase::Closing);

        advance(2 * LEG);
        assert!(!drawer.is_open());
    }

    #[test]
    fn test_release_short_of_threshold_springs_back() {
        let drawer = setup();
        drawer.open();

        drawer.drag_start(0.0);
        drawer.drag_move(98.0); // offset 49 < 50
        drawer.drag_end();
        assert_eq!(drawer.phase(), DrawerPhase::Open);
        assert_eq!(drawer.drag_offset(), 0.0);
    }

    #[test]
    fn test_close_motion_uses_live_offset_and_measured_width() {
        let drawer = setup();
        drawer.open();
        drawer.set_measured_width(280.0);

        drawer.drag_start(0.0);
        drawer.drag_move(120.0); // offset 60
        drawer.drag_end();

        assert_eq!(drawer.close_motion(), Some((60.0, 280.0)));
        advance(2 * LEG);
        assert_eq!(drawer.close_motion(), None);
    }

    #[test]
    fn test_close_falls_back_without_measurement() {
        let drawer = setup();
        drawer.open();
        drawer.close();

        let (from, to) = drawer.close_motion().unwrap();
        assert_eq!(from, 0.0);
        assert_eq!(to, DrawerProps::default().fallback_width);

        advance(2 * LEG);
        assert!(!drawer.is_open()); // close proceeds regardless
    }

    #[test]
    fn test_drag_without_open_is_ignored() {
        let drawer = setup();
        drawer.drag_start(0.0);
        drawer.drag_move(100.0);
        assert_eq!(drawer.drag_offset(), 0.0);
        drawer.drag_end();
        assert_eq!(drawer.phase(), DrawerPhase::Closed);
    }

    #[test]
    fn test_drag_move_without_start_is_ignored() {
        let drawer = setup();
        drawer.open();
        drawer.drag_move(100.0);
        assert_eq!(drawer.drag_offset(), 0.0);
    }

    #[test]
    fn test_drag_during_closing_is_ignored() {
        let drawer = setup();
        drawer.open();
        drawer.drag_start(0.0);
        drawer.drag_move(102.0);
        drawer.drag_end();
        assert_eq!(drawer.phase(), DrawerPhase::Closing);
        let frozen = drawer.drag_offset();

        drawer.drag_start(0.0);
        drawer.drag_move(400.0);
        assert_eq!(drawer.drag_offset(), frozen);
    }

    #[test]
    fn test_teardown_interrupts_close() {
        let drawer = setup();
        drawer.open();
        drawer.close();
        drawer.teardown();

        advance(10_000);
        assert_eq!(drawer.phase(), DrawerPhase::Closing); // frozen, never committed
        assert!(drawer.is_open());
        assert_eq!(pending_timers(), 0);
    }

    #[test]
    fn test_regrab_mid_return_does_not_jump() {
        let drawer = setup();
        drawer.open();

        drawer.drag_start(0.0);
        drawer.drag_move(60.0); // offset 30
        drawer.drag_end(); // springs back... but re-grab first
        assert_eq!(drawer.drag_offset(), 0.0);

        drawer.drag_start(500.0);
        drawer.drag_move(500.0);
        assert_eq!(drawer.drag_offset(), 0.0); // no jump from the stale base
    }
}
