//! Home Screen - component composition and wiring
//!
//! Builds the screen's interaction state as one unit: pointer context,
//! reveal sequencer, drawer controller, swipe detector and line pulse.
//! Wiring order matters: the drawer and reveal states exist before the
//! pulse is reachable, mirroring the screen's mount order.
//!
//! # Example
//!
//! ```ignore
//! use curtain::screen::HomeScreen;
//! use curtain::state::timers;
//!
//! let screen = HomeScreen::mount();
//! timers::advance(100_000); // intro runs
//! assert!(screen.sequencer().rotation_revealed());
//!
//! // A leftward swipe opens the drawer
//! screen.pointer_down(100.0, curtain::PointerKind::Touch);
//! screen.pointer_up(70.0, curtain::PointerKind::Touch);
//! assert!(screen.drawer().is_open());
//!
//! screen.unmount();
//! ```

use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::state::drawer::{DrawerController, DrawerProps};
use crate::state::pointer::PointerContext;
use crate::state::pulse::LineHeightPulse;
use crate::state::sequencer::RevealSequencer;
use crate::state::swipe::SwipeDetector;
use crate::state::timers::TimerScope;
use crate::types::PointerKind;

/// Delay between the footer seed line's entry animation settling and the
/// line being retired.
pub const INTRO_LINE_RETIRE_DELAY: u64 = 1000;

/// The screen's interaction state, composed and wired.
pub struct HomeScreen {
    pointer: Rc<PointerContext>,
    sequencer: RevealSequencer,
    drawer: Rc<DrawerController>,
    swipe: SwipeDetector,
    pulse: LineHeightPulse,
    intro_line_done: Signal<bool>,
    timers: TimerScope,
}

impl HomeScreen {
    /// Build the screen and start the intro sequence.
    pub fn mount() -> Self {
        Self::mount_with(DrawerProps::default())
    }

    /// Build the screen with custom drawer behavior.
    pub fn mount_with(drawer_props: DrawerProps) -> Self {
        let pointer = Rc::new(PointerContext::new());
        let sequencer = RevealSequencer::new();
        let drawer = Rc::new(DrawerController::new(drawer_props));

        // Swipe intent and the menu button both feed the same controller.
        let drawer_for_intent = Rc::clone(&drawer);
        let swipe = SwipeDetector::new(
            drawer.open_signal(),
            Rc::new(move || drawer_for_intent.open()),
        );

        // The pulse is wired last, once the drawer/reveal states exist.
        let pulse = LineHeightPulse::new();

        sequencer.start();

        Self {
            pointer,
            sequencer,
            drawer,
            swipe,
            pulse,
            intro_line_done: signal(false),
            timers: TimerScope::new(),
        }
    }

    // =========================================================================
    // WIRED EVENTS
    // =========================================================================

    /// The hamburger button: toggles the drawer.
    pub fn menu_button_pressed(&self) {
        self.drawer.toggle();
    }

    /// A click on the open drawer's overlay. Clicks landing on the panel
    /// are consumed there and never reach the backdrop's close handler.
    pub fn overlay_click(&self, hit_panel: bool) {
        if !hit_panel {
            self.drawer.close();
        }
    }

    /// Document-level pointer press. Touch presses feed the swipe detector.
    pub fn pointer_down(&self, x: f32, kind: PointerKind) {
        if kind == PointerKind::Touch {
            self.swipe.on_touch_start(x);
        }
    }

    /// Document-level pointer release, matching [`pointer_down`].
    ///
    /// [`pointer_down`]: HomeScreen::pointer_down
    pub fn pointer_up(&self, x: f32, kind: PointerKind) {
        if kind == PointerKind::Touch {
            self.swipe.on_touch_end(x);
        }
    }

    /// The footer seed line's entry animation settled; the line retires
    /// [`INTRO_LINE_RETIRE_DELAY`] later and the pulse-driven line takes
    /// over for good.
    pub fn entry_line_settled(&self) {
        if self.intro_line_done.get() {
            return;
        }
        let flag = self.intro_line_done.clone();
        self.timers.timeout(INTRO_LINE_RETIRE_DELAY, move || {
            flag.set(true);
        });
    }

    // =========================================================================
    // STATE ACCESS
    // =========================================================================

    pub fn pointer(&self) -> &PointerContext {
        &self.pointer
    }

    /// Pointer context handle for components that keep their own reference.
    pub fn pointer_handle(&self) -> Rc<PointerContext> {
        Rc::clone(&self.pointer)
    }

    pub fn sequencer(&self) -> &RevealSequencer {
        &self.sequencer
    }

    pub fn drawer(&self) -> &DrawerController {
        &self.drawer
    }

    pub fn swipe(&self) -> &SwipeDetector {
        &self.swipe
    }

    pub fn pulse(&self) -> &LineHeightPulse {
        &self.pulse
    }

    /// Whether the footer's one-shot seed line has been retired.
    pub fn intro_line_done(&self) -> bool {
        self.intro_line_done.get()
    }

    /// Seed-line flag signal, for reactive consumers.
    pub fn intro_line_done_signal(&self) -> Signal<bool> {
        self.intro_line_done.clone()
    }

    /// Tear down every component; no timer owned by this screen fires
    /// afterwards.
    pub fn unmount(self) {
        self.sequencer.teardown();
        self.drawer.teardown();
        self.pulse.teardown();
        self.timers.dispose();
    }
}

// =============================================================================
// TESTS
// =============================================================================
