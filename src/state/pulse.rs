//! Line Height Pulse - transient press feedback for the footer line
//!
//! A small "breathing" value driven by press/release/tap input: the line
//! collapses while pressed, overshoots tall on release, then settles back to
//! idle. Touch takes permanent priority over mouse once seen, which keeps
//! ghost mouse events fired after a touch from double-driving the line.

use std::cell::Cell;

use spark_signals::{signal, Signal};

use crate::state::timers::{TimerId, TimerScope};
use crate::types::PointerKind;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Delay before a released press reverts to the idle height.
pub const REVERT_DELAY: u64 = 300;

/// Per-stage delay of the tap pulse sequence (press, overshoot, idle).
pub const TAP_STAGE_DELAY: u64 = 300;

// =============================================================================
// TYPES
// =============================================================================

/// Visual height of the footer line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeightLevel {
    /// Resting height.
    #[default]
    Idle,
    /// Collapsed while the pointer is held down.
    Pressed,
    /// Tall overshoot right after release, before settling back.
    Overshoot,
}

impl HeightLevel {
    /// Height token as a percentage of the viewport height.
    pub fn height_percent(self) -> u8 {
        match self {
            HeightLevel::Pressed => 5,
            HeightLevel::Idle => 15,
            HeightLevel::Overshoot => 70,
        }
    }
}

// =============================================================================
// PULSE
// =============================================================================

/// Owns the transient height level and the touch-exclusivity flag.
///
/// Every accepted event supersedes the previous one: at most one pending
/// revert/stage timer set is live at a time.
pub struct LineHeightPulse {
    level: Signal<HeightLevel>,
    touch_mode: Cell<bool>,
    timers: TimerScope,
    pending: Cell<TimerId>,
    pending_settle: Cell<TimerId>,
}

impl LineHeightPulse {
    pub fn new() -> Self {
        Self {
            level: signal(HeightLevel::Idle),
            touch_mode: Cell::new(false),
            timers: TimerScope::new(),
            pending: Cell::new(TimerId::NONE),
            pending_settle: Cell::new(TimerId::NONE),
        }
    }

    /// Press began. Collapses the line immediately; no revert is armed until
    /// the matching release.
    pub fn on_press_start(&self, kind: PointerKind) {
        if !self.accepts(kind) {
            return;
        }
        self.clear_pending();
        self.level.set(HeightLevel::Pressed);
    }

    /// Press released. Overshoots tall, then reverts to idle after
    /// [`REVERT_DELAY`].
    pub fn on_press_end(&self, kind: PointerKind) {
        if !self.accepts(kind) {
            return;
        }
        self.clear_pending();
        self.level.set(HeightLevel::Overshoot);
        let level = self.level.clone();
        self.pending.set(self.timers.timeout(REVERT_DELAY, move || {
            level.set(HeightLevel::Idle);
        }));
    }

    /// Tap (the mouse click path). Runs the full three-stage pulse:
    /// collapsed now, overshoot at +[`TAP_STAGE_DELAY`], idle at twice that.
    ///
    /// A touch-originated tap only latches touch mode; the stages never run
    /// in touch mode.
    pub fn on_tap(&self, kind: PointerKind) {
        if kind == PointerKind::Touch {
            self.touch_mode.set(true);
            return;
        }
        if self.touch_mode.get() {
            return;
        }
        self.clear_pending();
        self.level.set(HeightLevel::Pressed);

        let level = self.level.clone();
        self.pending.set(self.timers.timeout(TAP_STAGE_DELAY, move || {
            level.set(HeightLevel::Overshoot);
        }));
        let level = self.level.clone();
        self.pending_settle
            .set(self.timers.timeout(TAP_STAGE_DELAY * 2, move || {
                level.set(HeightLevel::Idle);
            }));
    }

    /// Cancel any pending timers and release the scope.
    pub fn teardown(&self) {
        self.timers.dispose();
    }

    // =========================================================================
    // STATE ACCESS
    // =========================================================================

    /// Current height level.
    pub fn level(&self) -> HeightLevel {
        self.level.get()
    }

    /// Height level signal, for reactive consumers.
    pub fn level_signal(&self) -> Signal<HeightLevel> {
        self.level.clone()
    }

    /// Whether touch mode has latched.
    pub fn using_touch(&self) -> bool {
        self.touch_mode.get()
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    /// Consult the input mode gate; latches touch mode as a side effect.
    fn accepts(&self, kind: PointerKind) -> bool {
        match kind {
            PointerKind::Touch => {
                self.touch_mode.set(true);
                true
            }
            PointerKind::Mouse => !self.touch_mode.get(),
        }
    }

    fn clear_pending(&self) {
        self.timers.clear(self.pending.replace(TimerId::NONE));
        self.timers.clear(self.pending_settle.replace(TimerId::NONE));
    }
}

impl Default for LineHeightPulse {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::timers::{advance, reset_timer_state};

    fn setup() {
        reset_timer_state();
    }

    #[test]
    fn test_press_and_release_cycle() {
        setup();

        let pulse = LineHeightPulse::new();
        assert_eq!(pulse.level(), HeightLevel::Idle);

        pulse.on_press_start(PointerKind::Mouse);
        assert_eq!(pulse.level(), HeightLevel::Pressed);

        // Held presses do not revert on their own.
        advance(10_000);
        assert_eq!(pulse.level(), HeightLevel::Pressed);

        pulse.on_press_end(PointerKind::Mouse);
        assert_eq!(pulse.level(), HeightLevel::Overshoot);

        advance(REVERT_DELAY - 1);
        assert_eq!(pulse.level(), HeightLevel::Overshoot);
        advance(1);
        assert_eq!(pulse.level(), HeightLevel::Idle);
    }

    #[test]
    fn test_tap_three_stage_sequence() {
        setup();

        let pulse = LineHeightPulse::new();
        pulse.on_tap(PointerKind::Mouse);
        assert_eq!(pulse.level(), HeightLevel::Pressed);

        advance(TAP_STAGE_DELAY);
        assert_eq!(pulse.level(), HeightLevel::Overshoot);

        advance(TAP_STAGE_DELAY);
        assert_eq!(pulse.level(), HeightLevel::Idle);
    }

    #[test]
    fn test_touch_latches_and_mouse_is_ignored() {
        setup();

        let pulse = LineHeightPulse::new();
        pulse.on_press_start(PointerKind::Touch);
        assert!(pulse.using_touch());
        assert_eq!(pulse.level(), HeightLevel::Pressed);

        pulse.on_press_end(PointerKind::Touch);
        assert_eq!(pulse.level(), HeightLevel::Overshoot);
        advance(REVERT_DELAY);
        assert_eq!(pulse.level(), HeightLevel::Idle);

        // Ghost mouse events after touch must not move the level.
        pulse.on_press_start(PointerKind::Mouse);
        assert_eq!(pulse.level(), HeightLevel::Idle);
        pulse.on_press_end(PointerKind::Mouse);
        assert_eq!(pulse.level(), HeightLevel::Idle);
        pulse.on_tap(PointerKind::Mouse);
        assert_eq!(pulse.level(), HeightLevel::Idle);
    }

    #[test]
    fn test_touch_tap_only_latches() {
        setup();

        let pulse = LineHeightPulse::new();
        pulse.on_tap(PointerKind::Touch);
        assert!(pulse.using_touch());
        assert_eq!(pulse.level(), HeightLevel::Idle);

        advance(10_000);
        assert_eq!(pulse.level(), HeightLevel::Idle);
    }

    #[test]
    fn test_new_event_supersedes_pending_revert() {
        setup();

        let pulse = LineHeightPulse::new();
        pulse.on_press_end(PointerKind::Mouse);
        assert_eq!(pulse.level(), HeightLevel::Overshoot);

        // A new press lands before the revert; the old revert must not pull
        // the level back to idle underneath it.
        advance(REVERT_DELAY - 1);
        pulse.on_press_start(PointerKind::Mouse);
        advance(REVERT_DELAY);
        assert_eq!(pulse.level(), HeightLevel::Pressed);
    }

    #[test]
    fn test_press_supersedes_tap_stages() {
        setup();

        let pulse = LineHeightPulse::new();
        pulse.on_tap(PointerKind::Mouse);
        advance(TAP_STAGE_DELAY - 1);

        // Interrupt between the tap's stages: both stage timers die.
        pulse.on_press_start(PointerKind::Mouse);
        advance(10_000);
        assert_eq!(pulse.level(), HeightLevel::Pressed);
    }

    #[test]
    fn test_teardown_stops_pending_revert() {
        setup();

        let pulse = LineHeightPulse::new();
        pulse.on_press_end(PointerKind::Mouse);
        pulse.teardown();

        advance(10_000);
        assert_eq!(pulse.level(), HeightLevel::Overshoot); // frozen, never reverted
    }

    #[test]
    fn test_height_tokens() {
        assert_eq!(HeightLevel::Pressed.height_percent(), 5);
        assert_eq!(HeightLevel::Idle.height_percent(), 15);
        assert_eq!(HeightLevel::Overshoot.height_percent(), 70);
    }
}
