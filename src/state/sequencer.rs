//! Reveal Sequencer - intro count-up and completion flags
//!
//! Drives the intro animation: a count that runs 1 → 147 on a tick whose
//! period shrinks as the count grows, then three staggered one-shots that
//! set the reveal flags gating the dependent visual transitions.
//!
//! # Tick model
//!
//! The tick is an explicitly re-armed one-shot, not an interval: each arm
//! call receives the previous count by value and computes its own period
//! from it. No closure ever reads mutable count state, so a stale callback
//! from a torn-down sequencer cannot race a remounted one.
//!
//! # Example
//!
//! ```ignore
//! use curtain::state::{sequencer::RevealSequencer, timers};
//!
//! let seq = RevealSequencer::new();
//! seq.start();
//! timers::advance(100_000); // run the whole intro
//! assert_eq!(seq.count(), 147);
//! assert!(seq.rotation_revealed());
//! ```

use std::cell::Cell;

use spark_signals::{signal, Signal};

use crate::state::timers::TimerScope;
use crate::types::RevealFlags;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Final value of the count-up. The tick chain halts here permanently.
pub const COUNT_TARGET: u32 = 147;

/// Numerator of the tick-period curve.
pub const TICK_NUMERATOR: u64 = 2000;

/// Divisor offset of the tick-period curve.
pub const TICK_DIVISOR_OFFSET: u64 = 20;

/// Delay from count completion to the inner-circle reveal.
pub const INNER_REVEAL_DELAY: u64 = 300;

/// Delay from count completion to the outer-circle reveal.
pub const OUTER_REVEAL_DELAY: u64 = 500;

/// Delay from count completion to the rotating-ring reveal.
pub const ROTATION_REVEAL_DELAY: u64 = 700;

/// Tick period at the given count: `2000 / (count + 20)` time units.
///
/// The period shrinks as the count rises, so the count-up accelerates.
pub fn tick_period(count: u32) -> u64 {
    TICK_NUMERATOR / (count as u64 + TICK_DIVISOR_OFFSET)
}

// =============================================================================
// SEQUENCER
// =============================================================================

/// Owns the intro count and the three reveal flags.
///
/// The count is monotonically non-decreasing until it reaches
/// [`COUNT_TARGET`], then frozen. Flags are set in the fixed order
/// inner → outer → rotation, each exactly once, never reset.
pub struct RevealSequencer {
    count: Signal<u32>,
    flags: Signal<RevealFlags>,
    timers: TimerScope,
    started: Cell<bool>,
}

impl RevealSequencer {
    pub fn new() -> Self {
        Self {
            count: signal(1),
            flags: signal(RevealFlags::NONE),
            timers: TimerScope::new(),
            started: Cell::new(false),
        }
    }

    /// Begin the count-up. Idempotent; a no-op after [`teardown`].
    ///
    /// [`teardown`]: RevealSequencer::teardown
    pub fn start(&self) {
        if self.started.replace(true) {
            return;
        }
        arm_tick(
            self.count.clone(),
            self.flags.clone(),
            self.timers.clone(),
            self.count.get(),
        );
    }

    /// Cancel the tick chain and any pending reveal timers.
    ///
    /// After teardown no count increment and no flag set can ever happen.
    pub fn teardown(&self) {
        self.timers.dispose();
    }

    // =========================================================================
    // STATE ACCESS
    // =========================================================================

    /// Current count value.
    pub fn count(&self) -> u32 {
        self.count.get()
    }

    /// Count signal, for reactive consumers.
    pub fn count_signal(&self) -> Signal<u32> {
        self.count.clone()
    }

    /// Whether the inner-circle reveal has fired.
    pub fn inner_revealed(&self) -> bool {
        self.flags.get().contains(RevealFlags::INNER)
    }

    /// Whether the outer-circle reveal has fired.
    pub fn outer_revealed(&self) -> bool {
        self.flags.get().contains(RevealFlags::OUTER)
    }

    /// Whether the rotating-ring reveal has fired.
    ///
    /// This is the "intro finished" flag the presentation layer gates
    /// header/footer entry animations on.
    pub fn rotation_revealed(&self) -> bool {
        self.flags.get().contains(RevealFlags::ROTATION)
    }

    /// Reveal flag signal, for reactive consumers.
    pub fn flags_signal(&self) -> Signal<RevealFlags> {
        self.flags.clone()
    }
}

impl Default for RevealSequencer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TICK CHAIN
// =============================================================================

/// Arm the next tick from the given previous count.
///
/// The previous count is passed by value; the scheduled callback derives
/// both the next value and, via the recursive arm call, the next period from
/// it alone.
fn arm_tick(count: Signal<u32>, flags: Signal<RevealFlags>, timers: TimerScope, prev: u32) {
    if prev >= COUNT_TARGET {
        return;
    }
    let delay = tick_period(prev);
    let scope = timers.clone();
    timers.timeout(delay, move || {
        let next = prev + 1;
        count.set(next);
        if next == COUNT_TARGET {
            // Transition into the target: arm the reveal chain exactly once.
            arm_reveals(flags, scope);
        } else {
            arm_tick(count, flags, scope, next);
        }
    });
}

/// Arm the three reveal one-shots, offset from the moment the count
/// completed.
fn arm_reveals(flags: Signal<RevealFlags>, timers: TimerScope) {
    let f = flags.clone();
    timers.timeout(INNER_REVEAL_DELAY, move || {
        f.set(f.get() | RevealFlags::INNER);
    });
    let f = flags.clone();
    timers.timeout(OUTER_REVEAL_DELAY, move || {
        f.set(f.get() | RevealFlags::OUTER);
    });
    timers.timeout(ROTATION_REVEAL_DELAY, move || {
        flags.set(flags.get() | RevealFlags::ROTATION);
    });
}

// =============================================================================
// TESTS
// =============================================================================
