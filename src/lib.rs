//! # curtain
//!
//! Reactive intro-reveal and drawer interaction engine.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity.
//!
//! ## Architecture
//!
//! The engine owns interaction *state*, never presentation. Every externally
//! visible value is a signal the presentation layer reads; every input is an
//! event fed in by the host. Timing runs on a thread-local virtual-clock
//! timer wheel the host pumps:
//!
//! ```text
//! host events → gesture routing → component signals → presentation reads
//!                                        ↑
//!                       timers::advance(Δ) fires due timers
//! ```
//!
//! Three stateful components make up the screen: the reveal sequencer (a
//! decelerating count-up that unlocks staggered reveal flags), the line
//! pulse (transient press feedback with touch/mouse exclusivity), and the
//! drawer controller (an off-canvas panel with swipe-to-open, elastic drag
//! and a two-phase animated close).
//!
//! ## Modules
//!
//! - [`types`] - Shared types (PointerKind, RevealFlags)
//! - [`state`] - Timers, sequencer, pulse, swipe, drawer, pointer store
//! - [`screen`] - Screen composition and wiring
//! - [`input`] - Terminal event adapter (crossterm)

pub mod input;
pub mod screen;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::{PointerKind, RevealFlags};

pub use state::timers::{
    advance, clear_timer, now, pending_timers, reset_timer_state, set_interval, set_timeout,
    TimerId, TimerScope,
};

pub use state::sequencer::{
    tick_period, RevealSequencer, COUNT_TARGET, INNER_REVEAL_DELAY, OUTER_REVEAL_DELAY,
    ROTATION_REVEAL_DELAY,
};

pub use state::pulse::{HeightLevel, LineHeightPulse, REVERT_DELAY, TAP_STAGE_DELAY};

pub use state::swipe::{SwipeDetector, SWIPE_THRESHOLD};

pub use state::drawer::{DrawerController, DrawerPhase, DrawerProps};

pub use state::pointer::{PointerContext, PointerStyle, MIN_POINTER_VIEWPORT};

pub use screen::{HomeScreen, INTRO_LINE_RETIRE_DELAY};

pub use input::{route_event, route_mouse_event};
