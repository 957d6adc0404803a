//! State Module - Reactive interaction state systems
//!
//! - **Timers** - virtual-clock timer wheel, scoped cancellation
//! - **Sequencer** - intro count-up and reveal flags
//! - **Pulse** - transient footer-line height feedback
//! - **Swipe** - touch gesture to drawer-open intent
//! - **Drawer** - off-canvas panel state machine
//! - **Pointer** - shared pointer-appearance store

pub mod drawer;
pub mod pointer;
pub mod pulse;
pub mod sequencer;
pub mod swipe;
pub mod timers;
