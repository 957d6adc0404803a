//! Core Types - shared vocabulary for the interaction engine.
//!
//! Small types used across component boundaries live here. Types that only
//! one component exposes (drawer phase, height level, pointer style) stay in
//! their own modules.

// =============================================================================
// POINTER INPUT
// =============================================================================

/// Class of pointer input that produced an event.
///
/// Touch and mouse are mutually exclusive input modes for the pulse
/// component: once a touch event is seen, mouse events are ignored for the
/// rest of that component's life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

// =============================================================================
// REVEAL FLAGS
// =============================================================================

bitflags::bitflags! {
    /// Reveal-completion flags as a bitfield.
    ///
    /// Each flag gates a dependent visual transition and is only ever OR-ed
    /// in, never cleared. Combine with bitwise OR:
    /// `RevealFlags::INNER | RevealFlags::OUTER`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct RevealFlags: u8 {
        const NONE = 0;
        /// Inner circle shadow reveal.
        const INNER = 1 << 0;
        /// Outer circle shadow reveal.
        const OUTER = 1 << 1;
        /// Rotating ring reveal. Doubles as the "intro finished" gate for
        /// header/footer entry animations.
        const ROTATION = 1 << 2;
    }
}
