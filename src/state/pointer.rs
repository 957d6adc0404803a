//! Pointer Context - shared pointer-appearance store
//!
//! One store per screen for the custom pointer indicator: which glyph it
//! shows (hover pass-throughs flip it) and whether it renders at all
//! (viewport wide enough, fine-pointer device). Created at screen mount,
//! passed by reference to whoever needs it, torn down with the screen.

use std::cell::Cell;

use spark_signals::{signal, Signal};

/// Narrowest viewport at which the custom pointer indicator is shown.
pub const MIN_POINTER_VIEWPORT: u16 = 640;

/// Appearance of the pointer indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerStyle {
    #[default]
    Default,
    /// Shown while hovering an interactive element.
    Pointer,
}

pub struct PointerContext {
    style: Signal<PointerStyle>,
    visible: Signal<bool>,
    viewport_width: Cell<u16>,
    coarse_input: Cell<bool>,
}

impl PointerContext {
    /// Starts visible with the default style; visibility is recomputed once
    /// the host reports a viewport width.
    pub fn new() -> Self {
        Self {
            style: signal(PointerStyle::Default),
            visible: signal(true),
            viewport_width: Cell::new(0),
            coarse_input: Cell::new(false),
        }
    }

    /// Hover entered an interactive element.
    pub fn pointer_over(&self) {
        self.style.set(PointerStyle::Pointer);
    }

    /// Hover left an interactive element.
    pub fn pointer_out(&self) {
        self.style.set(PointerStyle::Default);
    }

    /// Report the viewport width; recomputes visibility.
    pub fn set_viewport_width(&self, width: u16) {
        self.viewport_width.set(width);
        self.recompute();
    }

    /// Mark the device as coarse-input (touch); hides the indicator.
    pub fn set_coarse_input(&self, coarse: bool) {
        self.coarse_input.set(coarse);
        self.recompute();
    }

    /// Current indicator style.
    pub fn style(&self) -> PointerStyle {
        self.style.get()
    }

    /// Style signal, for reactive consumers.
    pub fn style_signal(&self) -> Signal<PointerStyle> {
        self.style.clone()
    }

    /// Whether the indicator should render.
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Visibility signal, for reactive consumers.
    pub fn visible_signal(&self) -> Signal<bool> {
        self.visible.clone()
    }

    fn recompute(&self) {
        let wide_enough = self.viewport_width.get() > MIN_POINTER_VIEWPORT;
        self.visible.set(wide_enough && !self.coarse_input.get());
    }
}

impl Default for PointerContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_flips_style() {
        let ctx = PointerContext::new();
        assert_eq!(ctx.style(), PointerStyle::Default);

        ctx.pointer_over();
        assert_eq!(ctx.style(), PointerStyle::Pointer);

        ctx.pointer_out();
        assert_eq!(ctx.style(), PointerStyle::Default);
    }

    #[test]
    fn test_visibility_follows_viewport_width() {
        let ctx = PointerContext::new();
        assert!(ctx.is_visible()); // visible until told otherwise

        ctx.set_viewport_width(800);
        assert!(ctx.is_visible());

        ctx.set_viewport_width(600);
        assert!(!ctx.is_visible());

        ctx.set_viewport_width(640); // boundary is exclusive
        assert!(!ctx.is_visible());
    }

    #[test]
    fn test_coarse_input_hides_at_any_width() {
        let ctx = PointerContext::new();
        ctx.set_coarse_input(true);
        ctx.set_viewport_width(1920);
        assert!(!ctx.is_visible());

        ctx.set_coarse_input(false);
        assert!(ctx.is_visible());
    }
}
