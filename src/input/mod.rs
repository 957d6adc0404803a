//! Input Module - Terminal event adapter
//!
//! Bridges crossterm's event system with the screen's gesture entry points.
//! Terminal mouse presses stand in for touch gestures: a left-button
//! down/up pair is a touch-start/touch-end, and drags while the drawer is
//! open drive its drag session. The state modules stay platform-free; this
//! module only translates and routes.
//!
//! # Example
//!
//! ```ignore
//! use curtain::input::route_event;
//! use curtain::screen::HomeScreen;
//! use crossterm::event::read;
//!
//! let screen = HomeScreen::mount();
//! loop {
//!     if let Ok(event) = read() {
//!         route_event(&screen, &event);
//!     }
//! }
//! ```

use crossterm::event::{
    Event as CrosstermEvent, MouseButton as CrosstermMouseButton,
    MouseEvent as CrosstermMouseEvent, MouseEventKind,
};

use crate::screen::HomeScreen;
use crate::types::PointerKind;

/// Dispatch a crossterm event onto the screen. Unhandled event types are
/// ignored.
pub fn route_event(screen: &HomeScreen, event: &CrosstermEvent) {
    match event {
        CrosstermEvent::Mouse(mouse) => route_mouse_event(screen, mouse),
        CrosstermEvent::Resize(width, _) => screen.pointer().set_viewport_width(*width),
        _ => {}
    }
}

/// Route a mouse event as a touch gesture.
pub fn route_mouse_event(screen: &HomeScreen, event: &CrosstermMouseEvent) {
    let x = event.column as f32;
    match event.kind {
        MouseEventKind::Down(CrosstermMouseButton::Left) => {
            screen.pointer_down(x, PointerKind::Touch);
            if screen.drawer().is_open() {
                screen.drawer().drag_start(x);
            }
        }
        MouseEventKind::Drag(CrosstermMouseButton::Left) => {
            screen.drawer().drag_move(x);
        }
        MouseEventKind::Up(CrosstermMouseButton::Left) => {
            screen.drawer().drag_end();
            screen.pointer_up(x, PointerKind::Touch);
        }
        _ => {}
    }
}

// =============================================================================
// TESTS
// =============================================================================
