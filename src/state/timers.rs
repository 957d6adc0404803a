//! Timer Module - Virtual-clock timer wheel and scoped timers
//!
//! All timing in the engine runs on a single thread-local timer wheel over a
//! virtual clock. The host pumps the wheel with [`advance`]; nothing fires
//! between pumps. This keeps the whole system single-threaded, cooperative
//! and fully deterministic.
//!
//! # API
//!
//! - `set_timeout(delay, f)` - Schedule a one-shot timer
//! - `set_interval(period, f)` - Schedule a repeating timer
//! - `clear_timer(id)` - Cancel a timer
//! - `advance(delta)` - Advance the clock, firing due timers in order
//! - `now()` - Current virtual time
//! - `TimerScope` - Tie timers to a component lifetime
//!
//! # Example
//!
//! ```ignore
//! use curtain::state::timers;
//!
//! let id = timers::set_timeout(300, || println!("fired"));
//! timers::advance(299); // nothing yet
//! timers::advance(1);   // fires
//!
//! // Scoped timers die with their owner
//! let scope = timers::TimerScope::new();
//! scope.timeout(500, || println!("never runs"));
//! scope.dispose();
//! timers::advance(1000);
//! ```
//!
//! # Ordering
//!
//! `advance` fires timers in due-time order, ties in creation order. The
//! clock is moved to each timer's due time before its callback runs, so a
//! callback that schedules a follow-up inside the window (a self-rescheduling
//! tick chain) has that follow-up fire within the same `advance` call.
//! Callbacks run with no internal borrow held; scheduling and cancelling
//! from inside a callback is legal, including a repeating timer cancelling
//! itself.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

// =============================================================================
// TYPES
// =============================================================================

/// Identifier for a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Sentinel id that refers to no timer. Cancelling it is a no-op.
    pub const NONE: TimerId = TimerId(0);

    /// Whether this id refers to an actual scheduled timer.
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

enum Callback {
    Once(Box<dyn FnOnce()>),
    Every(Box<dyn FnMut()>),
}

struct TimerEntry {
    id: TimerId,
    due: u64,
    /// Repeat period; 0 marks a one-shot.
    period: u64,
    cb: Callback,
}

struct Wheel {
    now: u64,
    next_id: u64,
    entries: Vec<TimerEntry>,
}

impl Wheel {
    fn new() -> Self {
        Self {
            now: 0,
            next_id: 1,
            entries: Vec::new(),
        }
    }

    fn alloc_id(&mut self) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        TimerId(id)
    }
}

thread_local! {
    static WHEEL: RefCell<Wheel> = RefCell::new(Wheel::new());
    /// Id of the timer whose callback is currently running, if any.
    static FIRING: Cell<Option<TimerId>> = Cell::new(None);
    /// Set when the currently firing repeating timer cancels itself.
    static FIRING_CANCELLED: Cell<bool> = Cell::new(false);
}

// =============================================================================
// PUBLIC API - SCHEDULING
// =============================================================================

/// Current virtual time.
pub fn now() -> u64 {
    WHEEL.with(|w| w.borrow().now)
}

/// Schedule a one-shot timer `delay` time units from now.
pub fn set_timeout(delay: u64, f: impl FnOnce() + 'static) -> TimerId {
    WHEEL.with(|w| {
        let mut wheel = w.borrow_mut();
        let id = wheel.alloc_id();
        let due = wheel.now + delay;
        wheel.entries.push(TimerEntry {
            id,
            due,
            period: 0,
            cb: Callback::Once(Box::new(f)),
        });
        id
    })
}

/// Schedule a repeating timer firing every `period` time units.
///
/// A period of 0 is treated as 1 so the wheel always makes progress.
pub fn set_interval(period: u64, f: impl FnMut() + 'static) -> TimerId {
    let period = period.max(1);
    WHEEL.with(|w| {
        let mut wheel = w.borrow_mut();
        let id = wheel.alloc_id();
        let due = wheel.now + period;
        wheel.entries.push(TimerEntry {
            id,
            due,
            period,
            cb: Callback::Every(Box::new(f)),
        });
        id
    })
}

/// Cancel a timer. Returns true if the timer was still pending.
///
/// Cancelling [`TimerId::NONE`], an already-fired one-shot, or an unknown id
/// is a no-op. A repeating timer may cancel itself from inside its own
/// callback.
pub fn clear_timer(id: TimerId) -> bool {
    if id.is_none() {
        return false;
    }
    let removed = WHEEL.with(|w| {
        let mut wheel = w.borrow_mut();
        let before = wheel.entries.len();
        wheel.entries.retain(|e| e.id != id);
        before != wheel.entries.len()
    });
    if !removed && FIRING.with(|f| f.get()) == Some(id) {
        // The entry is out of the wheel while its callback runs; flag it so
        // it is not re-armed afterwards.
        FIRING_CANCELLED.with(|f| f.set(true));
        return true;
    }
    removed
}

/// Number of timers currently scheduled.
pub fn pending_timers() -> usize {
    WHEEL.with(|w| w.borrow().entries.len())
}

// =============================================================================
// PUBLIC API - PUMP
// =============================================================================

/// Advance the virtual clock by `delta`, firing every timer that comes due.
///
/// Timers fire in due-time order (ties in creation order). The clock is set
/// to each timer's due time before its callback runs and lands on
/// `now + delta` once no due timers remain.
pub fn advance(delta: u64) {
    let target = WHEEL.with(|w| w.borrow().now + delta);
    loop {
        // Pull the next due entry out of the wheel, releasing the borrow
        // before the callback runs.
        let entry = WHEEL.with(|w| {
            let mut wheel = w.borrow_mut();
            let mut best: Option<usize> = None;
            for (i, e) in wheel.entries.iter().enumerate() {
                if e.due > target {
                    continue;
                }
                match best {
                    Some(b) if wheel.entries[b].due <= e.due => {}
                    _ => best = Some(i),
                }
            }
            match best {
                Some(i) => {
                    let e = wheel.entries.remove(i);
                    wheel.now = e.due;
                    Some(e)
                }
                None => {
                    wheel.now = target;
                    None
                }
            }
        });

        let Some(entry) = entry else { break };
        let TimerEntry { id, due, period, cb } = entry;

        FIRING.with(|f| f.set(Some(id)));
        FIRING_CANCELLED.with(|f| f.set(false));
        let repeat = match cb {
            Callback::Once(f) => {
                f();
                None
            }
            Callback::Every(mut f) => {
                f();
                Some(f)
            }
        };
        let cancelled = FIRING_CANCELLED.with(|f| f.replace(false));
        FIRING.with(|f| f.set(None));

        if let Some(f) = repeat {
            if !cancelled {
                WHEEL.with(|w| {
                    w.borrow_mut().entries.push(TimerEntry {
                        id,
                        due: due + period,
                        period,
                        cb: Callback::Every(f),
                    });
                });
            }
        }
    }
}

/// Reset the wheel to a fresh state (for testing).
///
/// Drops all scheduled timers and rewinds the clock to 0.
pub fn reset_timer_state() {
    WHEEL.with(|w| *w.borrow_mut() = Wheel::new());
    FIRING.with(|f| f.set(None));
    FIRING_CANCELLED.with(|f| f.set(false));
}

// =============================================================================
// TIMER SCOPE
// =============================================================================

struct ScopeInner {
    ids: RefCell<Vec<TimerId>>,
    disposed: Cell<bool>,
}

/// Ties timers to a component lifetime.
///
/// Cheaply clonable; clones share the same scope. `dispose()` cancels every
/// outstanding timer and marks the scope dead: a dead scope schedules
/// nothing, and scope-wrapped callbacks re-check the dead flag before
/// running, so a timer can never mutate state on a torn-down component.
#[derive(Clone)]
pub struct TimerScope {
    inner: Rc<ScopeInner>,
}

impl TimerScope {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ScopeInner {
                ids: RefCell::new(Vec::new()),
                disposed: Cell::new(false),
            }),
        }
    }

    /// Whether this scope has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    /// Schedule a one-shot timer owned by this scope.
    ///
    /// Returns [`TimerId::NONE`] without scheduling if the scope is disposed.
    pub fn timeout(&self, delay: u64, f: impl FnOnce() + 'static) -> TimerId {
        if self.inner.disposed.get() {
            return TimerId::NONE;
        }
        let inner = Rc::clone(&self.inner);
        let slot = Rc::new(Cell::new(TimerId::NONE));
        let slot_in_cb = Rc::clone(&slot);
        let id = set_timeout(delay, move || {
            if inner.disposed.get() {
                return;
            }
            // Fired one-shots no longer need tracking.
            let own_id = slot_in_cb.get();
            inner.ids.borrow_mut().retain(|i| *i != own_id);
            f();
        });
        slot.set(id);
        self.inner.ids.borrow_mut().push(id);
        id
    }

    /// Schedule a repeating timer owned by this scope.
    ///
    /// Returns [`TimerId::NONE`] without scheduling if the scope is disposed.
    pub fn interval(&self, period: u64, mut f: impl FnMut() + 'static) -> TimerId {
        if self.inner.disposed.get() {
            return TimerId::NONE;
        }
        let inner = Rc::clone(&self.inner);
        let id = set_interval(period, move || {
            if inner.disposed.get() {
                return;
            }
            f();
        });
        self.inner.ids.borrow_mut().push(id);
        id
    }

    /// Cancel a single timer owned by this scope.
    pub fn clear(&self, id: TimerId) {
        clear_timer(id);
        self.inner.ids.borrow_mut().retain(|i| *i != id);
    }

    /// Cancel all outstanding timers and mark the scope dead.
    ///
    /// Idempotent. After disposal the scope schedules nothing.
    pub fn dispose(&self) {
        if self.inner.disposed.replace(true) {
            return;
        }
        for id in self.inner.ids.borrow_mut().drain(..) {
            clear_timer(id);
        }
    }
}

impl Default for TimerScope {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
