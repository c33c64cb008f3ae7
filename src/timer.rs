//! Cancellable countdown timer
//!
//! This module provides the cooperative countdown used while a question is
//! open. The host event loop drives [`Countdown::tick`] once per logical
//! second; the countdown reports progress through its callbacks and fires
//! the expiry callback at most once. A [`CancelHandle`] stops the countdown
//! from the outside; cancelling after expiry is a no-op.
//!
//! The model is single-threaded and event-driven: there is no background
//! thread, and a cancelled countdown never fires again.

use std::{cell::Cell, rc::Rc, time::Duration};

use crate::constants;

/// Handle for cancelling a running countdown
///
/// Cloning the handle is cheap; every clone cancels the same countdown.
/// Cancelling an already-expired or already-cancelled countdown does
/// nothing.
#[derive(Clone)]
pub struct CancelHandle {
    cancelled: Rc<Cell<bool>>,
}

impl CancelHandle {
    /// Stops the countdown; subsequent ticks become no-ops
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }
}

/// A cooperative countdown over whole seconds
///
/// Created by [`Countdown::start`]; the owner calls [`Countdown::tick`]
/// once per second until it returns `false`.
pub struct Countdown {
    duration: u64,
    remaining: u64,
    expired: bool,
    cancelled: Rc<Cell<bool>>,
    on_tick: Box<dyn FnMut(u64, bool)>,
    on_expire: Option<Box<dyn FnOnce()>>,
}

impl Countdown {
    /// Starts a countdown and returns it with its cancel handle
    ///
    /// Sub-second fractions of `duration` are discarded; the countdown
    /// expires on the tick that would pass zero, so a countdown of `n`
    /// seconds fires `on_expire` on the `n`-th tick.
    ///
    /// # Arguments
    ///
    /// * `duration` - how long the countdown runs
    /// * `on_tick` - called each counted second with `(remaining, warning)`,
    ///   where `warning` is set within the final
    ///   [`WARNING_SECONDS`](constants::timer::WARNING_SECONDS)
    /// * `on_expire` - called exactly once when the countdown reaches zero,
    ///   never after cancellation
    pub fn start(
        duration: Duration,
        on_tick: impl FnMut(u64, bool) + 'static,
        on_expire: impl FnOnce() + 'static,
    ) -> (Self, CancelHandle) {
        let cancelled = Rc::new(Cell::new(false));
        let handle = CancelHandle {
            cancelled: Rc::clone(&cancelled),
        };
        let secs = duration.as_secs();
        (
            Self {
                duration: secs,
                remaining: secs,
                expired: false,
                cancelled,
                on_tick: Box::new(on_tick),
                on_expire: Some(Box::new(on_expire)),
            },
            handle,
        )
    }

    /// Starts a countdown with the default duration
    ///
    /// Equivalent to [`Countdown::start`] with
    /// [`DEFAULT_TIME_LIMIT`](constants::timer::DEFAULT_TIME_LIMIT).
    pub fn start_default(
        on_tick: impl FnMut(u64, bool) + 'static,
        on_expire: impl FnOnce() + 'static,
    ) -> (Self, CancelHandle) {
        Self::start(
            Duration::from_secs(constants::timer::DEFAULT_TIME_LIMIT),
            on_tick,
            on_expire,
        )
    }

    /// Advances the countdown by one second
    ///
    /// Returns `true` while the countdown keeps running. Once expired or
    /// cancelled, further ticks do nothing and return `false`; the expiry
    /// callback cannot fire twice.
    pub fn tick(&mut self) -> bool {
        if self.expired || self.cancelled.get() {
            return false;
        }

        if self.remaining <= 1 {
            self.remaining = 0;
            self.expired = true;
            if let Some(on_expire) = self.on_expire.take() {
                on_expire();
            }
            return false;
        }

        self.remaining -= 1;
        let warning = self.remaining <= constants::timer::WARNING_SECONDS;
        (self.on_tick)(self.remaining, warning);
        true
    }

    /// Re-arms the countdown back to its full duration
    ///
    /// Only a countdown that has neither expired nor been cancelled can be
    /// re-armed: the expiry callback is consumed on first fire, so a timer
    /// past its terminal state stays there.
    pub fn reset(&mut self) {
        if !self.expired && !self.cancelled.get() {
            self.remaining = self.duration;
        }
    }

    /// Seconds left on the countdown
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Whether the countdown has reached zero
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Whether the countdown was cancelled before expiring
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}
