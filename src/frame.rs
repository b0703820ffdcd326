//! Single-slot "next frame" scheduling.
//!
//! Both gesture controllers defer their expensive work to the next frame and
//! never keep more than one such request outstanding. [`FrameScheduler`] is
//! that single slot: a second [`request`](FrameScheduler::request) while one
//! is pending is refused, and [`cancel`](FrameScheduler::cancel) drops the
//! pending callback without running it.

use crate::config::InteractionConfig;
use slint::{Timer, TimerMode};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// A frame callback
pub type FrameCallback = Box<dyn FnOnce()>;

/// Schedules at most one callback for the next frame.
pub trait FrameScheduler {
    /// Schedule `callback` for the next frame.
    ///
    /// Returns `false` (and drops `callback`) if a callback is already pending.
    fn request(&self, callback: FrameCallback) -> bool;

    /// Drop the pending callback, if any, without running it
    fn cancel(&self);

    fn is_pending(&self) -> bool;
}

/// [`FrameScheduler`] backed by a single-shot [`slint::Timer`].
///
/// Needs a running Slint event loop (or the testing backend).
pub struct SlintFrameTimer {
    timer: Timer,
    interval: Duration,
    pending: Rc<Cell<bool>>,
}

impl SlintFrameTimer {
    pub fn new(interval: Duration) -> Self {
        Self { timer: Timer::default(), interval, pending: Rc::new(Cell::new(false)) }
    }

    /// Timer ticking at `config.frame_interval_ms`
    pub fn from_config(config: &InteractionConfig) -> Self {
        Self::new(config.frame_interval())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for SlintFrameTimer {
    fn default() -> Self {
        Self::from_config(&InteractionConfig::default())
    }
}

impl FrameScheduler for SlintFrameTimer {
    fn request(&self, callback: FrameCallback) -> bool {
        if self.pending.get() {
            return false;
        }
        self.pending.set(true);

        let pending = self.pending.clone();
        let mut callback = Some(callback);
        self.timer.start(TimerMode::SingleShot, self.interval, move || {
            pending.set(false);
            if let Some(callback) = callback.take() {
                callback();
            }
        });
        true
    }

    fn cancel(&self) {
        self.timer.stop();
        self.pending.set(false);
    }

    fn is_pending(&self) -> bool {
        self.pending.get()
    }
}

/// [`FrameScheduler`] driven explicitly by the host.
///
/// Call [`run_frame`](Self::run_frame) once per rendered frame, e.g. from a
/// rendering notifier. Clones share the same slot.
#[derive(Clone, Default)]
pub struct ManualFrames {
    slot: Rc<RefCell<Option<FrameCallback>>>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the pending callback. Returns whether one ran.
    pub fn run_frame(&self) -> bool {
        // Take first: the callback may schedule the next frame
        let callback = self.slot.borrow_mut().take();
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

impl FrameScheduler for ManualFrames {
    fn request(&self, callback: FrameCallback) -> bool {
        let mut slot = self.slot.borrow_mut();
        if slot.is_some() {
            return false;
        }
        *slot = Some(callback);
        true
    }

    fn cancel(&self) {
        self.slot.borrow_mut().take();
    }

    fn is_pending(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for Rc<T> {
    fn request(&self, callback: FrameCallback) -> bool {
        (**self).request(callback)
    }

    fn cancel(&self) {
        (**self).cancel()
    }

    fn is_pending(&self) -> bool {
        (**self).is_pending()
    }
}
