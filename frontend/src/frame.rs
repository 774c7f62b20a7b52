use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::Window;

use crate::dom;

/// The `ticking` flag of one scroll-driven concern. Set when a frame is
/// requested, cleared when that frame runs; requests in between are dropped.
#[derive(Debug, Default)]
pub struct FrameGate {
    ticking: bool,
}

impl FrameGate {
    pub fn try_begin(&mut self) -> bool {
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    pub fn finish(&mut self) {
        self.ticking = false;
    }
}

/// Coalesces high-frequency events into at most one task per rendered frame.
///
/// With a delay the frame is requested from a timer instead, which caps the
/// rate at roughly one task per `delay_ms`.
pub struct FrameScheduler {
    window: Window,
    gate: Rc<RefCell<FrameGate>>,
    delay_ms: Option<u32>,
    pending: RefCell<Option<Timeout>>,
}

impl FrameScheduler {
    pub fn new(window: Window, delay_ms: Option<u32>) -> Self {
        Self {
            window,
            gate: Rc::new(RefCell::new(FrameGate::default())),
            delay_ms,
            pending: RefCell::new(None),
        }
    }

    /// Returns `false` when a frame for this concern is already pending and
    /// `task` was discarded.
    pub fn schedule<F>(&self, task: F) -> bool
    where
        F: FnOnce() + 'static,
    {
        if !self.gate.borrow_mut().try_begin() {
            return false;
        }

        let gate = self.gate.clone();
        let run = move || {
            gate.borrow_mut().finish();
            task();
        };

        match self.delay_ms {
            Some(delay) => {
                let window = self.window.clone();
                let timer = Timeout::new(delay, move || dom::request_frame(&window, run));
                *self.pending.borrow_mut() = Some(timer);
            }
            None => dom::request_frame(&self.window, run),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_first_request_per_frame_passes() {
        let mut gate = FrameGate::default();
        assert!(gate.try_begin());
        assert!(!gate.try_begin());
        assert!(!gate.try_begin());

        gate.finish();
        assert!(gate.try_begin());
        assert!(!gate.try_begin());
    }
}
