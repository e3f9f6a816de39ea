// lifecycle.rs - Ownership of per-frame callbacks and page subscriptions
//
// The browser hands out animation-frame ids and listener registrations;
// these types own them and give them back. A `Ticker` re-requests a frame
// after every step and cancels the pending one when stopped or dropped.
// A `Subscription` detaches its binding exactly once.

use std::cell::{Cell, RefCell};

use crate::error::Result;

/// Source of animation frames. The implementation arranges for
/// `Ticker::fire` to be called once per granted request.
pub trait Scheduler {
    fn request(&self) -> Result<i32>;
    fn cancel(&self, id: i32);
}

type Step = Box<dyn FnMut(f64)>;

pub struct Ticker<S: Scheduler> {
    scheduler: S,
    pending: Cell<Option<i32>>,
    step: RefCell<Option<Step>>,
}

impl<S: Scheduler> Ticker<S> {
    pub fn new(scheduler: S, step: impl FnMut(f64) + 'static) -> Self {
        Self {
            scheduler,
            pending: Cell::new(None),
            step: RefCell::new(Some(Box::new(step))),
        }
    }

    /// Request the first frame
    pub fn start(&self) -> Result<()> {
        let id = self.scheduler.request()?;
        self.pending.set(Some(id));
        Ok(())
    }

    /// Run one step at timestamp `now` (ms) and request the next frame.
    /// A stopped ticker ignores late frames.
    pub fn fire(&self, now: f64) {
        self.pending.set(None);
        {
            let mut slot = self.step.borrow_mut();
            let Some(step) = slot.as_mut() else { return };
            step(now);
        }
        if let Err(e) = self.start() {
            log::warn!("{e}, animation stopped");
        }
    }

    /// Cancel the pending frame and release the step
    pub fn stop(&self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }
        self.step.borrow_mut().take();
    }

    pub fn is_running(&self) -> bool {
        self.step.borrow().is_some()
    }

    pub fn pending(&self) -> Option<i32> {
        self.pending.get()
    }
}

impl<S: Scheduler> Drop for Ticker<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Something registered with the page that must be undone
pub trait Detach {
    fn detach(&self);
}

pub struct Subscription<D: Detach> {
    binding: Option<D>,
}

impl<D: Detach> Subscription<D> {
    pub fn new(binding: D) -> Self {
        Self { binding: Some(binding) }
    }

    /// Detach now. Later calls and the eventual drop do nothing.
    pub fn release(&mut self) {
        if let Some(binding) = self.binding.take() {
            binding.detach();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.binding.is_some()
    }
}

impl<D: Detach> Drop for Subscription<D> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::rc::Rc;

    #[derive(Default)]
    struct Frames {
        next: Cell<i32>,
        requested: RefCell<Vec<i32>>,
        cancelled: RefCell<Vec<i32>>,
        refuse: Cell<bool>,
    }

    struct Manual(Rc<Frames>);

    impl Scheduler for Manual {
        fn request(&self) -> Result<i32> {
            if self.0.refuse.get() {
                return Err(Error::SurfaceUnavailable("requestAnimationFrame"));
            }
            let id = self.0.next.get() + 1;
            self.0.next.set(id);
            self.0.requested.borrow_mut().push(id);
            Ok(id)
        }

        fn cancel(&self, id: i32) {
            self.0.cancelled.borrow_mut().push(id);
        }
    }

    fn counting() -> (Rc<Frames>, Rc<Cell<u32>>, Ticker<Manual>) {
        let frames = Rc::new(Frames::default());
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let ticker = Ticker::new(Manual(frames.clone()), move |_| c.set(c.get() + 1));
        (frames, count, ticker)
    }

    #[test]
    fn each_frame_requests_the_next() {
        let (frames, count, ticker) = counting();
        ticker.start().unwrap();
        for i in 0..3 {
            ticker.fire(i as f64 * 16.0);
        }
        assert_eq!(count.get(), 3);
        assert_eq!(*frames.requested.borrow(), [1, 2, 3, 4]);
        assert_eq!(ticker.pending(), Some(4));
    }

    #[test]
    fn drop_cancels_pending_frame_and_releases_step() {
        let frames = Rc::new(Frames::default());
        let owned = Rc::new(());
        let held = owned.clone();
        let ticker = Ticker::new(Manual(frames.clone()), move |_| {
            let _ = &held;
        });
        ticker.start().unwrap();
        ticker.fire(0.0);
        assert_eq!(Rc::strong_count(&owned), 2);

        drop(ticker);
        assert_eq!(*frames.cancelled.borrow(), [2]);
        assert_eq!(Rc::strong_count(&owned), 1);
    }

    #[test]
    fn stopped_ticker_stops_counting() {
        let (frames, count, ticker) = counting();
        ticker.start().unwrap();
        ticker.fire(0.0);
        ticker.stop();
        assert!(!ticker.is_running());

        // a frame the browser had already queued
        ticker.fire(16.0);
        ticker.fire(32.0);
        assert_eq!(count.get(), 1);
        assert_eq!(frames.requested.borrow().len(), 2);
        assert_eq!(ticker.pending(), None);
    }

    #[test]
    fn refused_request_ends_the_loop() {
        let (frames, count, ticker) = counting();
        ticker.start().unwrap();
        frames.refuse.set(true);
        ticker.fire(0.0);
        assert_eq!(count.get(), 1);
        assert_eq!(ticker.pending(), None);

        drop(ticker);
        assert!(frames.cancelled.borrow().is_empty());
    }

    struct Listener(Rc<Cell<u32>>);

    impl Detach for Listener {
        fn detach(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn subscription_detaches_on_drop() {
        let detached = Rc::new(Cell::new(0));
        let sub = Subscription::new(Listener(detached.clone()));
        assert!(sub.is_attached());
        drop(sub);
        assert_eq!(detached.get(), 1);
    }

    #[test]
    fn early_release_detaches_once() {
        let detached = Rc::new(Cell::new(0));
        let mut sub = Subscription::new(Listener(detached.clone()));
        sub.release();
        sub.release();
        assert!(!sub.is_attached());
        drop(sub);
        assert_eq!(detached.get(), 1);
    }
}
