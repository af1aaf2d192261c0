//! Trailing-edge debounce primitive.
//!
//! A value pushed into the [`Debouncer`] is committed to its receiver once
//! the configured window passes without another push. Every push cancels the
//! previously scheduled commit unless its deadline has already been reached,
//! so a push arriving exactly one window after the previous one commits the
//! previous value first. There is no leading-edge emission and no max-wait
//! cap, so a steady stream of pushes spaced closer than the window never
//! commits anything until it stops.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Timer-based debouncer with cancel-on-reset semantics.
///
/// Committed values are delivered on the receiver returned by
/// [`Debouncer::new`]. Dropping the debouncer cancels the pending commit.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    sender: mpsc::UnboundedSender<T>,
    pending: Option<Pending<T>>,
}

/// Scheduled commit. Whoever takes the value out of `slot` sends it.
#[derive(Debug)]
struct Pending<T> {
    deadline: Instant,
    slot: Arc<Mutex<Option<T>>>,
    timer: JoinHandle<()>,
}

impl<T> Pending<T> {
    fn abort(self) -> Option<T> {
        self.timer.abort();
        self.slot.lock().take()
    }
}

impl<T: Send + 'static> Debouncer<T> {
    /// Creates a debouncer and the receiver its committed values arrive on.
    pub fn new(window: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let debouncer = Self {
            window,
            sender,
            pending: None,
        };
        (debouncer, receiver)
    }

    /// Schedules `value` for commit, replacing any pending value.
    ///
    /// A pending value whose deadline is already due is committed before
    /// `value` is scheduled.
    ///
    /// # Panics
    /// Panics if called outside of a tokio runtime.
    pub fn push(&mut self, value: T) {
        let now = Instant::now();
        if let Some(pending) = self.pending.take() {
            let due = pending.deadline <= now;
            if let Some(previous) = pending.abort().filter(|_| due) {
                // Receiver dropped means nobody is listening for commits anymore.
                let _ = self.sender.send(previous);
            }
        }

        let deadline = now + self.window;
        let slot = Arc::new(Mutex::new(Some(value)));
        let sender = self.sender.clone();
        let timer_slot = Arc::clone(&slot);
        let timer = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(value) = timer_slot.lock().take() {
                let _ = sender.send(value);
            }
        });

        self.pending = Some(Pending {
            deadline,
            slot,
            timer,
        });
    }

    /// Drops the pending commit. Returns whether one was still scheduled.
    pub fn cancel(&mut self) -> bool {
        self.pending
            .take()
            .and_then(Pending::abort)
            .is_some()
    }
}

impl<T> Debouncer<T> {
    /// Whether a commit is currently scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| pending.slot.lock().is_some())
    }

    /// Quiescence window.
    pub fn window(&self) -> Duration {
        self.window
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
