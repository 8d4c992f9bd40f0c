//! Cancellation handle and the state shared with the running countdown
//!
//! The tick task and every `CancelHandle` clone share one `Shared` value.
//! A tick holds the `firing` lock while it inspects the state and runs the
//! callbacks, so `cancel()` can wait for an in-flight tick before returning.
//! A cancel issued from inside any countdown callback never waits: two
//! callbacks cancelling each other would otherwise hold each other's lock.

use std::cell::Cell;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::AbortHandle;

/// Lifecycle of a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerState {
    /// Ticks are still scheduled
    Running,
    /// The counter reached zero and `on_done` fired
    Completed,
    /// Stopped by a cancel before reaching zero
    Cancelled,
}

impl TimerState {
    pub fn is_stopped(self) -> bool {
        !matches!(self, TimerState::Running)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimerState::Running => "running",
            TimerState::Completed => "completed",
            TimerState::Cancelled => "cancelled",
        }
    }
}

// ─── Callback scope ─────────────────────────────────────────────────────────

thread_local! {
    static IN_CALLBACK: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as running a countdown callback.
/// Callbacks are synchronous, so the thread cannot switch tasks inside one.
pub(crate) struct CallbackScope {
    outer: bool,
}

impl CallbackScope {
    pub(crate) fn enter() -> Self {
        Self {
            outer: IN_CALLBACK.replace(true),
        }
    }
}

impl Drop for CallbackScope {
    fn drop(&mut self) {
        IN_CALLBACK.set(self.outer);
    }
}

fn in_callback() -> bool {
    IN_CALLBACK.get()
}

// ─── Shared state ───────────────────────────────────────────────────────────

#[derive(Debug)]
pub(crate) struct Shared {
    seconds: i64,
    remaining: AtomicI64,
    state: Mutex<TimerState>,
    firing: Mutex<()>,
    released: watch::Sender<bool>,
}

impl Shared {
    pub(crate) fn new(seconds: i64) -> Self {
        let (released, _) = watch::channel(false);
        Self {
            seconds,
            remaining: AtomicI64::new(seconds),
            state: Mutex::new(TimerState::Running),
            firing: Mutex::new(()),
            released,
        }
    }

    pub(crate) fn state(&self) -> TimerState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn is_running(&self) -> bool {
        self.state() == TimerState::Running
    }

    /// Move from `Running` to `next`. Returns false if the timer already stopped.
    pub(crate) fn stop(&self, next: TimerState) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state != TimerState::Running {
            return false;
        }
        *state = next;
        true
    }

    /// Lock held by a tick while it checks state and runs callbacks.
    /// A callback panic poisons it; the lock itself guards no data.
    pub(crate) fn lock_firing(&self) -> MutexGuard<'_, ()> {
        self.firing.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn set_remaining(&self, remaining: i64) {
        self.remaining.store(remaining, Ordering::Release);
    }

    pub(crate) fn remaining(&self) -> i64 {
        self.remaining.load(Ordering::Acquire)
    }

    pub(crate) fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Mark the tick task as gone. Called from the task's drop guard so it runs
    /// on completion, abort and panic alike.
    pub(crate) fn release(&self) {
        // A task that unwinds out of a callback never reached a terminal state
        self.stop(TimerState::Cancelled);
        self.released.send_replace(true);
    }

    pub(crate) fn is_released(&self) -> bool {
        *self.released.borrow()
    }

    async fn wait_released(&self) {
        let mut rx = self.released.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait
        let _ = rx.wait_for(|released| *released).await;
    }
}

/// Lives inside the tick task. Dropping the task, for any reason, releases it.
pub(crate) struct ReleaseOnExit(pub(crate) Arc<Shared>);

impl Drop for ReleaseOnExit {
    fn drop(&mut self) {
        self.0.release();
    }
}

// ─── CancelHandle ───────────────────────────────────────────────────────────

/// Handle returned when a countdown starts.
///
/// Dropping the handle does not stop the timer; use [`CancelHandle::cancel`]
/// or [`CancelHandle::cancel_on_drop`] for that. Clones share the same timer.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    shared: Arc<Shared>,
    task: AbortHandle,
}

impl CancelHandle {
    pub(crate) fn new(shared: Arc<Shared>, task: AbortHandle) -> Self {
        Self { shared, task }
    }

    /// Stop the countdown.
    ///
    /// Once this returns no further `on_tick` or `on_done` call will start.
    /// Called from outside any countdown callback it also waits for a tick
    /// already running on another thread. Called from inside a callback (of
    /// this or another countdown) it returns without waiting. Returns true if
    /// this call stopped the timer, false if it had already completed or been
    /// cancelled.
    pub fn cancel(&self) -> bool {
        if !self.shared.stop(TimerState::Cancelled) {
            return false;
        }

        if !in_callback() {
            drop(self.shared.lock_firing());
        }
        self.task.abort();

        tracing::debug!(
            task = %self.task.id(),
            remaining = self.shared.remaining(),
            "countdown cancelled"
        );
        true
    }

    pub fn state(&self) -> TimerState {
        self.shared.state()
    }

    pub fn is_running(&self) -> bool {
        self.shared.is_running()
    }

    /// Counter value after the latest tick (the start value before the first tick)
    pub fn remaining(&self) -> i64 {
        self.shared.remaining()
    }

    /// Start value the countdown was created with
    pub fn seconds(&self) -> i64 {
        self.shared.seconds()
    }

    /// True once the tick task has exited and released its schedule
    pub fn is_released(&self) -> bool {
        self.shared.is_released()
    }

    /// Resolves once the tick task has exited, by completion or cancellation
    pub async fn finished(&self) -> TimerState {
        self.shared.wait_released().await;
        self.shared.state()
    }

    /// Wrap the handle so the countdown is cancelled when the guard is dropped
    pub fn cancel_on_drop(self) -> CancelOnDrop {
        CancelOnDrop {
            handle: self,
            armed: true,
        }
    }
}

/// Cancels its countdown when dropped
#[derive(Debug)]
pub struct CancelOnDrop {
    handle: CancelHandle,
    armed: bool,
}

impl CancelOnDrop {
    /// Give the handle back without cancelling
    pub fn disarm(mut self) -> CancelHandle {
        self.armed = false;
        self.handle.clone()
    }
}

impl std::ops::Deref for CancelOnDrop {
    type Target = CancelHandle;

    fn deref(&self) -> &CancelHandle {
        &self.handle
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        if self.armed {
            self.handle.cancel();
        }
    }
}
