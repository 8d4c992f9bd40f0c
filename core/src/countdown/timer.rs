//! Countdown builder and the tick loop

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::error::CountdownError;
use super::handle::{CallbackScope, CancelHandle, ReleaseOnExit, Shared, TimerState};

/// Called after every decrement with the new counter value
pub type TickCallback = Box<dyn FnMut(i64) + Send + 'static>;

/// Called once when the counter first reaches zero or below
pub type DoneCallback = Box<dyn FnOnce() + Send + 'static>;

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// A countdown that has not been started yet.
///
/// ```ignore
/// let handle = Countdown::new(3)
///     .on_tick(|remaining| println!("{remaining}"))
///     .on_done(|| println!("done"))
///     .start()?;
/// ```
pub struct Countdown {
    seconds: i64,
    period: Duration,
    on_tick: Option<TickCallback>,
    on_done: Option<DoneCallback>,
}

impl Countdown {
    /// Countdown from `seconds`. Zero or negative values finish on the first tick.
    pub fn new(seconds: i64) -> Self {
        Self {
            seconds,
            period: DEFAULT_TICK_PERIOD,
            on_tick: None,
            on_done: None,
        }
    }

    /// Time between ticks. Zero is bumped to one millisecond.
    pub fn period(mut self, period: Duration) -> Self {
        self.period = period.max(Duration::from_millis(1));
        self
    }

    pub fn on_tick(mut self, f: impl FnMut(i64) + Send + 'static) -> Self {
        self.on_tick = Some(Box::new(f));
        self
    }

    pub fn on_done(mut self, f: impl FnOnce() + Send + 'static) -> Self {
        self.on_done = Some(Box::new(f));
        self
    }

    /// Replace both callbacks at once; `None` means no-op
    pub fn callbacks(
        mut self,
        on_tick: Option<TickCallback>,
        on_done: Option<DoneCallback>,
    ) -> Self {
        self.on_tick = on_tick;
        self.on_done = on_done;
        self
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn tick_period(&self) -> Duration {
        self.period
    }

    /// Start on the Tokio runtime of the calling context
    pub fn start(self) -> Result<CancelHandle, CountdownError> {
        let runtime = Handle::try_current().map_err(CountdownError::NoRuntime)?;
        Ok(self.start_on(&runtime))
    }

    /// Start on an explicit runtime
    pub fn start_on(self, runtime: &Handle) -> CancelHandle {
        let shared = Arc::new(Shared::new(self.seconds));
        let seconds = self.seconds;
        let period = self.period;

        // The guard is built here so an abort before the first poll still releases
        let release = ReleaseOnExit(Arc::clone(&shared));
        let task = runtime.spawn(run(self, release));
        let abort = task.abort_handle();

        tracing::debug!(
            task = %abort.id(),
            seconds,
            ?period,
            "countdown started"
        );

        CancelHandle::new(shared, abort)
    }
}

impl fmt::Debug for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Countdown")
            .field("seconds", &self.seconds)
            .field("period", &self.period)
            .field("on_tick", &self.on_tick.is_some())
            .field("on_done", &self.on_done.is_some())
            .finish()
    }
}

/// Start a countdown with the default one second period.
///
/// Each tick decrements the counter and passes the new value to `on_tick`.
/// When the counter reaches zero or below the schedule stops and `on_done`
/// fires once.
pub fn start_timer(
    seconds: i64,
    on_tick: Option<TickCallback>,
    on_done: Option<DoneCallback>,
) -> Result<CancelHandle, CountdownError> {
    Countdown::new(seconds).callbacks(on_tick, on_done).start()
}

async fn run(countdown: Countdown, release: ReleaseOnExit) {
    let shared = &release.0;
    let Countdown {
        seconds,
        period,
        mut on_tick,
        mut on_done,
    } = countdown;

    // First tick fires one full period after start
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut remaining = seconds;

    loop {
        interval.tick().await;

        let _firing = shared.lock_firing();
        if !shared.is_running() {
            break;
        }

        remaining = remaining.saturating_sub(1);
        shared.set_remaining(remaining);
        tracing::trace!(remaining, "countdown tick");

        if let Some(on_tick) = on_tick.as_mut() {
            let _scope = CallbackScope::enter();
            on_tick(remaining);
        }

        if remaining > 0 {
            continue;
        }

        // A cancel from inside on_tick wins over completion
        if shared.stop(TimerState::Completed) {
            tracing::debug!(seconds, "countdown completed");
            if let Some(on_done) = on_done.take() {
                let _scope = CallbackScope::enter();
                on_done();
            }
        }
        break;
    }
}
