//! Registry of running countdowns
//!
//! Keeps every started countdown under a numeric id so a front end can list
//! them and cancel them individually or all at once.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Local};

use crate::countdown::{CancelHandle, Countdown, CountdownError, TimerState};

/// Identifier handed out by the registry. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct Tracked {
    label: String,
    started_at: DateTime<Local>,
    handle: CancelHandle,
}

/// Point-in-time view of one tracked countdown
#[derive(Debug, Clone, PartialEq)]
pub struct TimerEntry {
    pub id: TimerId,
    pub label: String,
    pub started_at: DateTime<Local>,
    pub seconds: i64,
    pub remaining: i64,
    pub state: TimerState,
}

#[derive(Debug, Default)]
pub struct TimerRegistry {
    next_id: u64,
    timers: BTreeMap<TimerId, Tracked>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `countdown` on the current runtime and track it
    pub fn start(
        &mut self,
        label: impl Into<String>,
        countdown: Countdown,
    ) -> Result<TimerId, CountdownError> {
        let handle = countdown.start()?;
        Ok(self.insert(label, handle))
    }

    /// Track a countdown that was started elsewhere
    pub fn insert(&mut self, label: impl Into<String>, handle: CancelHandle) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let label = label.into();

        tracing::debug!(%id, label = %label, seconds = handle.seconds(), "tracking countdown");

        self.timers.insert(
            id,
            Tracked {
                label,
                started_at: Local::now(),
                handle,
            },
        );
        id
    }

    pub fn get(&self, id: TimerId) -> Option<&CancelHandle> {
        self.timers.get(&id).map(|t| &t.handle)
    }

    /// Cancel one countdown. False if the id is unknown or already stopped.
    pub fn cancel(&self, id: TimerId) -> bool {
        self.timers
            .get(&id)
            .is_some_and(|tracked| tracked.handle.cancel())
    }

    /// Cancel every running countdown. Returns how many were stopped.
    pub fn cancel_all(&self) -> usize {
        let stopped = self
            .timers
            .values()
            .filter(|tracked| tracked.handle.cancel())
            .count();
        if stopped > 0 {
            tracing::debug!(stopped, "cancelled all countdowns");
        }
        stopped
    }

    /// Forget countdowns that have completed or been cancelled
    pub fn prune(&mut self) -> usize {
        let before = self.timers.len();
        self.timers.retain(|_, tracked| tracked.handle.is_running());
        before - self.timers.len()
    }

    /// Snapshot of all tracked countdowns in id order
    pub fn entries(&self) -> Vec<TimerEntry> {
        self.timers
            .iter()
            .map(|(id, tracked)| TimerEntry {
                id: *id,
                label: tracked.label.clone(),
                started_at: tracked.started_at,
                seconds: tracked.handle.seconds(),
                remaining: tracked.handle.remaining(),
                state: tracked.handle.state(),
            })
            .collect()
    }

    pub fn running(&self) -> usize {
        self.timers
            .values()
            .filter(|tracked| tracked.handle.is_running())
            .count()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
