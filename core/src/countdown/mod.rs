//! Countdown timers
//!
//! This module provides:
//! - **Countdown**: builder holding the start value, tick period and callbacks
//! - **CancelHandle**: returned on start, stops the schedule on demand
//! - **start_timer**: one-call form taking optional callbacks
//!
//! # Lifecycle
//!
//! ```text
//!   start ──► Running ──(counter <= 0)──► Completed   (on_done fires once)
//!                │
//!                └──────(cancel)────────► Cancelled   (nothing fires again)
//! ```
//!
//! Each tick decrements the counter by one and hands the new value to
//! `on_tick`. Ticks of one countdown never overlap. Every exit path of the
//! tick task, including a panicking callback, releases the schedule.

mod error;
mod handle;
mod timer;


pub use error::CountdownError;
pub use handle::{CancelHandle, CancelOnDrop, TimerState};
pub use timer::{Countdown, DEFAULT_TICK_PERIOD, DoneCallback, TickCallback, start_timer};
