//! Periodic keepalive timer.
//!
//! The Steam engine picks the period; once registered the timer fires for
//! the life of the session, until it is cancelled or replaced.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// At most one periodic timer.
#[derive(Debug, Default)]
pub struct Keepalive {
    timer: Option<Interval>,
}

impl Keepalive {
    /// No timer registered.
    pub fn new() -> Self { Self::default() }

    /// Fire every `period`, first one `period` from now. Replaces any
    /// existing timer.
    pub fn register_periodic(&mut self, period: Duration) {
        if period.is_zero() {
            log::warn!("[vaporo] Ignoring zero keepalive period");
            return;
        }
        log::debug!("[vaporo] keepalive every {period:?}");
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
    }

    /// Stop firing.
    pub fn cancel(&mut self) {
        self.timer = None;
    }

    /// `true` while a timer is registered.
    pub fn is_active(&self) -> bool { self.timer.is_some() }

    /// Wait for the next tick. Never resolves while no timer is registered.
    pub async fn tick(&mut self) {
        match &mut self.timer {
            Some(t) => { t.tick().await; }
            None    => std::future::pending::<()>().await,
        }
    }
}
