//! Wall clock that never goes backwards

use std::sync::{Arc, Mutex};

use chrono::{DateTime, DurationRound, TimeDelta, Utc};

#[derive(Clone, Default)]
pub struct Clock {
    last: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current UTC time at millisecond precision, never earlier than any
    /// value previously returned by this clock.
    pub fn now(&self) -> DateTime<Utc> {
        let now = Utc::now();
        let now = now
            .duration_trunc(TimeDelta::milliseconds(1))
            .unwrap_or(now);

        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        let stamp = match *last {
            Some(prev) if prev > now => prev,
            _ => now,
        };
        *last = Some(stamp);
        stamp
    }
}
