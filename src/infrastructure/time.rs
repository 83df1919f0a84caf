use crate::application::ports::time::Clock;
use chrono::{DateTime, DurationRound, TimeDelta, Utc};

/// Wall clock truncated to whole microseconds, the precision `TIMESTAMPTZ`
/// keeps, so stored and returned timestamps compare equal.
#[derive(Default, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let now = Utc::now();
        now.duration_trunc(TimeDelta::microseconds(1)).unwrap_or(now)
    }
}
