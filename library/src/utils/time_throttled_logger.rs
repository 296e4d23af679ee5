use log::info;
use std::time::{Duration, Instant};

pub(crate) struct TimeThrottledInfoLogger {
    interval: Duration,
    last_log_action: Instant,
}

impl TimeThrottledInfoLogger {
    #[must_use]
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_log_action: Instant::now(),
        }
    }

    pub(crate) fn do_write<Message: FnOnce() -> String>(&mut self, message: Message) -> bool {
        self.write_at(Instant::now(), message)
    }

    fn write_at<Message: FnOnce() -> String>(&mut self, now: Instant, message: Message) -> bool {
        let delta = now.saturating_duration_since(self.last_log_action);
        if delta <= self.interval {
            return false;
        }
        info!("{}", message());
        self.last_log_action = now - (delta - self.interval).min(self.interval);
        true
    }
}
