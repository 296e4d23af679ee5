use std::time::{Duration, Instant};

/// Ring of the most recent durations with a running sum.
pub(crate) struct SlidingTimeFrame {
    samples: Vec<Duration>,
    write_position: usize,
    filled: usize,
    total: Duration,

    last_time_mark: Instant,
}

impl SlidingTimeFrame {
    #[must_use]
    pub(crate) fn new(measurements_count: usize) -> Self {
        assert!(measurements_count > 0);
        Self {
            samples: vec![Duration::ZERO; measurements_count],
            write_position: 0,
            filled: 0,
            total: Duration::ZERO,
            last_time_mark: Instant::now(),
        }
    }

    pub(crate) fn add_delta(&mut self, delta: Duration) {
        let erased = std::mem::replace(&mut self.samples[self.write_position], delta);
        self.total = self.total + delta - erased;
        self.write_position = (self.write_position + 1) % self.samples.len();
        self.filled = (self.filled + 1).min(self.samples.len());
    }

    pub(crate) fn start(&mut self) {
        self.last_time_mark = Instant::now();
    }

    pub(crate) fn sample(&mut self) {
        let current_time = Instant::now();
        self.add_delta(current_time.duration_since(self.last_time_mark));
        self.last_time_mark = current_time;
    }

    /// Averages over the samples actually taken, not over the capacity.
    #[must_use]
    pub(crate) fn average_delta(&self) -> Duration {
        if 0 == self.filled {
            return Duration::ZERO;
        }
        self.total / self.filled as u32
    }
}
