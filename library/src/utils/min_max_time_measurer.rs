use std::time::Duration;

#[derive(Default)]
pub(crate) struct MinMaxTimeMeasurer {
    min_time: Option<Duration>,
    max_time: Duration,
    last_time: Duration,
}

impl MinMaxTimeMeasurer {
    pub(crate) fn record(&mut self, measured: Duration) {
        self.last_time = measured;
        self.max_time = self.max_time.max(measured);
        self.min_time = Some(self.min_time.map_or(measured, |current| current.min(measured)));
    }

    #[must_use]
    pub(crate) fn min_time(&self) -> Duration {
        self.min_time.unwrap_or(Duration::ZERO)
    }

    #[must_use]
    pub(crate) fn max_time(&self) -> Duration {
        self.max_time
    }

    #[must_use]
    pub(crate) fn last_time(&self) -> Duration {
        self.last_time
    }
}
