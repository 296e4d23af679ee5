use log::warn;

/// Counts every occurrence of a soft failure but writes only the first
/// one and then every `interval`-th, so a tight loop of rejected calls
/// does not flood the log.
pub(crate) struct ThrottledWarningLogger {
    interval: u64,
    occurrences: u64,
}

impl ThrottledWarningLogger {
    #[must_use]
    pub(crate) fn new(interval: u64) -> Self {
        assert!(interval > 0, "interval must be greater than 0");
        Self {
            interval,
            occurrences: 0,
        }
    }

    /// Returns `true` when the message has actually been written.
    pub(crate) fn do_write<Message: FnOnce() -> String>(&mut self, message: Message) -> bool {
        let should_write = self.occurrences % self.interval == 0;
        self.occurrences = self.occurrences.wrapping_add(1);
        if should_write {
            warn!("{} (occurrence {})", message(), self.occurrences);
        }
        should_write
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn occurrences(&self) -> u64 {
        self.occurrences
    }
}
