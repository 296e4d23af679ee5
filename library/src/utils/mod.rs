pub mod revision;
pub(crate) mod min_max_time_measurer;
pub(crate) mod sliding_time_frame;
pub(crate) mod throttled_logger;
pub(crate) mod time_throttled_logger;
