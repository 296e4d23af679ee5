pub(crate) mod recording_engine;
pub(crate) mod session_setup;
