use crate::sync::device_sync_cache::DataKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("compute engine is not initialized")]
    NotInitialized,
    #[error("failed to allocate device memory: {what:?}")]
    AllocationFailed {
        what: String,
    },
    #[error("device rejected the {what} transfer: {reason:?}")]
    TransferFailed {
        what: DataKind,
        reason: String,
    },
    #[error("kernel launch failed: {what:?}")]
    LaunchFailed {
        what: String,
    },
    #[error("readback target holds {provided} bytes, the frame needs {required}")]
    ReadBackTargetTooSmall {
        required: usize,
        provided: usize,
    },
    #[error("compute device lost")]
    DeviceLost,
}
