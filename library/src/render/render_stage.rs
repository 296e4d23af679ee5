use strum_macros::Display;

/// Position inside one render cycle; every cycle starts and ends at `Idle`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Display)]
pub enum RenderStage {
    #[default]
    Idle,
    CameraApplied,
    DynamicUploaded,
    StaticUploaded,
    KernelExecuted,
    ReadBack,
}
