use crate::config::ConfigError;
use crate::engine::engine_error::EngineError;
use crate::render::render_stage::RenderStage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("compute engine failed after {stage}: {source}")]
    Engine {
        stage: RenderStage,
        #[source]
        source: EngineError,
    },
    #[error("output buffer holds {provided} bytes, the frame needs {required}")]
    OutputBufferTooSmall {
        required: usize,
        provided: usize,
    },
    #[error("invalid session configuration: {0}")]
    Configuration(#[from] ConfigError),
}
