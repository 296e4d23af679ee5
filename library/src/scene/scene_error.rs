use crate::scene::handles::MaterialHandle;
use strum_macros::Display;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
pub enum EntityKind {
    #[strum(serialize = "primitive")]
    Primitive,
    #[strum(serialize = "light")]
    Light,
    #[strum(serialize = "material")]
    Material,
    #[strum(serialize = "texture")]
    Texture,
}

#[derive(Error, Debug, PartialEq)]
pub enum SceneError {
    #[error("{kind} registry is full (capacity {capacity})")]
    CapacityExhausted {
        kind: EntityKind,
        capacity: usize,
    },
    #[error("{0} has not been allocated")]
    UnknownMaterial(MaterialHandle),
    #[error("texture image has {actual} bytes while a slot takes {expected}")]
    TextureSizeMismatch {
        expected: usize,
        actual: usize,
    },
}
