use derive_more::Display;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Display)]
#[display("primitive #{_0}")]
pub struct PrimitiveHandle(pub usize);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Display)]
#[display("light #{_0}")]
pub struct LightHandle(pub usize);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Display)]
#[display("material #{_0}")]
pub struct MaterialHandle(pub usize);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Display)]
#[display("texture #{_0}")]
pub struct TextureHandle(pub usize);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Display)]
#[display("box #{_0}")]
pub struct BoxId(pub usize);

impl From<usize> for PrimitiveHandle {
    fn from(value: usize) -> Self {
        PrimitiveHandle(value)
    }
}

impl From<usize> for LightHandle {
    fn from(value: usize) -> Self {
        LightHandle(value)
    }
}

impl From<usize> for MaterialHandle {
    fn from(value: usize) -> Self {
        MaterialHandle(value)
    }
}

impl From<usize> for TextureHandle {
    fn from(value: usize) -> Self {
        TextureHandle(value)
    }
}

impl From<usize> for BoxId {
    fn from(value: usize) -> Self {
        BoxId(value)
    }
}
