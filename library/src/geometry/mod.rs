pub mod alias;
pub mod aabb;
pub(crate) mod axis;
