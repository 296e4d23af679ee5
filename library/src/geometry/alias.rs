use cgmath::{Point3, Vector2, Vector3, Vector4};

pub type Point = Point3<f32>;
pub type Vector = Vector3<f32>;
pub type Quartet = Vector4<f32>;
pub type Pair = Vector2<f32>;
