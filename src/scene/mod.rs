pub mod animation;
pub mod mesh;
pub mod primitives;
