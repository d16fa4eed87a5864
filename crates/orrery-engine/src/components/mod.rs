pub mod color;
pub mod entity;
pub mod mesh;
pub mod path;
pub mod points;
