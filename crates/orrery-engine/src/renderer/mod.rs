pub mod camera;
pub mod instance;

// Re-export key types for convenient access
pub use camera::{Camera3D, Projection};
pub use instance::{AnnulusRun, PathRun, PointInstance, RenderBuffer, Solid, SphereInstance};
