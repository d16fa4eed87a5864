pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, HostCommand};
pub use components::color::Color;
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, MeshShape};
pub use components::path::PathComponent;
pub use components::points::PointCloud;
pub use core::rng::Rng;
pub use core::scene::Scene;
pub use core::time::{FrameClock, FrameTime};
pub use renderer::camera::{Camera3D, Projection};
pub use renderer::instance::{AnnulusRun, PathRun, PointInstance, RenderBuffer, Solid, SphereInstance};
pub use input::queue::{InputEvent, InputQueue, Touches};
pub use systems::lighting::{LightState, PointLight};
pub use systems::picking::{raycast, Ray, RayHit};
pub use systems::render::build_render_buffer;

// Extensions: decoupled optional systems
pub use extensions::TransformGraph;
