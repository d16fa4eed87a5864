use glam::{Mat4, Vec3};
use serde::{de::Error as _, Deserialize, Serialize};
use serde_json::Value;

use crate::api::types::{EntityId, HostCommand};
use crate::components::entity::Entity;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::core::time::FrameTime;
use crate::extensions::transform::TransformGraph;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera3D;
use crate::systems::lighting::LightState;

/// Configuration for the engine, provided by the game.
///
/// Every field has a default, so a host may override any subset from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Vertical field of view in degrees (default: 60).
    pub fov_y_degrees: f32,
    /// Near clipping distance (default: 0.1).
    pub near: f32,
    /// Far clipping distance (default: 1000).
    pub far: f32,
    /// Background color as linear RGB in [0, 1] (default: black).
    pub clear_color: [f32; 3],
    /// Seed for the context RNG (default: 42).
    pub seed: u64,
    /// Initial viewport size in CSS pixels, used until the first resize.
    pub viewport: [f32; 2],
    /// Expected number of entities (default: 64).
    pub max_entities: usize,
    /// Expected number of projected points per frame (default: 8192).
    pub max_points: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
            clear_color: [0.0, 0.0, 0.0],
            seed: 42,
            viewport: [800.0, 600.0],
            max_entities: 64,
            max_points: 8192,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Apply a JSON object of overrides on top of this config.
    /// Fields the object does not name keep their current values.
    pub fn with_overrides(&self, json: &str) -> Result<Self, serde_json::Error> {
        let Value::Object(overrides) = serde_json::from_str::<Value>(json)? else {
            return Err(serde_json::Error::custom("config overrides must be a JSON object"));
        };
        let mut merged = serde_json::to_value(self)?;
        if let Value::Object(fields) = &mut merged {
            fields.extend(overrides);
        }
        serde_json::from_value(merged)
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The per-frame tick. Drain input, advance animation, emit host commands.
    /// `time.dt` is the wall-clock delta since the previous frame in seconds.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, time: FrameTime);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub camera: Camera3D,
    pub lights: LightState,
    pub rng: Rng,
    pub commands: Vec<HostCommand>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    /// Create a context whose camera, RNG and storage follow `config`.
    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::with_capacity(config.max_entities),
            graph: TransformGraph::new(),
            camera: Camera3D::from_config(config),
            lights: LightState::new(),
            rng: Rng::new(config.seed),
            commands: Vec::with_capacity(8),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a top-level entity to the scene and the hierarchy.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.graph.register(id);
        self.scene.spawn(entity);
        id
    }

    /// Add an entity whose transform is relative to `parent`.
    pub fn spawn_child(&mut self, entity: Entity, parent: EntityId) -> EntityId {
        let id = self.spawn(entity);
        self.graph.attach(id, parent);
        id
    }

    /// Emit a command to be carried out by the host after this frame.
    pub fn emit(&mut self, command: HostCommand) {
        self.commands.push(command);
    }

    /// Take all commands emitted since the last call.
    pub fn drain_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Recompute world matrices for every entity from the hierarchy.
    /// Called automatically by the game runner after `Game::update()`.
    pub fn propagate_transforms(&mut self) {
        self.graph.propagate(&mut self.scene);
    }

    /// World matrix of `id` computed from the current local transforms,
    /// without waiting for the next propagation.
    pub fn world_matrix(&self, id: EntityId) -> Mat4 {
        self.graph.world_matrix(&self.scene, id)
    }

    /// World-space position of `id`'s origin.
    pub fn world_position(&self, id: EntityId) -> Vec3 {
        self.world_matrix(id).transform_point3(Vec3::ZERO)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_match_camera_setup() {
        let config = GameConfig::default();
        assert_eq!(config.fov_y_degrees, 60.0);
        assert_eq!(config.near, 0.1);
        assert_eq!(config.far, 1000.0);
    }

    #[test]
    fn config_from_json_keeps_missing_fields() {
        let config = GameConfig::from_json(r#"{ "seed": 7, "fov_y_degrees": 45.0 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.fov_y_degrees, 45.0);
        assert_eq!(config.far, 1000.0);
    }

    #[test]
    fn config_from_json_rejects_malformed_input() {
        assert!(GameConfig::from_json("{ seed: 7").is_err());
        assert!(GameConfig::from_json(r#"{ "seed": "seven" }"#).is_err());
    }

    #[test]
    fn overrides_apply_on_top_of_game_config() {
        let base = GameConfig { max_points: 7500, seed: 9, ..GameConfig::default() };

        assert_eq!(base.with_overrides("{}").unwrap(), base);

        let tuned = base.with_overrides(r#"{ "fov_y_degrees": 50.0 }"#).unwrap();
        assert_eq!(tuned.fov_y_degrees, 50.0);
        assert_eq!(tuned.max_points, 7500);
        assert_eq!(tuned.seed, 9);
    }

    #[test]
    fn overrides_reject_non_objects() {
        let base = GameConfig::default();
        assert!(base.with_overrides("[1, 2]").is_err());
        assert!(base.with_overrides(r#"{ "max_points": -1 }"#).is_err());
    }

    #[test]
    fn next_id_is_unique() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn spawn_child_offsets_world_position() {
        let mut ctx = EngineContext::new();
        let parent_id = ctx.next_id();
        let parent = ctx.spawn(Entity::new(parent_id).with_translation(Vec3::new(10.0, 0.0, 0.0)));
        let child_id = ctx.next_id();
        let child = ctx.spawn_child(
            Entity::new(child_id).with_translation(Vec3::new(0.0, 5.0, 0.0)),
            parent,
        );

        let pos = ctx.world_position(child);
        assert!((pos - Vec3::new(10.0, 5.0, 0.0)).length() < 1e-5, "pos={pos}");
    }

    #[test]
    fn drain_commands_empties_queue() {
        let mut ctx = EngineContext::new();
        ctx.emit(HostCommand::HidePanel);
        ctx.emit(HostCommand::PlayAudio);
        let commands = ctx.drain_commands();
        assert_eq!(commands, vec![HostCommand::HidePanel, HostCommand::PlayAudio]);
        assert!(ctx.commands.is_empty());
    }
}
