// extensions/mod.rs
//
// Optional extension modules for the orrery engine.
// These are decoupled from core Entity/Scene; games opt in through EngineContext helpers.

pub mod transform;

pub use transform::TransformGraph;
