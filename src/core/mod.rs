//! Core simulation types: the particle store, the box, the per-particle
//! collision engine and the fixed-step driver.

pub mod bounds;
pub mod engine;
pub mod event;
pub mod particle;
pub mod sim;

pub use bounds::Bounds;
pub use engine::{step_particle, ContactRule, StepOutcome};
pub use event::{Collision, CollisionLog, CollisionObserver, LogObserver, NullObserver};
pub use particle::Particle;
pub use sim::Simulation;
