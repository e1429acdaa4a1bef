//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (Actor, Health, Lifecycle, Player, Reticle)
//! - world: позиционирование и кинематика (Position, Velocity, BodyCategory)

pub mod actor;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use world::*;
