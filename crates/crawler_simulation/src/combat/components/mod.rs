//! Combat components

pub mod contact;
pub mod lifecycle;
pub mod projectile;
pub mod weapon;


pub use contact::EnemyContact;
pub use lifecycle::DeferredCueRelease;
pub use projectile::{FlameGrowth, OverlapRetrigger, Projectile};
pub use weapon::{Weapon, WeaponRelease};
