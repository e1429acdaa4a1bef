//! Combat systems

pub mod contacts;
pub mod lifecycle;
pub mod projectile;
pub mod weapon;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod contacts_tests;
#[cfg(test)]
mod lifecycle_tests;

pub use contacts::*;
pub use lifecycle::*;
pub use projectile::*;
pub use weapon::*;
