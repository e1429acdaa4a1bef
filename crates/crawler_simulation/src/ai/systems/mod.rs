//! AI systems (sense loop + motion)

pub mod movement;
pub mod sense;

pub use movement::*;
pub use sense::*;
