//! World/collision contract
//!
//! Broad-phase and narrow-phase detection belong to the host. It reports every
//! contact between registered bodies as `Contact { a, b }` (order is not
//! meaningful); the simulation categorises the pair and decides the outcome,
//! so a blocking collision and a sensor overlap look the same here.

use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: Entity,
    pub b: Entity,
}

impl Contact {
    pub fn new(a: Entity, b: Entity) -> Self {
        Self { a, b }
    }
}
