//! Presentation contract (sprites, animation). Fire-and-forget.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimationState {
    Idle,
    Attacking,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum VisualCommand {
    SetFacing { entity: Entity, flip_x: bool },
    SetAnimation { entity: Entity, state: AnimationState },
    /// Non-uniform scale + alpha in [0, 1]
    SetScaleAlpha { entity: Entity, scale: Vec2, alpha: f32 },
    /// Sprite rotation in radians
    SetRotation { entity: Entity, radians: f32 },
    /// Continuous cosmetic spin (bullets, collected coins)
    SetSpin { entity: Entity, degrees_per_sec: f32 },
}

/// Collaborator notifications for the UI overlay
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum UiNotification {
    /// Weapon display must show the wielder's new weapon
    WeaponChanged { wielder: Entity, weapon: String },
    /// Inventory display must refresh
    InventoryChanged { owner: Entity },
}
