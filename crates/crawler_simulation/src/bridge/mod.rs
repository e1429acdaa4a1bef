//! Bridge: contracts with the external collaborators
//!
//! Host (engine/UI) → ECS: input intents, contacts, audio feedback.
//! ECS → Host: audio commands, visual commands, UI notifications.
//!
//! The core never calls the host directly; everything crosses as Bevy events.

use bevy::prelude::*;

pub mod audio;
pub mod input;
pub mod presentation;
pub mod world;

pub use audio::{ActorSounds, AudioCommand, AudioFeedback, CueAllocator, CueHandle, CueId, PlayingCues};
pub use input::{AimIntent, FireCommand, KillIntent, PauseIntent, PlayerMoveIntent, SlotClick, TeardownArena};
pub use presentation::{AnimationState, UiNotification, VisualCommand};
pub use world::Contact;

use crate::CombatSet;

/// Bridge Plugin: регистрирует все события границы + input системы
pub struct BridgePlugin;

impl Plugin for BridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AudioCommand>()
            .add_event::<AudioFeedback>()
            .add_event::<VisualCommand>()
            .add_event::<UiNotification>()
            .add_event::<Contact>()
            .add_event::<FireCommand>()
            .add_event::<SlotClick>()
            .add_event::<PlayerMoveIntent>()
            .add_event::<AimIntent>()
            .add_event::<PauseIntent>()
            .add_event::<TeardownArena>()
            .add_event::<KillIntent>()
            .init_resource::<CueAllocator>()
            .init_resource::<PlayingCues>();

        app.add_systems(Update, input::apply_pause_intents);

        app.add_systems(
            FixedUpdate,
            (
                (input::apply_move_intents, input::apply_aim_intents)
                    .chain()
                    .in_set(CombatSet::Input),
                audio::track_playing_cues.in_set(CombatSet::Signals),
            ),
        );
    }
}
