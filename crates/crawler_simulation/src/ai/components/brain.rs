//! Sense/behavior components (EnemyBrain, Sensation, Sensable).

use std::time::Duration;

use bevy::prelude::*;

use crate::bridge::AnimationState;
use crate::geometry;
use crate::tasks::TaskId;

/// One poll result: how far the player is, and where
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensation {
    /// Euclidean distance, always ≥ 0
    pub distance: f32,
    /// player - sensor
    pub offset: Vec2,
}

impl Sensation {
    pub fn between(sensor: Vec2, player: Vec2) -> Self {
        Self {
            distance: geometry::distance(sensor, player),
            offset: player - sensor,
        }
    }
}

/// Состояния поведения
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum BehaviorState {
    /// Начальное состояние
    #[default]
    Idle,
    /// Player within sense range
    Alerted,
    /// Player within 2/3 of sense range
    Attacking,
    /// Terminal
    Dead,
}

/// Pure velocity-setting actions picked by a sense handler
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementAction {
    TowardsPlayer,
    Randomly { speed_ratio: f32 },
}

/// What the actor wants after one sensation. Applying it is the system's job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SenseResponse {
    pub movement: MovementAction,
    /// Start the alert (shout) cue
    pub play_alert: bool,
    pub animation: AnimationState,
    pub state: BehaviorState,
}

/// Capability: react to a `Sensation`
///
/// Pre: `sensation.distance` ≥ 0.
/// Post: only the implementor's own behavior state changes; no health, no
/// events. Side effects are described by the returned `SenseResponse`.
pub trait Sensable {
    fn sense(&mut self, sensation: &Sensation, alert_cue_playing: bool) -> SenseResponse;
}

/// Ogre-style brain: chase inside sense range, wander outside
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct EnemyBrain {
    pub sense_range: f32,
    pub sense_interval: Duration,
    /// Alert cue was triggered and not cleared yet
    pub alerted: bool,
    pub state: BehaviorState,
    /// Last animation sent to the presentation layer
    pub animation: AnimationState,
    /// Handle of the recurring sense poll (None until activated)
    #[reflect(ignore)]
    pub sense_task: Option<TaskId>,
}

impl EnemyBrain {
    pub const WANDER_SPEED_RATIO: f32 = 0.5;

    pub fn new(sense_range: f32, sense_interval: Duration) -> Self {
        Self {
            sense_range,
            sense_interval,
            alerted: false,
            state: BehaviorState::Idle,
            animation: AnimationState::Idle,
            sense_task: None,
        }
    }

    pub fn attack_range(&self) -> f32 {
        self.sense_range * 2.0 / 3.0
    }
}

impl Sensable for EnemyBrain {
    fn sense(&mut self, sensation: &Sensation, alert_cue_playing: bool) -> SenseResponse {
        if self.state == BehaviorState::Dead {
            return SenseResponse {
                movement: MovementAction::Randomly { speed_ratio: 0.0 },
                play_alert: false,
                animation: self.animation,
                state: BehaviorState::Dead,
            };
        }

        let in_range = sensation.distance < self.sense_range;
        let mut play_alert = false;

        let movement = if in_range {
            // Re-shout only when not alerted yet or the last shout finished
            if !self.alerted || !alert_cue_playing {
                self.alerted = true;
                play_alert = true;
            }
            MovementAction::TowardsPlayer
        } else {
            MovementAction::Randomly {
                speed_ratio: Self::WANDER_SPEED_RATIO,
            }
        };

        let (animation, state) = if sensation.distance < self.attack_range() {
            (AnimationState::Attacking, BehaviorState::Attacking)
        } else {
            self.alerted = false;
            let state = if in_range { BehaviorState::Alerted } else { BehaviorState::Idle };
            (AnimationState::Idle, state)
        };

        self.state = state;
        self.animation = animation;

        SenseResponse {
            movement,
            play_alert,
            animation,
            state,
        }
    }
}
