//! Sense loop: activation delay → recurring player polls.

use std::time::Duration;

use bevy::prelude::*;

use crate::ai::components::{BehaviorState, EnemyBrain, MovementAction, Sensable, SenseResponse, Sensation};
use crate::bridge::{ActorSounds, AudioCommand, CueId, PlayingCues, VisualCommand};
use crate::components::{Actor, Lifecycle, MovementTuning, Player, Position, Velocity};
use crate::tasks::{ScheduledTasks, TaskFired, TaskId, TaskKind};
use crate::DeterministicRng;

use super::movement::{move_randomly, move_towards_player};

/// Событие: одна sense-итерация врага (для хоста и тестов)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemySensed {
    pub enemy: Entity,
    pub sensation: Sensation,
    pub response: SenseResponse,
}

/// Schedule the recurring sense poll on an actor's own task set
pub fn sense_player_repeat(tasks: &mut ScheduledTasks, interval: Duration) -> TaskId {
    tasks.schedule_repeating(TaskKind::SensePoll, interval)
}

/// System: Activate task fired → start the sense loop
pub fn activate_enemies(
    mut fired: EventReader<TaskFired>,
    mut enemies: Query<(&mut EnemyBrain, &mut ScheduledTasks, &Lifecycle, Option<&Actor>)>,
) {
    for task in fired.read() {
        if task.kind != TaskKind::Activate {
            continue;
        }

        let Ok((mut brain, mut tasks, lifecycle, actor)) = enemies.get_mut(task.owner) else {
            continue;
        };

        if lifecycle.is_dead() || brain.sense_task.is_some() {
            continue;
        }

        let interval = brain.sense_interval;
        brain.sense_task = Some(sense_player_repeat(&mut tasks, interval));

        if let Some(actor) = actor {
            crate::logger::log(&format!("👁️ {} activated: sensing every {:?}", actor.name, interval));
        }
    }
}

/// System: SensePoll task fired → sense the first live player and act on it
///
/// No live player → the poll is skipped (the enemy keeps its velocity).
pub fn poll_sensations(
    mut fired: EventReader<TaskFired>,
    mut enemies: Query<(
        &mut EnemyBrain,
        &Position,
        &mut Velocity,
        &MovementTuning,
        &Lifecycle,
        Option<&ActorSounds>,
    )>,
    players: Query<(Entity, &Position, &Lifecycle), With<Player>>,
    playing: Res<PlayingCues>,
    mut rng: ResMut<DeterministicRng>,
    mut audio: EventWriter<AudioCommand>,
    mut visuals: EventWriter<VisualCommand>,
    mut sensed: EventWriter<EnemySensed>,
) {
    let mut live_players: Vec<_> = players
        .iter()
        .filter(|(_, _, lifecycle)| !lifecycle.is_dead())
        .map(|(entity, position, _)| (entity, position.0))
        .collect();
    live_players.sort_by_key(|(entity, _)| *entity);

    for task in fired.read() {
        if task.kind != TaskKind::SensePoll {
            continue;
        }

        let Some(&(_, player_position)) = live_players.first() else {
            continue;
        };

        let Ok((mut brain, position, mut velocity, tuning, lifecycle, sounds)) = enemies.get_mut(task.owner) else {
            continue;
        };

        if lifecycle.is_dead() {
            brain.state = BehaviorState::Dead;
            continue;
        }

        let shout_playing = sounds.is_some_and(|s| playing.is_playing(s.shout));
        let previous_animation = brain.animation;

        let sensation = Sensation::between(position.0, player_position);
        let response = brain.sense(&sensation, shout_playing);

        if response.play_alert {
            if let Some(sounds) = sounds {
                audio.write(AudioCommand::Play {
                    handle: sounds.shout,
                    cue: CueId::Shout,
                });
            }
        }

        velocity.0 = match response.movement {
            MovementAction::TowardsPlayer => move_towards_player(velocity.0, sensation.offset, tuning),
            MovementAction::Randomly { speed_ratio } => move_randomly(&mut rng.rng, tuning, speed_ratio),
        };

        if response.animation != previous_animation {
            visuals.write(VisualCommand::SetAnimation {
                entity: task.owner,
                state: response.animation,
            });
        }

        sensed.write(EnemySensed {
            enemy: task.owner,
            sensation,
            response,
        });
    }
}
