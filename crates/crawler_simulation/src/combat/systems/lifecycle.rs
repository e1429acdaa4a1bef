//! Death sequence, deferred cue release, arena teardown.
//!
//! Death sequence (runs once per actor, in the step the actor was marked dead):
//! 1. die cue
//! 2. deferred release of the actor's cues (owned task on a holder entity)
//! 3. loot: count rolled once in [min, min + max), coins scattered at the body
//! 4. cancel the actor's own pending tasks
//! 5. `enemyDied`
//! 6. despawn (the player stays in the world, dead, until the arena is torn down)

use std::collections::{BTreeSet, HashSet};
use std::time::Duration;

use bevy::prelude::*;

use crate::bridge::{ActorSounds, AudioCommand, CueAllocator, CueHandle, CueId, KillIntent, TeardownArena};
use crate::combat::components::{DeferredCueRelease, EnemyContact, OverlapRetrigger, Weapon};
use crate::combat::DeathTriggered;
use crate::components::{Actor, ArenaEntity, Enemy, Health, Lifecycle, Player, Position, Velocity};
use crate::config::CombatConfig;
use crate::loot::{scatter_velocity, spawn_coin, Coin, LootDrop};
use crate::signals::GameSignal;
use crate::tasks::{ScheduledTasks, TaskFired, TaskKind};
use crate::DeterministicRng;

/// Событие: death sequence завершён (актор удалён или, для игрока, обездвижен)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActorDied {
    pub entity: Entity,
    pub position: Vec2,
    pub loot_dropped: u32,
}

type Dying = (
    &'static mut Lifecycle,
    &'static mut Health,
    &'static Position,
    Option<&'static Actor>,
    Option<&'static mut ScheduledTasks>,
    Option<&'static mut Velocity>,
    Option<&'static ActorSounds>,
    Option<&'static Weapon>,
    Option<&'static LootDrop>,
    Has<Player>,
    Has<Enemy>,
);

/// System: DeathTriggered / KillIntent → death sequence (same step)
pub fn run_death_sequences(
    mut commands: Commands,
    mut deaths: EventReader<DeathTriggered>,
    mut kills: EventReader<KillIntent>,
    mut actors: Query<Dying>,
    config: Res<CombatConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut allocator: ResMut<CueAllocator>,
    mut audio: EventWriter<AudioCommand>,
    mut signals: EventWriter<GameSignal>,
    mut died_events: EventWriter<ActorDied>,
) {
    // Порядок: сначала уже помеченные (контакты), потом внешние kill-запросы
    let mut queue: Vec<Entity> = deaths.read().map(|death| death.entity).collect();

    for kill in kills.read() {
        let Ok((mut lifecycle, mut health, ..)) = actors.get_mut(kill.entity) else {
            continue;
        };

        if !lifecycle.mark_dead() {
            crate::logger::log(&format!("⚠️ KillIntent for {:?} ignored: already dead", kill.entity));
            continue;
        }

        health.current = 0;
        queue.push(kill.entity);
    }

    let mut handled: HashSet<Entity> = HashSet::new();

    for entity in queue {
        if !handled.insert(entity) {
            crate::logger::log(&format!("⚠️ Double death of {:?} ignored", entity));
            continue;
        }

        let Ok((_, health, position, actor, tasks, velocity, sounds, weapon, loot, is_player, is_enemy)) =
            actors.get_mut(entity)
        else {
            continue;
        };

        let position = position.0;
        let name = actor.map(|actor| actor.name.clone()).unwrap_or_else(|| format!("{:?}", entity));

        // 1. Death cue
        if let Some(sounds) = sounds {
            audio.write(AudioCommand::Play {
                handle: sounds.die,
                cue: CueId::Die,
            });
        }

        // 2. Deferred release of everything the body owned (the player keeps its cues)
        if !is_player {
            let mut handles: Vec<CueHandle> = sounds.map(|s| s.handles().to_vec()).unwrap_or_default();
            if let Some(weapon) = weapon {
                handles.push(weapon.fire_cue);
            }

            if !handles.is_empty() {
                let mut release_tasks = ScheduledTasks::default();
                release_tasks.schedule_once(
                    TaskKind::ReleaseCues,
                    Duration::from_millis(config.lifecycle.cue_release_delay_ms),
                );
                commands.spawn((
                    DeferredCueRelease {
                        actor: name.clone(),
                        handles,
                    },
                    release_tasks,
                ));
            }
        }

        // 3. Loot (count fixed before the loop)
        let mut loot_dropped = 0;
        if let Some(loot) = loot {
            loot_dropped = loot.roll(&mut rng.rng);
            for _ in 0..loot_dropped {
                let push = scatter_velocity(&mut rng.rng, config.coin.scatter_speed);
                spawn_coin(&mut commands, &mut allocator, &config.coin, position, push);
            }
        }

        // 4. Cancel own timers
        if let Some(mut tasks) = tasks {
            let cancelled = tasks.cancel_all();
            if cancelled > 0 {
                crate::logger::log(&format!("⏹️ {}: cancelled {} pending task(s)", name, cancelled));
            }
        }

        // 5. enemyDied
        if is_enemy {
            signals.write(GameSignal::EnemyDied { enemy: entity, position });
        }

        // 6. Remove from the simulation
        if is_player {
            if let Some(mut velocity) = velocity {
                velocity.0 = Vec2::ZERO;
            }
            crate::logger::log_info(&format!("💀 Player {} died (HP {})", name, health.current));
        } else {
            commands.entity(entity).despawn();
            crate::logger::log_info(&format!("💀 {} died at {:?}, dropped {} coin(s)", name, position, loot_dropped));
        }

        died_events.write(ActorDied {
            entity,
            position,
            loot_dropped,
        });
    }
}

/// System: dead actors drop out of every per-target re-trigger map
pub fn forget_dead_targets(
    mut died: EventReader<ActorDied>,
    mut overlaps: Query<&mut OverlapRetrigger>,
    mut enemy_contacts: Query<&mut EnemyContact>,
) {
    for death in died.read() {
        for mut retrigger in overlaps.iter_mut() {
            retrigger.forget(death.entity);
        }
        for mut contact in enemy_contacts.iter_mut() {
            contact.retrigger.forget(death.entity);
        }
    }
}

/// System: ReleaseCues task fired → StopAndRelease every held cue
pub fn release_deferred_cues(
    mut commands: Commands,
    mut fired: EventReader<TaskFired>,
    holders: Query<&DeferredCueRelease>,
    mut audio: EventWriter<AudioCommand>,
) {
    for task in fired.read() {
        if task.kind != TaskKind::ReleaseCues {
            continue;
        }

        let Ok(holder) = holders.get(task.owner) else {
            continue;
        };

        for handle in &holder.handles {
            audio.write(AudioCommand::StopAndRelease { handle: *handle });
        }

        crate::logger::log(&format!("🔇 Released {} cue(s) of {}", holder.handles.len(), holder.actor));
        if let Ok(mut entity) = commands.get_entity(task.owner) {
            entity.despawn();
        }
    }
}

/// System: early arena teardown
///
/// Cancels every pending task, releases every owned cue exactly once
/// (including cues still waiting on a deferred release) and despawns every
/// arena entity.
pub fn teardown_arena(
    mut commands: Commands,
    mut teardown: EventReader<TeardownArena>,
    mut all_tasks: Query<&mut ScheduledTasks>,
    sounds: Query<&ActorSounds>,
    holders: Query<&DeferredCueRelease>,
    weapons: Query<&Weapon>,
    coins: Query<&Coin>,
    arena: Query<Entity, With<ArenaEntity>>,
    mut audio: EventWriter<AudioCommand>,
) {
    if teardown.read().count() == 0 {
        return;
    }

    let cancelled: usize = all_tasks.iter_mut().map(|mut tasks| tasks.cancel_all()).sum();

    let mut handles: BTreeSet<CueHandle> = BTreeSet::new();
    handles.extend(sounds.iter().flat_map(|s| s.handles()));
    handles.extend(holders.iter().flat_map(|h| h.handles.iter().copied()));
    handles.extend(weapons.iter().map(|w| w.fire_cue));
    handles.extend(coins.iter().map(|c| c.ding));

    for handle in &handles {
        audio.write(AudioCommand::StopAndRelease { handle: *handle });
    }

    let mut despawned = 0;
    for entity in arena.iter() {
        commands.entity(entity).despawn();
        despawned += 1;
    }

    crate::logger::log_info(&format!(
        "🧹 Arena torn down: {} task(s) cancelled, {} cue(s) released, {} entit(ies) despawned",
        cancelled,
        handles.len(),
        despawned
    ));
}
