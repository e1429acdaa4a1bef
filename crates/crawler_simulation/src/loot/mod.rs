//! Loot: coins dropped by dying enemies, collected by the player for score
//!
//! Flow:
//! 1. Death sequence rolls `LootDrop` once → N coins at the death position
//! 2. Player overlaps a coin → score += value, `scoreChange`, ding cue,
//!    spin + a fresh scatter push
//! 3. Collected coin fades for `fade_ms` (FadeOut task) → despawn

use std::collections::HashSet;

use bevy::prelude::*;
use rand::Rng;

use crate::bridge::{AudioCommand, Contact, CueAllocator, CueHandle, CueId, VisualCommand};
use crate::components::{ArenaEntity, BodyCategory, Lifecycle, MovementTuning, Player, Position, Velocity};
use crate::config::{CombatConfig, CoinConfig};
use crate::signals::{GameSignal, GameStats};
use crate::tasks::{ScheduledTasks, TaskFired, TaskKind};
use crate::{CombatSet, DeterministicRng};

#[derive(Component, Debug, Clone)]
#[require(Position, Velocity, ScheduledTasks, ArenaEntity)]
pub struct Coin {
    pub value: u32,
    /// Set once on the first player overlap
    pub collected: bool,
    pub ding: CueHandle,
}

/// Loot table of an actor: count is drawn once from
/// `[min_coins, min_coins + max_coins)`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LootDrop {
    pub min_coins: u32,
    pub max_coins: u32,
}

impl LootDrop {
    pub fn roll<R: Rng>(&self, rng: &mut R) -> u32 {
        let upper = self.min_coins.saturating_add(self.max_coins);
        if upper <= self.min_coins {
            return self.min_coins;
        }
        rng.gen_range(self.min_coins..upper)
    }
}

/// Small random outward push, each axis in [-scatter, scatter)
pub fn scatter_velocity<R: Rng>(rng: &mut R, scatter: f32) -> Vec2 {
    if scatter <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(rng.gen_range(-scatter..scatter), rng.gen_range(-scatter..scatter))
}

pub fn spawn_coin(
    commands: &mut Commands,
    allocator: &mut CueAllocator,
    config: &CoinConfig,
    position: Vec2,
    velocity: Vec2,
) -> Entity {
    commands
        .spawn((
            Coin {
                value: config.value,
                collected: false,
                ding: allocator.allocate(),
            },
            Position(position),
            Velocity(velocity),
            MovementTuning {
                speed: 0.0,
                max_speed: config.scatter_speed * 2.0,
                velocity_increment: 0.0,
                mass: 0.05,
                drag: config.drag,
            },
            BodyCategory::Loot,
        ))
        .id()
}

/// System: player overlaps coin → score
pub fn collect_coins(
    mut contacts: EventReader<Contact>,
    mut coins: Query<(&mut Coin, &mut ScheduledTasks, &mut Velocity)>,
    players: Query<&Lifecycle, With<Player>>,
    config: Res<CombatConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut stats: ResMut<GameStats>,
    mut audio: EventWriter<AudioCommand>,
    mut visuals: EventWriter<VisualCommand>,
    mut signals: EventWriter<GameSignal>,
) {
    let mut collected_now: HashSet<Entity> = HashSet::new();

    for contact in contacts.read() {
        let (coin_entity, other) = if coins.contains(contact.a) {
            (contact.a, contact.b)
        } else if coins.contains(contact.b) {
            (contact.b, contact.a)
        } else {
            continue;
        };

        let player_alive = players.get(other).is_ok_and(|lifecycle| !lifecycle.is_dead());
        if !player_alive || collected_now.contains(&coin_entity) {
            continue;
        }

        let Ok((mut coin, mut tasks, mut velocity)) = coins.get_mut(coin_entity) else {
            continue;
        };

        if coin.collected {
            continue;
        }

        coin.collected = true;
        collected_now.insert(coin_entity);

        let score = stats.change_score(coin.value);
        signals.write(GameSignal::ScoreChange { score });
        audio.write(AudioCommand::Play {
            handle: coin.ding,
            cue: CueId::Ding,
        });
        velocity.0 = scatter_velocity(&mut rng.rng, config.coin.scatter_speed);
        visuals.write(VisualCommand::SetSpin {
            entity: coin_entity,
            degrees_per_sec: config.coin.spin_rate,
        });
        tasks.schedule_once(TaskKind::FadeOut, std::time::Duration::from_millis(config.coin.fade_ms));

        crate::logger::log(&format!("🪙 Coin {:?} collected (+{}) → score {}", coin_entity, coin.value, score));
    }
}

/// System: collected coin finished fading → release ding, despawn
pub fn despawn_faded_coins(
    mut commands: Commands,
    mut fired: EventReader<TaskFired>,
    coins: Query<&Coin>,
    mut audio: EventWriter<AudioCommand>,
) {
    for task in fired.read() {
        if task.kind != TaskKind::FadeOut {
            continue;
        }

        let Ok(coin) = coins.get(task.owner) else {
            continue;
        };

        audio.write(AudioCommand::StopAndRelease { handle: coin.ding });
        if let Ok(mut entity) = commands.get_entity(task.owner) {
            entity.despawn();
        }
    }
}

/// Loot Plugin
pub struct LootPlugin;

impl Plugin for LootPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (collect_coins, despawn_faded_coins).chain().in_set(CombatSet::Loot),
        );
    }
}
