//! Contact resolution: host contacts → category policy → damage.
//!
//! Damage and the death mark happen in the same step that saw the contact:
//! once `Lifecycle` is `Dead`, later contacts in the same step skip the actor.

use std::collections::HashSet;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::bridge::{ActorSounds, AudioCommand, Contact, CueId};
use crate::combat::collision::ContactPolicy;
use crate::combat::components::{EnemyContact, OverlapRetrigger, Projectile};
use crate::combat::{DamageDealer, DamageDealt, DamageOutcome, Damageable, DeathTriggered};
use crate::components::{BodyCategory, Health, Lifecycle, Player, Velocity};
use crate::signals::GameSignal;

pub type DamageTargets<'w, 's> =
    Query<'w, 's, (&'static mut Health, &'static mut Lifecycle, Option<&'static ActorSounds>, Has<Player>)>;

/// Event sinks of one damage application
#[derive(SystemParam)]
pub struct DamageSinks<'w> {
    pub damage: EventWriter<'w, DamageDealt>,
    pub deaths: EventWriter<'w, DeathTriggered>,
    pub audio: EventWriter<'w, AudioCommand>,
    pub signals: EventWriter<'w, GameSignal>,
}

/// Applies `amount` from `source` to `target`.
///
/// Dead or non-damageable targets are skipped (returns false). A lethal hit
/// marks the target dead immediately and emits `DeathTriggered` once.
pub fn apply_damage(
    source: Entity,
    target: Entity,
    amount: u32,
    targets: &mut DamageTargets,
    sinks: &mut DamageSinks,
) -> bool {
    let Ok((mut health, mut lifecycle, sounds, is_player)) = targets.get_mut(target) else {
        return false;
    };

    if lifecycle.is_dead() {
        return false;
    }

    let outcome = Damageable::take_damage(&mut *health, amount);

    if let Some(sounds) = sounds {
        sinks.audio.write(AudioCommand::Play {
            handle: sounds.take_damage,
            cue: CueId::TakeDamage,
        });
    }

    sinks.damage.write(DamageDealt {
        source,
        target,
        amount,
        remaining: health.current,
    });

    if is_player {
        sinks.signals.write(GameSignal::health_change(target, &health));
    }

    crate::logger::log(&format!(
        "💥 {:?} → {:?}: {} damage (HP: {}/{})",
        source, target, amount, health.current, health.max
    ));

    if matches!(outcome, DamageOutcome::Killed | DamageOutcome::AlreadyDead) && lifecycle.mark_dead() {
        sinks.deaths.write(DeathTriggered { entity: target });
        crate::logger::log_info(&format!("☠️ {:?} killed by {:?}", target, source));
    }

    true
}

/// System: обработка Contact событий от world layer
pub fn resolve_contacts(
    mut commands: Commands,
    mut contacts: EventReader<Contact>,
    mut projectiles: Query<(&mut Projectile, &mut Velocity, &mut OverlapRetrigger)>,
    mut enemy_contacts: Query<&mut EnemyContact>,
    bodies: Query<&BodyCategory>,
    mut targets: DamageTargets,
    time: Res<Time<Fixed>>,
    mut sinks: DamageSinks,
) {
    let now = time.elapsed();

    // Projectiles despawned in this step (commands are deferred)
    let mut spent: HashSet<Entity> = HashSet::new();

    for contact in contacts.read() {
        let (projectile_entity, other) = if projectiles.contains(contact.a) {
            (contact.a, contact.b)
        } else if projectiles.contains(contact.b) {
            (contact.b, contact.a)
        } else {
            resolve_body_contact(contact, &mut enemy_contacts, &mut targets, now, &mut sinks);
            continue;
        };

        if spent.contains(&projectile_entity) {
            continue;
        }

        let Ok((mut projectile, mut velocity, mut retrigger)) = projectiles.get_mut(projectile_entity) else {
            continue;
        };

        // Self-hit: пропускаем
        if other == projectile.owner {
            continue;
        }

        let Ok(category) = bodies.get(other) else {
            continue;
        };

        match projectile.categories.policy(category.mask()) {
            ContactPolicy::Ignore => {}
            ContactPolicy::Hit if *category == BodyCategory::Wall => {
                if projectile.destroy_on_wall_touch {
                    crate::logger::log(&format!("🧱 {:?} destroyed on wall {:?}", projectile_entity, other));
                    commands.entity(projectile_entity).despawn();
                    spent.insert(projectile_entity);
                } else if !projectile.stopped {
                    crate::logger::log(&format!("🧱 {:?} stopped by wall {:?}", projectile_entity, other));
                    velocity.0 = Vec2::ZERO;
                    projectile.stopped = true;
                }
            }
            ContactPolicy::Hit => {
                apply_damage(projectile_entity, other, projectile.damage(), &mut targets, &mut sinks);
                commands.entity(projectile_entity).despawn();
                spent.insert(projectile_entity);
            }
            ContactPolicy::Overlap => {
                if *category == BodyCategory::Wall {
                    continue;
                }

                if is_alive(&targets, other) && retrigger.try_trigger(other, now) {
                    apply_damage(projectile_entity, other, projectile.damage(), &mut targets, &mut sinks);
                }
            }
        }
    }
}

/// Enemy body touching the player: contact damage, throttled per target
fn resolve_body_contact(
    contact: &Contact,
    enemy_contacts: &mut Query<&mut EnemyContact>,
    targets: &mut DamageTargets,
    now: std::time::Duration,
    sinks: &mut DamageSinks,
) {
    let (enemy, player) = if enemy_contacts.contains(contact.a) && is_player(targets, contact.b) {
        (contact.a, contact.b)
    } else if enemy_contacts.contains(contact.b) && is_player(targets, contact.a) {
        (contact.b, contact.a)
    } else {
        return;
    };

    if !is_alive(targets, enemy) || !is_alive(targets, player) {
        return;
    }

    let Ok(mut contact_damage) = enemy_contacts.get_mut(enemy) else {
        return;
    };

    if !contact_damage.retrigger.try_trigger(player, now) {
        return;
    }

    if let Ok((_, _, Some(sounds), _)) = targets.get(enemy) {
        sinks.audio.write(AudioCommand::Play {
            handle: sounds.deal_damage,
            cue: CueId::DealDamage,
        });
    }

    apply_damage(enemy, player, contact_damage.damage(), targets, sinks);
}

fn is_player(targets: &DamageTargets, entity: Entity) -> bool {
    targets.get(entity).is_ok_and(|(.., player)| player)
}

fn is_alive(targets: &DamageTargets, entity: Entity) -> bool {
    targets.get(entity).is_ok_and(|(_, lifecycle, _, _)| !lifecycle.is_dead())
}
