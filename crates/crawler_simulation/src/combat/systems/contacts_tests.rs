//! Tests for contact resolution (category policy, damage, death mark).

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::prelude::*;

    use crate::bridge::{ActorSounds, AudioCommand, Contact, CueHandle, CueId, KillIntent};
    use crate::combat::components::{EnemyContact, OverlapRetrigger, Projectile};
    use crate::combat::{DamageDealt, DeathTriggered};
    use crate::components::{Actor, BodyCategory, Enemy, Health, Lifecycle, Player, Velocity};
    use crate::config::WeaponConfig;
    use crate::signals::GameSignal;
    use crate::test_support::{record_events, recorded, step_app, steps};

    fn spawn_enemy_dummy(app: &mut App, health: u32) -> Entity {
        app.world_mut()
            .spawn((Actor::named("dummy"), Enemy, Health::new(health), BodyCategory::Enemy))
            .id()
    }

    fn spawn_player_dummy(app: &mut App, health: u32) -> Entity {
        app.world_mut()
            .spawn((Actor::named("player"), Player, Health::new(health), BodyCategory::Player))
            .id()
    }

    fn spawn_shot(app: &mut App, owner: Entity, config: &WeaponConfig, velocity: Vec2) -> Entity {
        app.world_mut()
            .spawn((
                Projectile::from_weapon(owner, config),
                Velocity(velocity),
                BodyCategory::Projectile,
                OverlapRetrigger::new(Duration::from_millis(config.overlap_retrigger_ms)),
            ))
            .id()
    }

    fn send(app: &mut App, contact: Contact) {
        app.world_mut().send_event(contact);
    }

    fn health(app: &App, entity: Entity) -> u32 {
        app.world().get::<Health>(entity).map_or(0, |h| h.current)
    }

    #[test]
    fn test_bullet_hits_enemy_once_and_despawns() {
        let mut app = step_app();
        record_events::<DamageDealt>(&mut app);

        let shooter = spawn_player_dummy(&mut app, 100);
        let enemy = spawn_enemy_dummy(&mut app, 300);
        let bullet = spawn_shot(&mut app, shooter, &WeaponConfig::popper(), Vec2::ZERO);

        // Host reports the same contact twice in one step
        send(&mut app, Contact::new(bullet, enemy));
        send(&mut app, Contact::new(enemy, bullet));
        app.update();

        assert_eq!(health(&app, enemy), 290);
        assert!(app.world().get_entity(bullet).is_err());
        assert_eq!(recorded::<DamageDealt>(&app).len(), 1);
        assert_eq!(recorded::<DamageDealt>(&app)[0].remaining, 290);
    }

    #[test]
    fn test_bullet_destroyed_by_wall_flame_stopped() {
        let mut app = step_app();

        let shooter = spawn_player_dummy(&mut app, 100);
        let wall = app.world_mut().spawn(BodyCategory::Wall).id();
        let bullet = spawn_shot(&mut app, shooter, &WeaponConfig::popper(), Vec2::new(800.0, 0.0));
        let flame = spawn_shot(&mut app, shooter, &WeaponConfig::flamethrower(), Vec2::new(700.0, 0.0));

        send(&mut app, Contact::new(bullet, wall));
        send(&mut app, Contact::new(flame, wall));
        app.update();

        assert!(app.world().get_entity(bullet).is_err());
        let flame_state = app.world().get::<Projectile>(flame).map(|p| p.stopped);
        assert_eq!(flame_state, Some(true));
        assert_eq!(app.world().get::<Velocity>(flame).map(|v| v.0), Some(Vec2::ZERO));
    }

    #[test]
    fn test_self_hit_ignored() {
        let mut app = step_app();

        let shooter = spawn_player_dummy(&mut app, 100);
        // Flames overlap the player category, but never their own wielder
        let flame = spawn_shot(&mut app, shooter, &WeaponConfig::flamethrower(), Vec2::ZERO);

        send(&mut app, Contact::new(flame, shooter));
        app.update();

        assert_eq!(health(&app, shooter), 100);
        assert!(app.world().get_entity(flame).is_ok());
    }

    #[test]
    fn test_flame_overlap_retrigger_per_target() {
        let mut app = step_app();
        record_events::<DamageDealt>(&mut app);

        let shooter = spawn_player_dummy(&mut app, 100);
        let first = spawn_enemy_dummy(&mut app, 300);
        let second = spawn_enemy_dummy(&mut app, 300);
        let flame = spawn_shot(&mut app, shooter, &WeaponConfig::flamethrower(), Vec2::ZERO);

        // 11 steps × 10 ms: triggers at step 1 and step 11 (100 ms later)
        for _ in 0..11 {
            send(&mut app, Contact::new(flame, first));
            send(&mut app, Contact::new(flame, second));
            app.update();
        }

        assert_eq!(health(&app, first), 298);
        assert_eq!(health(&app, second), 298);
        assert_eq!(recorded::<DamageDealt>(&app).len(), 4);
        assert!(app.world().get_entity(flame).is_ok());
    }

    #[test]
    fn test_lethal_hit_marks_dead_in_same_step() {
        let mut app = step_app();
        record_events::<DamageDealt>(&mut app);
        record_events::<DeathTriggered>(&mut app);

        let shooter = spawn_player_dummy(&mut app, 100);
        let enemy = spawn_enemy_dummy(&mut app, 10);
        let first = spawn_shot(&mut app, shooter, &WeaponConfig::popper(), Vec2::ZERO);
        let second = spawn_shot(&mut app, shooter, &WeaponConfig::popper(), Vec2::ZERO);

        send(&mut app, Contact::new(first, enemy));
        send(&mut app, Contact::new(second, enemy));
        app.update();

        // Second bullet finds a dead target: consumed, no damage
        assert_eq!(recorded::<DamageDealt>(&app).len(), 1);
        assert_eq!(recorded::<DeathTriggered>(&app), &[DeathTriggered { entity: enemy }]);
        assert!(app.world().get_entity(first).is_err());
        assert!(app.world().get_entity(second).is_err());
        // Death sequence ran in the same step
        assert!(app.world().get_entity(enemy).is_err());
    }

    #[test]
    fn test_enemy_contact_damage_throttled() {
        let mut app = step_app();
        record_events::<GameSignal>(&mut app);
        record_events::<AudioCommand>(&mut app);

        let player = spawn_player_dummy(&mut app, 100);
        let enemy = spawn_enemy_dummy(&mut app, 300);
        let sounds = ActorSounds {
            deal_damage: CueHandle(100),
            take_damage: CueHandle(101),
            shout: CueHandle(102),
            die: CueHandle(103),
        };
        app.world_mut()
            .entity_mut(enemy)
            .insert((EnemyContact::new(5, Duration::from_millis(500)), sounds));

        // 60 steps = 600 ms of continuous contact → two ticks (t, t + 500 ms)
        for _ in 0..60 {
            send(&mut app, Contact::new(enemy, player));
            app.update();
        }

        assert_eq!(health(&app, player), 90);

        let health_changes: Vec<_> = recorded::<GameSignal>(&app)
            .iter()
            .filter(|signal| matches!(signal, GameSignal::HealthChange { .. }))
            .cloned()
            .collect();
        assert_eq!(
            health_changes,
            vec![
                GameSignal::HealthChange { entity: player, current: 95, max: 100 },
                GameSignal::HealthChange { entity: player, current: 90, max: 100 },
            ]
        );

        let deal_cues = recorded::<AudioCommand>(&app)
            .iter()
            .filter(|cmd| matches!(cmd, AudioCommand::Play { cue: CueId::DealDamage, .. }))
            .count();
        assert_eq!(deal_cues, 2);
    }

    #[test]
    fn test_dead_actors_neither_deal_nor_take_damage() {
        let mut app = step_app();

        let player = spawn_player_dummy(&mut app, 100);
        let enemy = spawn_enemy_dummy(&mut app, 300);
        app.world_mut()
            .entity_mut(enemy)
            .insert((EnemyContact::new(5, Duration::from_millis(500)), Lifecycle::Dead));

        send(&mut app, Contact::new(enemy, player));
        steps(&mut app, 1);
        assert_eq!(health(&app, player), 100);

        // Dead player is not a damage target either (flames overlap the player)
        let flame = spawn_shot(&mut app, enemy, &WeaponConfig::flamethrower(), Vec2::ZERO);
        app.world_mut().entity_mut(player).insert(Lifecycle::Dead);
        send(&mut app, Contact::new(flame, player));
        steps(&mut app, 1);
        assert_eq!(health(&app, player), 100);
    }

    #[test]
    fn test_dead_targets_leave_retrigger_maps() {
        let mut app = step_app();

        let shooter = spawn_player_dummy(&mut app, 100);
        let enemy = spawn_enemy_dummy(&mut app, 300);
        let flame = spawn_shot(&mut app, shooter, &WeaponConfig::flamethrower(), Vec2::ZERO);
        let brute = spawn_enemy_dummy(&mut app, 300);
        app.world_mut()
            .entity_mut(brute)
            .insert(EnemyContact::new(5, Duration::from_millis(500)));

        send(&mut app, Contact::new(flame, enemy));
        send(&mut app, Contact::new(brute, shooter));
        app.update();

        let flame_tracks = |app: &App| app.world().get::<OverlapRetrigger>(flame).is_some_and(|r| r.tracks(enemy));
        let brute_tracks =
            |app: &App| app.world().get::<EnemyContact>(brute).is_some_and(|c| c.retrigger.tracks(shooter));
        assert!(flame_tracks(&app));
        assert!(brute_tracks(&app));

        app.world_mut().send_event(KillIntent { entity: enemy });
        app.world_mut().send_event(KillIntent { entity: shooter });
        app.update();

        assert!(!flame_tracks(&app));
        assert!(!brute_tracks(&app));
    }
}
