//! Tests for the death sequence, deferred cue release and arena teardown.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use bevy::prelude::*;

    use crate::bridge::{ActorSounds, AudioCommand, CueHandle, CueId, KillIntent, PlayerMoveIntent, TeardownArena};
    use crate::combat::components::DeferredCueRelease;
    use crate::combat::ActorDied;
    use crate::components::{ArenaEntity, Lifecycle, Velocity};
    use crate::config::EnemyConfig;
    use crate::loot::Coin;
    use crate::signals::{GameSignal, SignalKind};
    use crate::spawn::{spawn_destructible, spawn_enemy, spawn_player, spawn_reticle};
    use crate::tasks::ScheduledTasks;
    use crate::test_support::{record_events, recorded, step_app, steps};

    fn count<T: Component>(app: &mut App) -> usize {
        app.world_mut().query::<&T>().iter(app.world()).count()
    }

    fn released(app: &App) -> Vec<CueHandle> {
        recorded::<AudioCommand>(app)
            .iter()
            .filter_map(|cmd| match cmd {
                AudioCommand::StopAndRelease { handle } => Some(*handle),
                _ => None,
            })
            .collect()
    }

    fn kill(app: &mut App, entity: Entity) {
        app.world_mut().send_event(KillIntent { entity });
    }

    #[test]
    fn test_enemy_death_sequence() {
        let mut app = step_app();
        record_events::<ActorDied>(&mut app);
        record_events::<AudioCommand>(&mut app);
        record_events::<GameSignal>(&mut app);

        let ogre = EnemyConfig::ogre();
        let enemy = spawn_enemy(app.world_mut(), &ogre, Vec2::new(50.0, 50.0));
        let sounds = app.world().get::<ActorSounds>(enemy).copied();

        kill(&mut app, enemy);
        app.update();

        // Despawned in the same step
        assert!(app.world().get_entity(enemy).is_err());

        // Loot fixed once in [5, 15)
        let died = recorded::<ActorDied>(&app);
        assert_eq!(died.len(), 1);
        let dropped = died[0].loot_dropped;
        assert!((5..15).contains(&dropped), "dropped {}", dropped);
        assert_eq!(count::<Coin>(&mut app), dropped as usize);

        // Die cue, enemyDied with the body position
        assert!(recorded::<AudioCommand>(&app)
            .iter()
            .any(|cmd| matches!(cmd, AudioCommand::Play { cue: CueId::Die, .. })));
        let enemy_died: Vec<_> = recorded::<GameSignal>(&app)
            .iter()
            .filter(|s| s.kind() == SignalKind::EnemyDied)
            .cloned()
            .collect();
        assert_eq!(
            enemy_died,
            vec![GameSignal::EnemyDied {
                enemy,
                position: Vec2::new(50.0, 50.0)
            }]
        );

        // Audio survives the body until the release delay
        assert_eq!(count::<DeferredCueRelease>(&mut app), 1);
        assert!(released(&app).is_empty());

        steps(&mut app, 600);

        let expected: HashSet<CueHandle> = sounds.map(|s| s.handles().into_iter().collect()).unwrap_or_default();
        let got: HashSet<CueHandle> = released(&app).into_iter().collect();
        assert_eq!(expected.len(), 4);
        assert!(expected.is_subset(&got));
        assert_eq!(count::<DeferredCueRelease>(&mut app), 0);
    }

    #[test]
    fn test_double_kill_runs_sequence_once() {
        let mut app = step_app();
        record_events::<ActorDied>(&mut app);
        record_events::<GameSignal>(&mut app);

        let enemy = spawn_enemy(app.world_mut(), &EnemyConfig::ogre(), Vec2::ZERO);

        kill(&mut app, enemy);
        kill(&mut app, enemy);
        app.update();
        kill(&mut app, enemy);
        app.update();

        let died = recorded::<ActorDied>(&app).to_vec();
        assert_eq!(died.len(), 1);
        assert_eq!(count::<DeferredCueRelease>(&mut app), 1);

        // One enemyDied, one batch of loot
        let enemy_died = recorded::<GameSignal>(&app)
            .iter()
            .filter(|s| s.kind() == SignalKind::EnemyDied)
            .count();
        assert_eq!(enemy_died, 1);
        assert_eq!(count::<Coin>(&mut app), died[0].loot_dropped as usize);
    }

    #[test]
    fn test_death_cancels_pending_tasks() {
        let mut app = step_app();

        let enemy = spawn_enemy(app.world_mut(), &EnemyConfig::ogre(), Vec2::ZERO);
        let pending = app.world().get::<ScheduledTasks>(enemy).map_or(0, ScheduledTasks::len);
        assert_eq!(pending, 1);

        kill(&mut app, enemy);
        app.update();

        // Only the release holder keeps a task
        let tasks: usize = app
            .world_mut()
            .query::<&ScheduledTasks>()
            .iter(app.world())
            .map(ScheduledTasks::len)
            .sum();
        assert_eq!(tasks, 1);
    }

    #[test]
    fn test_player_death_keeps_body_and_blocks_input() {
        let mut app = step_app();
        record_events::<GameSignal>(&mut app);

        let reticle = spawn_reticle(app.world_mut(), Vec2::new(100.0, 0.0));
        let player = spawn_player(app.world_mut(), Vec2::ZERO, reticle);
        app.world_mut().entity_mut(player).insert(Velocity(Vec2::new(300.0, 0.0)));

        kill(&mut app, player);
        app.update();

        assert_eq!(app.world().get::<Lifecycle>(player), Some(&Lifecycle::Dead));
        assert_eq!(app.world().get::<Velocity>(player).map(|v| v.0), Some(Vec2::ZERO));
        assert_eq!(count::<DeferredCueRelease>(&mut app), 0);
        assert!(recorded::<GameSignal>(&app)
            .iter()
            .all(|s| s.kind() != SignalKind::EnemyDied));

        app.world_mut().send_event(PlayerMoveIntent {
            player,
            direction: Vec2::X,
        });
        app.update();
        assert_eq!(app.world().get::<Velocity>(player).map(|v| v.0), Some(Vec2::ZERO));
    }

    #[test]
    fn test_destructible_dies_without_loot_or_signal() {
        let mut app = step_app();
        record_events::<ActorDied>(&mut app);
        record_events::<GameSignal>(&mut app);

        let crate_entity = spawn_destructible(app.world_mut(), Vec2::ZERO, 20);

        kill(&mut app, crate_entity);
        app.update();

        assert!(app.world().get_entity(crate_entity).is_err());
        assert_eq!(recorded::<ActorDied>(&app)[0].loot_dropped, 0);
        assert_eq!(count::<Coin>(&mut app), 0);
        assert!(recorded::<GameSignal>(&app).is_empty());
    }

    #[test]
    fn test_teardown_releases_every_cue_once() {
        let mut app = step_app();
        record_events::<AudioCommand>(&mut app);

        let ogre = EnemyConfig::ogre();
        let alive = spawn_enemy(app.world_mut(), &ogre, Vec2::new(1000.0, 0.0));
        let doomed = spawn_enemy(app.world_mut(), &ogre, Vec2::ZERO);

        kill(&mut app, doomed);
        app.update();
        assert!(app.world().get_entity(alive).is_ok());

        // Coins of the dead ogre own a ding cue each
        let coin_cues = count::<Coin>(&mut app);

        app.world_mut().send_event(TeardownArena);
        app.update();

        let handles = released(&app);
        let unique: HashSet<CueHandle> = handles.iter().copied().collect();
        assert_eq!(handles.len(), unique.len(), "a cue was released twice");
        assert_eq!(handles.len(), 4 + 4 + coin_cues);
        assert_eq!(count::<ArenaEntity>(&mut app), 0);

        // Deferred release was cancelled with its holder
        steps(&mut app, 600);
        assert_eq!(released(&app).len(), handles.len());
    }
}
