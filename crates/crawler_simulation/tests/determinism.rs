//! Determinism test: same seed → same world
//!
//! Wandering (random velocity) и loot roll идут через `DeterministicRng`,
//! поэтому два прогона с одним seed обязаны совпасть побайтно.

mod common;

use bevy::prelude::*;
use common::*;
use crawler_simulation::bridge::{Contact, KillIntent};
use crawler_simulation::spawn::{spawn_enemy, spawn_player, spawn_reticle};
use crawler_simulation::*;

fn run_arena(seed: u64, steps: usize) -> Vec<u8> {
    let mut app = test_app(seed);

    let (player, doomed) = {
        let world = app.world_mut();
        let reticle = spawn_reticle(world, Vec2::new(100.0, 0.0));
        let player = spawn_player(world, Vec2::ZERO, reticle);

        // Far away: out of sense range → random wandering
        let ogre = EnemyConfig::ogre();
        spawn_enemy(world, &ogre, Vec2::new(2000.0, 0.0));
        spawn_enemy(world, &ogre, Vec2::new(-2000.0, 500.0));
        let doomed = spawn_enemy(world, &ogre, Vec2::new(0.0, 2500.0));
        (player, doomed)
    };

    advance(&mut app, 100);

    // Loot roll + coin scatter
    send(&mut app, KillIntent { entity: doomed });
    app.update();
    for coin in entities_with::<Coin>(&mut app) {
        send(&mut app, Contact::new(coin, player));
    }

    advance(&mut app, steps);

    world_snapshot::<Position>(app.world_mut())
}

#[test]
fn test_same_seed_same_world() {
    let first = run_arena(42, 300);
    let second = run_arena(42, 300);

    assert!(!first.is_empty());
    assert_eq!(first, second, "same seed diverged");
}

#[test]
fn test_different_seed_different_world() {
    let first = run_arena(1, 300);
    let second = run_arena(2, 300);

    assert_ne!(first, second);
}
