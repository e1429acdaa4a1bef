//! Headless симуляция Club Crawler
//!
//! Запускает Bevy App без рендера: игрок стреляет по ближайшему огру,
//! примитивный детектор контактов играет роль хоста.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crawler_simulation::bridge::{Contact, FireCommand};
use crawler_simulation::spawn::{spawn_enemy, spawn_player, spawn_reticle, spawn_wall, spawn_weapon_pickup};
use crawler_simulation::{
    create_headless_app, log_info, BodyCategory, BodyRadius, CombatConfig, CombatSet, Enemy, GameStats, Lifecycle,
    Player, Position, Reticle, WeaponConfig,
};

/// Contact radius for bodies without a BodyRadius (walls, pickups, coins)
const DEFAULT_CONTACT_RADIUS: f32 = 12.0;

/// Host stand-in: every pair of registered bodies closer than their radii overlaps
fn detect_contacts(bodies: Query<(Entity, &Position, &BodyCategory, Option<&BodyRadius>)>, mut contacts: EventWriter<Contact>) {
    let bodies: Vec<_> = bodies.iter().collect();

    for (i, (a, pos_a, cat_a, radius_a)) in bodies.iter().enumerate() {
        for (b, pos_b, cat_b, radius_b) in bodies.iter().skip(i + 1) {
            // Стены и предметы между собой не сталкиваются
            if matches!(cat_a, BodyCategory::Wall | BodyCategory::Pickup | BodyCategory::Loot)
                && matches!(cat_b, BodyCategory::Wall | BodyCategory::Pickup | BodyCategory::Loot)
            {
                continue;
            }

            let reach = radius_a.map_or(DEFAULT_CONTACT_RADIUS, |r| r.0) + radius_b.map_or(DEFAULT_CONTACT_RADIUS, |r| r.0);
            if pos_a.0.distance(pos_b.0) < reach {
                contacts.write(Contact::new(*a, *b));
            }
        }
    }
}

/// Reticle follows the nearest live enemy
fn aim_at_nearest_enemy(
    mut reticles: Query<&mut Position, With<Reticle>>,
    players: Query<&Position, (With<Player>, Without<Reticle>)>,
    enemies: Query<(&Position, &Lifecycle), (With<Enemy>, Without<Reticle>)>,
) {
    let Ok(player) = players.single() else {
        return;
    };

    let nearest = enemies
        .iter()
        .filter(|(_, lifecycle)| !lifecycle.is_dead())
        .map(|(position, _)| position.0)
        .min_by(|a, b| a.distance(player.0).total_cmp(&b.distance(player.0)));

    if let Some(target) = nearest {
        for mut reticle in reticles.iter_mut() {
            reticle.0 = target;
        }
    }
}

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    log_info(&format!("Starting Club Crawler headless simulation (seed: {})", seed));

    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_micros(16_667)))
        .add_systems(
            FixedUpdate,
            (
                aim_at_nearest_enemy.in_set(CombatSet::Input),
                detect_contacts.after(CombatSet::Motion).before(CombatSet::Contacts),
            ),
        );

    let enemy_config = app
        .world()
        .get_resource::<CombatConfig>()
        .map(|config| config.enemy.clone())
        .unwrap_or_default();
    let world = app.world_mut();

    let reticle = spawn_reticle(world, Vec2::new(400.0, 0.0));
    let player = spawn_player(world, Vec2::ZERO, reticle);
    for x in [-600.0, 0.0, 600.0] {
        spawn_enemy(world, &enemy_config, Vec2::new(x, 500.0));
    }
    for x in (-10..=10).map(|i| i as f32 * 64.0) {
        spawn_wall(world, Vec2::new(x, -400.0));
    }
    spawn_weapon_pickup(world, Vec2::new(0.0, 40.0), WeaponConfig::flamethrower());

    // Запускаем 1000 тиков симуляции, игрок держит курок
    for tick in 0..1000 {
        app.world_mut().send_event(FireCommand { wielder: player });
        app.update();

        if tick % 100 == 0 {
            let entity_count = app.world().entities().len();
            let score = app.world().get_resource::<GameStats>().map_or(0, |stats| stats.score);
            log_info(&format!("Tick {}: {} entities, score {}", tick, entity_count, score));
        }
    }

    log_info("Simulation complete!");
}
