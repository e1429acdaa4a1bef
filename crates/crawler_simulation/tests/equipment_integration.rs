//! Equipment integration: slot clicks, stackables, weapon pickups

mod common;

use bevy::prelude::*;
use common::*;
use crawler_simulation::bridge::{AudioCommand, Contact, SlotClick, UiNotification};
use crawler_simulation::spawn::{spawn_player, spawn_reticle, spawn_weapon_pickup};
use crawler_simulation::*;

fn armed_player(app: &mut App) -> Entity {
    let world = app.world_mut();
    let reticle = spawn_reticle(world, Vec2::new(100.0, 0.0));
    spawn_player(world, Vec2::ZERO, reticle)
}

fn held(app: &App, player: Entity) -> Option<String> {
    app.world().get::<Weapon>(player).map(|w| w.name().to_string())
}

fn stock(app: &mut App, player: Entity, item: SlotItem) -> Option<usize> {
    app.world_mut()
        .get_mut::<Inventory>(player)
        .and_then(|mut inventory| inventory.store(item))
}

fn weapon_changes(app: &App) -> usize {
    recorded::<UiNotification>(app)
        .iter()
        .filter(|n| matches!(n, UiNotification::WeaponChanged { .. }))
        .count()
}

fn click(app: &mut App, owner: Entity, slot_index: usize) {
    send(app, SlotClick { owner, slot_index });
    app.update();
}

#[test]
fn test_slot_click_swaps_weapon_and_releases_old_cue() {
    let mut app = test_app(1);
    record_events::<UiNotification>(&mut app);
    record_events::<AudioCommand>(&mut app);

    let player = armed_player(&mut app);
    let old_cue = app.world().get::<Weapon>(player).map(|w| w.fire_cue);
    let slot = stock(&mut app, player, SlotItem::Weapon {
        config: WeaponConfig::flamethrower(),
    });
    assert_eq!(slot, Some(1));

    click(&mut app, player, 1);

    assert_eq!(held(&app, player).as_deref(), Some("flamethrower"));
    assert_eq!(weapon_changes(&app), 1);
    let released: Vec<_> = recorded::<AudioCommand>(&app)
        .into_iter()
        .filter_map(|cmd| match cmd {
            AudioCommand::StopAndRelease { handle } => Some(handle),
            _ => None,
        })
        .collect();
    assert_eq!(released.len(), 1);
    assert_eq!(Some(released[0]), old_cue);

    // Descriptor stays in the slot, new weapon aims at the same reticle
    let inventory = app.world().get::<Inventory>(player).cloned();
    assert!(inventory.is_some_and(|inv| inv.slot(1).is_some_and(|s| !s.is_empty())));
    let aim = app.world().get::<Aim>(player).map(|a| a.reticle);
    assert_eq!(app.world().get::<Weapon>(player).and_then(|w| w.target), aim);

    // Same weapon again → nothing happens
    click(&mut app, player, 1);
    assert_eq!(weapon_changes(&app), 1);

    // Back to the popper
    click(&mut app, player, 0);
    assert_eq!(held(&app, player).as_deref(), Some("popper"));
    assert_eq!(weapon_changes(&app), 2);
}

#[test]
fn test_stackable_pops_one_unit_per_click() {
    let mut app = test_app(2);
    record_events::<ItemConsumed>(&mut app);
    record_events::<UiNotification>(&mut app);

    let player = armed_player(&mut app);
    let slot = stock(&mut app, player, SlotItem::Stackable {
        name: "potion".to_string(),
        count: 2,
    });
    assert_eq!(slot, Some(1));

    click(&mut app, player, 1);
    click(&mut app, player, 1);
    click(&mut app, player, 1);

    let consumed = recorded::<ItemConsumed>(&app);
    assert_eq!(consumed.len(), 2);
    assert!(consumed.iter().all(|c| c.owner == player && c.item == "potion"));

    let refreshes = recorded::<UiNotification>(&app)
        .iter()
        .filter(|n| matches!(n, UiNotification::InventoryChanged { .. }))
        .count();
    assert_eq!(refreshes, 2);

    // Weapon untouched
    assert_eq!(held(&app, player).as_deref(), Some("popper"));
}

#[test]
fn test_empty_and_invalid_slots_are_ignored() {
    let mut app = test_app(3);
    record_events::<UiNotification>(&mut app);
    record_events::<ItemConsumed>(&mut app);

    let player = armed_player(&mut app);

    click(&mut app, player, 5);
    click(&mut app, player, 99);

    assert!(recorded::<UiNotification>(&app).is_empty());
    assert!(recorded::<ItemConsumed>(&app).is_empty());
    assert_eq!(held(&app, player).as_deref(), Some("popper"));
}

#[test]
fn test_pickup_overlap_equips_and_pickup_stays() {
    let mut app = test_app(4);
    record_events::<UiNotification>(&mut app);

    let player = armed_player(&mut app);
    let pickup = spawn_weapon_pickup(app.world_mut(), Vec2::new(30.0, 0.0), WeaponConfig::flamethrower());

    send(&mut app, Contact::new(player, pickup));
    app.update();

    assert_eq!(held(&app, player).as_deref(), Some("flamethrower"));
    assert!(app.world().get_entity(pickup).is_ok());
    assert_eq!(weapon_changes(&app), 1);

    // Still standing on it
    send(&mut app, Contact::new(pickup, player));
    app.update();
    assert_eq!(weapon_changes(&app), 1);
}
