//! Shared helpers for integration tests
//!
//! Каждый `app.update()` = ровно один fixed step (10 ms).

#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use crawler_simulation::create_headless_app;

pub const STEP: Duration = Duration::from_millis(10);

/// Every event of type `T` seen so far
#[derive(Resource)]
pub struct Recorded<T: Event + Clone>(pub Vec<T>);

impl<T: Event + Clone> Default for Recorded<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn record<T: Event + Clone>(mut events: EventReader<T>, mut recorded: ResMut<Recorded<T>>) {
    recorded.0.extend(events.read().cloned());
}

/// Headless simulation app, stepped manually in 10 ms increments
pub fn test_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(Time::<Fixed>::from_duration(STEP))
        .insert_resource(TimeUpdateStrategy::ManualDuration(STEP));

    // Первый update: нулевой delta
    app.update();
    app
}

pub fn record_events<T: Event + Clone>(app: &mut App) {
    app.init_resource::<Recorded<T>>().add_systems(Last, record::<T>);
}

pub fn recorded<T: Event + Clone>(app: &App) -> Vec<T> {
    app.world()
        .get_resource::<Recorded<T>>()
        .map(|r| r.0.clone())
        .unwrap_or_default()
}

pub fn advance(app: &mut App, steps: usize) {
    for _ in 0..steps {
        app.update();
    }
}

pub fn send<E: Event>(app: &mut App, event: E) {
    app.world_mut().send_event(event);
}

pub fn count<T: Component>(app: &mut App) -> usize {
    app.world_mut().query::<&T>().iter(app.world()).count()
}

pub fn entities_with<T: Component>(app: &mut App) -> Vec<Entity> {
    let mut entities: Vec<Entity> = app
        .world_mut()
        .query_filtered::<Entity, With<T>>()
        .iter(app.world())
        .collect();
    entities.sort();
    entities
}
