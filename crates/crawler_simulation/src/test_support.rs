//! Helpers for system-level unit tests: a 10 ms step app + event recorder

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::SimulationPlugin;

pub const STEP: Duration = Duration::from_millis(10);

/// Every event of type `T` seen so far, in emission order
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

/// Headless app where each `app.update()` runs exactly one 10 ms fixed step
pub fn step_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins(SimulationPlugin);
    app.insert_resource(Time::<Fixed>::from_duration(STEP))
        .insert_resource(TimeUpdateStrategy::ManualDuration(STEP));

    // Первый update с нулевым delta
    app.update();
    app
}

pub fn record_events<T: Event + Clone>(app: &mut App) {
    app.init_resource::<Recorded<T>>().add_systems(Last, record::<T>);
}

pub fn recorded<T: Event + Clone>(app: &App) -> &[T] {
    app.world()
        .get_resource::<Recorded<T>>()
        .map(|r| r.0.as_slice())
        .unwrap_or(&[])
}

pub fn steps(app: &mut App, count: usize) {
    for _ in 0..count {
        app.update();
    }
}
