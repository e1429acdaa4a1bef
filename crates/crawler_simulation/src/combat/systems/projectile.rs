//! Projectile lifetime + cosmetic growth.

use bevy::prelude::*;

use crate::bridge::VisualCommand;
use crate::combat::components::{FlameGrowth, Projectile};
use crate::tasks::{TaskFired, TaskKind};

/// System: despawn projectiles whose `Expire` task fired
pub fn expire_projectiles(
    mut commands: Commands,
    mut fired: EventReader<TaskFired>,
    projectiles: Query<&Projectile>,
) {
    for task in fired.read() {
        if task.kind != TaskKind::Expire {
            continue;
        }

        let Ok(projectile) = projectiles.get(task.owner) else {
            continue;
        };

        crate::logger::log(&format!("⌛ {} projectile {:?} expired", projectile.weapon, task.owner));
        if let Ok(mut entity) = commands.get_entity(task.owner) {
            entity.despawn();
        }
    }
}

/// System: scale/alpha ramp of flame projectiles (presentation only)
pub fn animate_flame_growth(
    mut flames: Query<(Entity, &mut FlameGrowth)>,
    time: Res<Time<Fixed>>,
    mut visuals: EventWriter<VisualCommand>,
) {
    let delta = time.delta();

    for (entity, mut growth) in flames.iter_mut() {
        if growth.elapsed >= growth.ramp_duration {
            continue;
        }

        growth.elapsed = (growth.elapsed + delta).min(growth.ramp_duration);
        let (scale, alpha) = growth.sample();
        visuals.write(VisualCommand::SetScaleAlpha { entity, scale, alpha });
    }
}
