//! Weapon systems (fire gate + projectile spawn).

use std::time::Duration;

use bevy::prelude::*;

use crate::bridge::{AudioCommand, CueId, FireCommand, VisualCommand};
use crate::combat::components::{FlameGrowth, OverlapRetrigger, Projectile, Weapon};
use crate::components::{BodyCategory, BodyRadius, Facing, Lifecycle, Position, Velocity};
use crate::config::{ProjectileKind, WeaponConfig};
use crate::geometry::{aim, spawn_point, Trajectory};
use crate::tasks::{ScheduledTasks, TaskKind};

/// Событие: weapon прошёл fire gate и заспавнил projectile
#[derive(Event, Debug, Clone, PartialEq)]
pub struct WeaponFired {
    pub wielder: Entity,
    pub projectile: Entity,
    pub weapon: String,
    /// Game time of the shot
    pub at: Duration,
}

/// System: FireCommand → fire gate → projectile
///
/// Host sends FireCommand every step while the trigger is held. Weapon::fire
/// is the only throttle.
pub fn fire_weapons(
    mut commands: Commands,
    mut fire_commands: EventReader<FireCommand>,
    mut wielders: Query<(&mut Weapon, &Position, Option<&BodyRadius>, &Lifecycle)>,
    targets: Query<&Position>,
    time: Res<Time<Fixed>>,
    mut fired_events: EventWriter<WeaponFired>,
    mut audio: EventWriter<AudioCommand>,
    mut visuals: EventWriter<VisualCommand>,
) {
    let now = time.elapsed();

    for command in fire_commands.read() {
        let Ok((mut weapon, position, radius, lifecycle)) = wielders.get_mut(command.wielder) else {
            crate::logger::log_warning(&format!(
                "⚠️ FireCommand for {:?} ignored: no weapon equipped",
                command.wielder
            ));
            continue;
        };

        if lifecycle.is_dead() {
            continue;
        }

        if !weapon.fire(now) {
            continue;
        }

        // Без цели стреляем "в себя" → вырожденный aim, нулевая скорость
        let target_position = weapon
            .target
            .and_then(|target| targets.get(target).ok())
            .map(|target| target.0)
            .unwrap_or(position.0);

        let trajectory = aim(position.0, target_position, weapon.config.projectile_velocity);
        let clearance = radius.map(|r| r.0).unwrap_or(0.0) + weapon.config.spawn_clearance;
        let origin = spawn_point(position.0, trajectory.direction, clearance);

        let projectile = spawn_projectile(&mut commands, command.wielder, &weapon.config, origin, &trajectory);

        visuals.write(VisualCommand::SetRotation {
            entity: projectile,
            radians: trajectory.rotation,
        });
        visuals.write(VisualCommand::SetFacing {
            entity: projectile,
            flip_x: trajectory.flip_x,
        });
        if let ProjectileKind::Bullet { spin_deg_per_sec } = weapon.config.projectile {
            visuals.write(VisualCommand::SetSpin {
                entity: projectile,
                degrees_per_sec: spin_deg_per_sec,
            });
        }
        audio.write(AudioCommand::Play {
            handle: weapon.fire_cue,
            cue: CueId::Fire,
        });
        fired_events.write(WeaponFired {
            wielder: command.wielder,
            projectile,
            weapon: weapon.name().to_string(),
            at: now,
        });

        crate::logger::log(&format!(
            "🔫 {:?} fired {} → {:?} at {:?} (v={:?})",
            command.wielder,
            weapon.name(),
            projectile,
            origin,
            trajectory.velocity
        ));
    }
}

/// Spawns one projectile of `config` owned by `owner`, with its expiry task
pub fn spawn_projectile(
    commands: &mut Commands,
    owner: Entity,
    config: &WeaponConfig,
    origin: Vec2,
    trajectory: &Trajectory,
) -> Entity {
    let mut tasks = ScheduledTasks::default();
    tasks.schedule_once(TaskKind::Expire, config.duration());

    let mut entity = commands.spawn((
        Projectile::from_weapon(owner, config),
        Position(origin),
        Velocity(trajectory.velocity),
        Facing {
            flip_x: trajectory.flip_x,
        },
        BodyCategory::Projectile,
        OverlapRetrigger::new(Duration::from_millis(config.overlap_retrigger_ms)),
        tasks,
    ));

    if let ProjectileKind::Flame(ramp) = config.projectile {
        entity.insert(FlameGrowth::new(ramp, config.duration()));
    }

    entity.id()
}
