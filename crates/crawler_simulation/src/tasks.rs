//! Owned scheduled tasks (deferred callbacks as data)
//!
//! Every timer an entity schedules lives in that entity's `ScheduledTasks`
//! component: the set is the cancellation set. Destroying the entity destroys
//! the set, and the death / teardown paths call `cancel_all()` first so no
//! task can fire for an entity that is gone.
//!
//! Timers advance on `Time<Fixed>` (driven by `Time<Virtual>`), so pausing the
//! game freezes them.

use std::time::Duration;

use bevy::prelude::*;

/// Handle of one scheduled task, unique per owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct TaskId(pub u32);

/// What a task does when it fires. Systems react to `TaskFired` by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum TaskKind {
    /// Enemy start-up delay elapsed → start the sense loop
    Activate,
    /// One sense poll (recurring)
    SensePoll,
    /// Projectile duration elapsed → despawn
    Expire,
    /// Collected coin finished fading → despawn
    FadeOut,
    /// Deferred audio teardown after a death cue
    ReleaseCues,
}

#[derive(Debug, Clone)]
struct ScheduledTask {
    id: TaskId,
    kind: TaskKind,
    timer: Timer,
}

/// Cancellation set of an entity's pending tasks
#[derive(Component, Debug, Clone, Default)]
pub struct ScheduledTasks {
    next_id: u32,
    tasks: Vec<ScheduledTask>,
}

impl ScheduledTasks {
    pub fn schedule_once(&mut self, kind: TaskKind, delay: Duration) -> TaskId {
        self.push(kind, Timer::new(delay, TimerMode::Once))
    }

    /// Recurring task. `interval` must be non-zero.
    pub fn schedule_repeating(&mut self, kind: TaskKind, interval: Duration) -> TaskId {
        let interval = interval.max(Duration::from_millis(1));
        self.push(kind, Timer::new(interval, TimerMode::Repeating))
    }

    fn push(&mut self, kind: TaskKind, timer: Timer) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.tasks.push(ScheduledTask { id, kind, timer });
        id
    }

    /// Returns false when the task already fired (once) or was never scheduled
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    /// Cancels every pending task, returns how many were pending
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.tasks.len();
        self.tasks.clear();
        cancelled
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }

    pub fn has_pending(&self, kind: TaskKind) -> bool {
        self.tasks.iter().any(|task| task.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Advances every timer by `delta`, returns the tasks due this tick in
    /// scheduling order. Once-tasks are removed after firing; a repeating task
    /// that wrapped several times fires that many times.
    pub fn tick(&mut self, delta: Duration) -> Vec<(TaskId, TaskKind)> {
        let mut due = Vec::new();

        self.tasks.retain_mut(|task| {
            task.timer.tick(delta);
            match task.timer.mode() {
                TimerMode::Once => {
                    if task.timer.just_finished() {
                        due.push((task.id, task.kind));
                        return false;
                    }
                    true
                }
                TimerMode::Repeating => {
                    for _ in 0..task.timer.times_finished_this_tick() {
                        due.push((task.id, task.kind));
                    }
                    true
                }
            }
        });

        due
    }
}

/// A task came due. Emitted in `CombatSet::Timers`, before any per-entity update.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskFired {
    pub owner: Entity,
    pub id: TaskId,
    pub kind: TaskKind,
}

/// System: тикает все ScheduledTasks и генерирует TaskFired
///
/// Owners are visited in entity order so two runs with the same seed fire
/// tasks in the same order.
pub fn tick_scheduled_tasks(
    mut owners: Query<(Entity, &mut ScheduledTasks)>,
    time: Res<Time<Fixed>>,
    mut fired_events: EventWriter<TaskFired>,
) {
    let delta = time.delta();
    if delta.is_zero() {
        return;
    }

    let mut owners: Vec<_> = owners.iter_mut().collect();
    owners.sort_by_key(|(entity, _)| *entity);

    for (owner, mut tasks) in owners {
        if tasks.is_empty() {
            continue;
        }

        for (id, kind) in tasks.tick(delta) {
            fired_events.write(TaskFired { owner, id, kind });
        }
    }
}
