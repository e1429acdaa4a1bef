//! Event Bus: typed game signals + subscriber fan-out
//!
//! Systems write `GameSignal` as regular Bevy events. At the end of every
//! simulation tick `dispatch_signals` forwards them, in emission order, to the
//! `SignalBus` resource, which calls every subscriber of that signal kind once,
//! in registration order.
//!
//! The bus is owned by the App (simulation root), not by a global. Payloads are
//! typed, but state is already mutated when a signal is published: subscribers
//! may re-read `GameStats` / `Health` instead of trusting the payload.

use bevy::prelude::*;

use crate::components::Health;

/// Signals crossing from the simulation to decoupled observers (UI, audio, loot)
#[derive(Event, Debug, Clone, PartialEq)]
pub enum GameSignal {
    ScoreChange { score: u32 },
    HealthChange { entity: Entity, current: u32, max: u32 },
    EnemyDied { enemy: Entity, position: Vec2 },
}

impl GameSignal {
    pub fn kind(&self) -> SignalKind {
        match self {
            GameSignal::ScoreChange { .. } => SignalKind::ScoreChange,
            GameSignal::HealthChange { .. } => SignalKind::HealthChange,
            GameSignal::EnemyDied { .. } => SignalKind::EnemyDied,
        }
    }

    /// Wire identifier of the signal
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn health_change(entity: Entity, health: &Health) -> Self {
        GameSignal::HealthChange {
            entity,
            current: health.current,
            max: health.max,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    ScoreChange,
    HealthChange,
    EnemyDied,
}

impl SignalKind {
    pub const ALL: [SignalKind; 3] = [SignalKind::ScoreChange, SignalKind::HealthChange, SignalKind::EnemyDied];

    pub fn name(&self) -> &'static str {
        match self {
            SignalKind::ScoreChange => "scoreChange",
            SignalKind::HealthChange => "healthChange",
            SignalKind::EnemyDied => "enemyDied",
        }
    }

    fn index(&self) -> usize {
        match self {
            SignalKind::ScoreChange => 0,
            SignalKind::HealthChange => 1,
            SignalKind::EnemyDied => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

pub type SignalHandler = Box<dyn FnMut(&GameSignal) + Send + Sync>;

struct Subscription {
    id: SubscriptionId,
    kind: SignalKind,
    handler: SignalHandler,
}

/// Publish/subscribe channel for `GameSignal`s
///
/// Handlers run synchronously inside `publish`. A subscriber owns its
/// `SubscriptionId` and is responsible for `unsubscribe` when it goes away.
#[derive(Resource, Default)]
pub struct SignalBus {
    next_id: u64,
    subscriptions: Vec<Subscription>,
    published: [u64; 3],
}

impl SignalBus {
    pub fn subscribe(
        &mut self,
        kind: SignalKind,
        handler: impl FnMut(&GameSignal) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            kind,
            handler: Box::new(handler),
        });
        id
    }

    /// Returns false if the id was not subscribed (already removed)
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|subscription| subscription.id != id);
        self.subscriptions.len() != before
    }

    /// Calls every subscriber of `signal.kind()` exactly once, in registration order
    pub fn publish(&mut self, signal: &GameSignal) {
        let kind = signal.kind();
        self.published[kind.index()] += 1;

        for subscription in self.subscriptions.iter_mut().filter(|s| s.kind == kind) {
            (subscription.handler)(signal);
        }
    }

    /// How many signals of this kind were published so far
    pub fn published(&self, kind: SignalKind) -> u64 {
        self.published[kind.index()]
    }

    pub fn subscriber_count(&self, kind: SignalKind) -> usize {
        self.subscriptions.iter().filter(|s| s.kind == kind).count()
    }
}

impl std::fmt::Debug for SignalBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalBus")
            .field("subscriptions", &self.subscriptions.len())
            .field("published", &self.published)
            .finish()
    }
}

/// Re-readable shared state behind `scoreChange`
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStats {
    pub score: u32,
}

impl GameStats {
    pub fn change_score(&mut self, delta: u32) -> u32 {
        self.score = self.score.saturating_add(delta);
        self.score
    }
}

/// System: forwards this tick's GameSignal events to the bus
pub fn dispatch_signals(mut signals: EventReader<GameSignal>, mut bus: ResMut<SignalBus>) {
    for signal in signals.read() {
        crate::logger::log(&format!("📣 {} {:?}", signal.name(), signal));
        bus.publish(signal);
    }
}

/// Signals Plugin
pub struct SignalPlugin;

impl Plugin for SignalPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GameSignal>()
            .init_resource::<SignalBus>()
            .init_resource::<GameStats>()
            .add_systems(FixedUpdate, dispatch_signals.in_set(crate::CombatSet::Signals));
    }
}
