//! Deferred audio teardown of a destroyed actor

use bevy::prelude::*;

use crate::bridge::CueHandle;
use crate::components::ArenaEntity;
use crate::tasks::ScheduledTasks;

/// Holds a dead actor's cues until its `ReleaseCues` task fires.
///
/// The actor itself is despawned immediately; this entity owns the pending
/// release task so an early arena teardown can cancel it and release the
/// cues right away.
#[derive(Component, Debug, Clone)]
#[require(ScheduledTasks, ArenaEntity)]
pub struct DeferredCueRelease {
    /// Name of the actor that died (for logs)
    pub actor: String,
    pub handles: Vec<CueHandle>,
}
