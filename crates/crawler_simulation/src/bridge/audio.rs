//! Audio contract: the simulation asks, the host plays.
//!
//! Cues are identified by `CueHandle`s allocated by the simulation. The host
//! answers with `AudioFeedback::Finished` so `PlayingCues` can answer the one
//! read-only question the simulation asks ("is this cue still playing").

use std::collections::HashSet;

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct CueHandle(pub u64);

/// Which sound asset a handle plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum CueId {
    DealDamage,
    TakeDamage,
    Shout,
    Die,
    Fire,
    Ding,
}

impl CueId {
    pub fn asset_key(&self) -> &'static str {
        match self {
            CueId::DealDamage => "dealdamage",
            CueId::TakeDamage => "takedamage",
            CueId::Shout => "shout",
            CueId::Die => "die",
            CueId::Fire => "fire",
            CueId::Ding => "ding",
        }
    }
}

/// Hands out unique cue handles
#[derive(Resource, Debug, Default)]
pub struct CueAllocator {
    next: u64,
}

impl CueAllocator {
    pub fn allocate(&mut self) -> CueHandle {
        let handle = CueHandle(self.next);
        self.next += 1;
        handle
    }

    pub fn allocated(&self) -> u64 {
        self.next
    }
}

/// Simulation → audio host (fire-and-forget)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    Play { handle: CueHandle, cue: CueId },
    StopAndRelease { handle: CueHandle },
}

/// Audio host → simulation
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFeedback {
    Finished { handle: CueHandle },
}

/// Cues started and not yet finished or released
#[derive(Resource, Debug, Default)]
pub struct PlayingCues {
    playing: HashSet<CueHandle>,
}

impl PlayingCues {
    pub fn is_playing(&self, handle: CueHandle) -> bool {
        self.playing.contains(&handle)
    }

    pub fn len(&self) -> usize {
        self.playing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playing.is_empty()
    }
}

/// The four voices of an actor
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorSounds {
    pub deal_damage: CueHandle,
    pub take_damage: CueHandle,
    pub shout: CueHandle,
    pub die: CueHandle,
}

impl ActorSounds {
    pub fn allocate(allocator: &mut CueAllocator) -> Self {
        Self {
            deal_damage: allocator.allocate(),
            take_damage: allocator.allocate(),
            shout: allocator.allocate(),
            die: allocator.allocate(),
        }
    }

    pub fn handles(&self) -> [CueHandle; 4] {
        [self.deal_damage, self.take_damage, self.shout, self.die]
    }
}

/// System: keeps PlayingCues in sync with what was asked and what the host reported
pub fn track_playing_cues(
    mut commands: EventReader<AudioCommand>,
    mut feedback: EventReader<AudioFeedback>,
    mut playing: ResMut<PlayingCues>,
) {
    for command in commands.read() {
        match command {
            AudioCommand::Play { handle, .. } => {
                playing.playing.insert(*handle);
            }
            AudioCommand::StopAndRelease { handle } => {
                playing.playing.remove(handle);
            }
        }
    }

    for AudioFeedback::Finished { handle } in feedback.read() {
        playing.playing.remove(handle);
    }
}
