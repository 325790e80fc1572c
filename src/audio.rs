//! Sound cues.
//!
//! The simulation only ever talks to a [`SoundSink`]: fire-and-forget cues
//! plus an on/off switch for the looping thrust sound.  Inside a Bevy app the
//! sink is the [`SoundQueue`] resource, which [`play_queued_sounds_system`]
//! drains once per frame into `AudioPlayer` entities.
//!
//! Audio is best-effort.  Cues whose `.ogg` file is missing are dropped with a
//! debug log and never reach the asset server.

use crate::constants::{
    VOLUME_ASTEROID_HIT, VOLUME_PLAYER_HIT, VOLUME_POWER_UP, VOLUME_SHOOT, VOLUME_THRUST,
};
use bevy::audio::Volume;
use bevy::prelude::*;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundId {
    Shoot,
    AsteroidHit,
    PlayerHit,
    PowerUp,
    Thrust,
}

impl SoundId {
    pub const ALL: [SoundId; 5] = [
        SoundId::Shoot,
        SoundId::AsteroidHit,
        SoundId::PlayerHit,
        SoundId::PowerUp,
        SoundId::Thrust,
    ];

    /// File stem under `assets/sounds/`.
    pub fn name(self) -> &'static str {
        match self {
            SoundId::Shoot => "shoot",
            SoundId::AsteroidHit => "asteroid_hit",
            SoundId::PlayerHit => "player_hit",
            SoundId::PowerUp => "power_up",
            SoundId::Thrust => "thrust",
        }
    }

    pub fn default_volume(self) -> f32 {
        match self {
            SoundId::Shoot => VOLUME_SHOOT,
            SoundId::AsteroidHit => VOLUME_ASTEROID_HIT,
            SoundId::PlayerHit => VOLUME_PLAYER_HIT,
            SoundId::PowerUp => VOLUME_POWER_UP,
            SoundId::Thrust => VOLUME_THRUST,
        }
    }

    pub fn asset_path(self) -> String {
        format!("sounds/{}.ogg", self.name())
    }
}

/// Where the simulation sends its audio cues.
pub trait SoundSink {
    fn play(&mut self, sound: SoundId, volume: f32);

    /// Start or stop the looping thrust sound.  Called every frame; sinks
    /// should treat repeated calls with the same value as no-ops.
    fn set_thrust(&mut self, on: bool);
}

/// Discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play(&mut self, _sound: SoundId, _volume: f32) {}
    fn set_thrust(&mut self, _on: bool) {}
}

/// Cues collected during a frame, waiting to be played.
#[derive(Resource, Debug, Default, Clone)]
pub struct SoundQueue {
    pending: Vec<(SoundId, f32)>,
    thrust: bool,
}

impl SoundSink for SoundQueue {
    fn play(&mut self, sound: SoundId, volume: f32) {
        self.pending.push((sound, volume));
    }

    fn set_thrust(&mut self, on: bool) {
        self.thrust = on;
    }
}

impl SoundQueue {
    pub fn pending(&self) -> &[(SoundId, f32)] {
        &self.pending
    }

    pub fn thrust(&self) -> bool {
        self.thrust
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, (SoundId, f32)> {
        self.pending.drain(..)
    }

    pub fn count(&self, sound: SoundId) -> usize {
        self.pending.iter().filter(|(s, _)| *s == sound).count()
    }
}

// ── Bevy playback ─────────────────────────────────────────────────────────────

/// Sound files present on disk at startup.
#[derive(Resource, Debug, Default, Clone)]
pub struct SoundCatalog {
    available: HashSet<SoundId>,
}

impl SoundCatalog {
    pub fn contains(&self, sound: SoundId) -> bool {
        self.available.contains(&sound)
    }
}

/// Marker for the looping thrust emitter.
#[derive(Component)]
pub struct ThrustLoop;

/// Startup system: record which cue files exist under `assets/`.
pub fn scan_sound_files(mut catalog: ResMut<SoundCatalog>) {
    for sound in SoundId::ALL {
        let path = Path::new("assets").join(sound.asset_path());
        if path.exists() {
            catalog.available.insert(sound);
        } else {
            debug!("Sound '{}' not found at {}; cue disabled", sound.name(), path.display());
        }
    }
    info!("Audio: {}/{} cues available", catalog.available.len(), SoundId::ALL.len());
}

/// Play every queued cue and keep the thrust loop in sync with the queue.
pub fn play_queued_sounds_system(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    catalog: Res<SoundCatalog>,
    mut queue: ResMut<SoundQueue>,
    thrust_q: Query<Entity, With<ThrustLoop>>,
) {
    let want_thrust = queue.thrust();
    for (sound, volume) in queue.drain() {
        if !catalog.contains(sound) {
            continue;
        }
        commands.spawn((
            AudioPlayer::new(asset_server.load(sound.asset_path())),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(volume)),
        ));
    }

    let playing = !thrust_q.is_empty();
    if want_thrust && !playing && catalog.contains(SoundId::Thrust) {
        commands.spawn((
            AudioPlayer::new(asset_server.load(SoundId::Thrust.asset_path())),
            PlaybackSettings::LOOP.with_volume(Volume::Linear(SoundId::Thrust.default_volume())),
            ThrustLoop,
        ));
    } else if !want_thrust && playing {
        for entity in thrust_q.iter() {
            commands.entity(entity).despawn();
        }
    }
}
