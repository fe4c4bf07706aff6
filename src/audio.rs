//! Sound cue contract
//!
//! The simulation only names cues; playback belongs to an [`AudioSink`]
//! supplied by the host. [`AudioMixer`] applies the player's volume settings
//! before a cue reaches the sink.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Successful hit, shield absorb, achievement
    Chime,
    /// Life lost
    Twang,
    /// Game start, boss defeated (low pitch)
    Start,
    /// Rift activated
    Rift,
    /// Power-up collected
    PowerUp,
    /// Every 5th combo hit
    Combo,
    /// Boss took damage
    BossHit,
}

/// Background music transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicRequest {
    /// Start (or resume) the looping track
    Start,
    Pause,
}

/// Playback collaborator (fire-and-forget)
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue, pitch: f32, volume: f32);

    /// Drive the looping background track
    fn music(&mut self, _request: MusicRequest, _volume: f32) {}

    /// Music volume changed while the track may be playing
    fn set_music_volume(&mut self, _volume: f32) {}
}

/// Discards every cue
#[derive(Debug, Default)]
pub struct NullAudioSink;

impl AudioSink for NullAudioSink {
    fn play(&mut self, _cue: SoundCue, _pitch: f32, _volume: f32) {}
}

/// Logs cues instead of playing them (headless runs)
#[derive(Debug, Default)]
pub struct LogAudioSink;

impl AudioSink for LogAudioSink {
    fn play(&mut self, cue: SoundCue, pitch: f32, volume: f32) {
        log::trace!("sfx {:?} pitch {:.2} volume {:.2}", cue, pitch, volume);
    }

    fn music(&mut self, request: MusicRequest, volume: f32) {
        log::debug!("bgm {:?} volume {:.2}", request, volume);
    }
}

/// Volume stage between the simulation and the sink
#[derive(Debug, Clone)]
pub struct AudioMixer {
    master_volume: f32,
    sfx_volume: f32,
    bgm_volume: f32,
    muted: bool,
}

impl Default for AudioMixer {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl AudioMixer {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            bgm_volume: settings.bgm_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set background music volume (0.0 - 1.0)
    pub fn set_bgm_volume(&mut self, vol: f32) {
        self.bgm_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective background music volume
    pub fn music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.bgm_volume
        }
    }

    /// Forward a music request; never dropped, even when muted
    pub fn play_music(&self, sink: &mut dyn AudioSink, request: MusicRequest) {
        sink.music(request, self.music_volume());
    }

    /// Forward a cue at the current volume; silent cues are dropped
    pub fn play(&self, sink: &mut dyn AudioSink, cue: SoundCue, pitch: f32) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        sink.play(cue, pitch, vol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(SoundCue, f32, f32)>, Vec<(MusicRequest, f32)>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: SoundCue, pitch: f32, volume: f32) {
            self.0.push((cue, pitch, volume));
        }

        fn music(&mut self, request: MusicRequest, volume: f32) {
            self.1.push((request, volume));
        }
    }

    #[test]
    fn test_volume_applied() {
        let mut mixer = AudioMixer::default();
        mixer.set_master_volume(0.5);
        mixer.set_sfx_volume(0.5);
        let mut sink = Recorder::default();
        mixer.play(&mut sink, SoundCue::Chime, 1.3);
        assert_eq!(sink.0, vec![(SoundCue::Chime, 1.3, 0.25)]);
    }

    #[test]
    fn test_muted_drops_cue() {
        let mut mixer = AudioMixer::default();
        mixer.set_muted(true);
        let mut sink = Recorder::default();
        mixer.play(&mut sink, SoundCue::Twang, 1.0);
        assert!(sink.0.is_empty());
    }

    #[test]
    fn test_music_uses_bgm_volume() {
        let settings = Settings {
            master_volume: 0.5,
            bgm_volume: 0.4,
            ..Default::default()
        };
        let mut mixer = AudioMixer::from_settings(&settings);
        let mut sink = Recorder::default();
        mixer.play_music(&mut sink, MusicRequest::Start);
        assert_eq!(sink.1, vec![(MusicRequest::Start, 0.2)]);

        mixer.set_muted(true);
        mixer.play_music(&mut sink, MusicRequest::Pause);
        assert_eq!(sink.1[1], (MusicRequest::Pause, 0.0));
        assert!(sink.0.is_empty());
    }

    #[test]
    fn test_volume_clamped() {
        let mut mixer = AudioMixer::default();
        mixer.set_master_volume(3.0);
        mixer.set_sfx_volume(-1.0);
        assert_eq!(mixer.effective_volume(), 0.0);
    }
}
