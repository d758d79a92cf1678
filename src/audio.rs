/// Audio seam.
///
/// Tone synthesis and music playback live behind `AudioSink`.  `Mixer`
/// owns the play / pause / mute / volume state and decides what reaches the
/// sink.  Sink failures are logged and dropped; audio never stops the game.

use std::io::{self, Write};

use crate::config::AudioConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Bounce,
    Collect,
    Hit,
    Jump,
}

impl Cue {
    pub fn from_name(name: &str) -> Option<Cue> {
        match name.to_ascii_lowercase().as_str() {
            "bounce" => Some(Cue::Bounce),
            "collect" => Some(Cue::Collect),
            "hit" => Some(Cue::Hit),
            "jump" => Some(Cue::Jump),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MusicCommand {
    Play { volume: f32 },
    Pause,
}

pub trait AudioSink {
    fn cue(&mut self, cue: Cue) -> io::Result<()>;
    fn music(&mut self, command: MusicCommand) -> io::Result<()>;
}

/// Sink that plays nothing.
#[derive(Debug, Default)]
pub struct SilentSink;

impl AudioSink for SilentSink {
    fn cue(&mut self, _cue: Cue) -> io::Result<()> {
        Ok(())
    }

    fn music(&mut self, _command: MusicCommand) -> io::Result<()> {
        Ok(())
    }
}

/// Rings the terminal bell for a configured subset of cues.  Music has no
/// terminal rendition and is ignored.
pub struct BellSink<W: Write> {
    out: W,
    cues: Vec<Cue>,
}

impl<W: Write> BellSink<W> {
    pub fn new(out: W, config: &AudioConfig) -> Self {
        let cues = config
            .bell_cues
            .iter()
            .filter_map(|name| {
                let cue = Cue::from_name(name);
                if cue.is_none() {
                    tracing::warn!(name = %name, "Unknown bell cue");
                }
                cue
            })
            .collect();
        Self { out, cues }
    }
}

impl<W: Write> AudioSink for BellSink<W> {
    fn cue(&mut self, cue: Cue) -> io::Result<()> {
        if self.cues.contains(&cue) {
            self.out.write_all(b"\x07")?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn music(&mut self, _command: MusicCommand) -> io::Result<()> {
        Ok(())
    }
}

// ── Mixer ─────────────────────────────────────────────────────────────────────

pub struct Mixer<S: AudioSink> {
    sink: S,
    /// Music has been started for the current session.
    playing: bool,
    /// Music is held because the game is paused.
    held: bool,
    muted: bool,
    volume: f32,
}

impl<S: AudioSink> Mixer<S> {
    pub fn new(sink: S, config: &AudioConfig) -> Self {
        Self {
            sink,
            playing: false,
            held: false,
            muted: config.muted,
            volume: config.volume.clamp(0.0, 1.0),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Fire-and-forget short tone.
    pub fn cue(&mut self, cue: Cue) {
        if self.muted {
            return;
        }
        if let Err(e) = self.sink.cue(cue) {
            tracing::warn!(?cue, error = %e, "Audio cue failed");
        }
    }

    pub fn start_music(&mut self) {
        if self.playing {
            return;
        }
        self.playing = true;
        self.held = false;
        self.refresh();
    }

    pub fn stop_music(&mut self) {
        self.playing = false;
        self.held = false;
        self.send(MusicCommand::Pause);
    }

    /// Hold music while the game is paused.
    pub fn pause_music(&mut self) {
        self.held = true;
        self.send(MusicCommand::Pause);
    }

    pub fn resume_music(&mut self) {
        self.held = false;
        self.refresh();
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        if self.muted {
            self.send(MusicCommand::Pause);
        } else {
            self.refresh();
        }
        self.muted
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.refresh();
    }

    fn refresh(&mut self) {
        if self.playing && !self.held && !self.muted {
            let volume = self.volume;
            self.send(MusicCommand::Play { volume });
        }
    }

    fn send(&mut self, command: MusicCommand) {
        if let Err(e) = self.sink.music(command) {
            tracing::warn!(?command, error = %e, "Music command failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        cues: Vec<Cue>,
        music: Vec<MusicCommand>,
    }

    impl AudioSink for Recorder {
        fn cue(&mut self, cue: Cue) -> io::Result<()> {
            self.cues.push(cue);
            Ok(())
        }

        fn music(&mut self, command: MusicCommand) -> io::Result<()> {
            self.music.push(command);
            Ok(())
        }
    }

    #[test]
    fn muted_mixer_drops_cues() {
        let mut mixer = Mixer::new(Recorder::default(), &AudioConfig::default());
        mixer.toggle_mute();
        mixer.cue(Cue::Jump);
        assert!(mixer.sink().cues.is_empty());
        mixer.toggle_mute();
        mixer.cue(Cue::Jump);
        assert_eq!(mixer.sink().cues, vec![Cue::Jump]);
    }

    #[test]
    fn resume_does_not_play_when_muted() {
        let config = AudioConfig { muted: true, ..AudioConfig::default() };
        let mut mixer = Mixer::new(Recorder::default(), &config);
        mixer.start_music();
        mixer.pause_music();
        mixer.resume_music();
        assert!(!mixer
            .sink()
            .music
            .iter()
            .any(|c| matches!(c, MusicCommand::Play { .. })));
    }

    #[test]
    fn volume_is_clamped() {
        let mut mixer = Mixer::new(Recorder::default(), &AudioConfig::default());
        mixer.set_volume(3.0);
        assert_eq!(mixer.volume(), 1.0);
        mixer.set_volume(-1.0);
        assert_eq!(mixer.volume(), 0.0);
    }

    #[test]
    fn bell_rings_only_for_configured_cues() {
        let mut buf = Vec::new();
        {
            let mut bell = BellSink::new(&mut buf, &AudioConfig::default());
            bell.cue(Cue::Jump).unwrap();
            bell.cue(Cue::Hit).unwrap();
        }
        assert_eq!(buf, b"\x07");
    }
}
