//! Audio binding: maps engine events onto an audio device.

use duma_rules::AudioConfig;

use crate::events::{EngineEvent, EngineObserver};

/// Fire-and-forget audio output supplied by the host.
pub trait AudioSink {
    /// Start a looping per-card track, replacing the previous one.
    fn play_loop(&mut self, track: &str);
    fn stop_loop(&mut self);
    /// Play a one-shot sound effect.
    fn play_effect(&mut self, sound: &str);
    /// Start the session-wide background track.
    fn play_background(&mut self, track: &str);
    fn stop_all(&mut self);
    fn set_volume(&mut self, volume: f32);
}

/// Keeps card tracks, the theme track and swipe sounds in step with the
/// engine.
pub struct AudioBinding<S: AudioSink> {
    sink: S,
    config: AudioConfig,
    volume: f32,
    muted: bool,
    current_loop: Option<String>,
}

impl<S: AudioSink> AudioBinding<S> {
    pub fn new(sink: S, config: AudioConfig) -> Self {
        Self {
            volume: config.volume.clamp(0.0, 1.0),
            muted: config.muted,
            sink,
            config,
            current_loop: None,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Volume actually sent to the sink.
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    /// Track of the card currently looping, if any.
    pub fn current_loop(&self) -> Option<&str> {
        self.current_loop.as_deref()
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.sink.set_volume(self.effective_volume());
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.sink.set_volume(self.effective_volume());
        self.muted
    }

    fn swap_loop(&mut self, music: Option<&String>) {
        if self.current_loop.as_ref() == music {
            return;
        }
        match music {
            Some(track) => self.sink.play_loop(track),
            None => self.sink.stop_loop(),
        }
        self.current_loop = music.cloned();
    }
}

impl<S: AudioSink> EngineObserver for AudioBinding<S> {
    fn on_event(&mut self, event: &EngineEvent) {
        match event {
            EngineEvent::Started => {
                self.sink.set_volume(self.effective_volume());
                self.sink.play_background(&self.config.theme_track);
            }
            EngineEvent::TransitionStarted { .. } => {
                if !self.muted {
                    self.sink.play_effect(&self.config.swipe_effect);
                }
            }
            EngineEvent::CurrentCardChanged { music, .. } => self.swap_loop(music.as_ref()),
            EngineEvent::ShutDown => {
                self.sink.stop_all();
                self.current_loop = None;
            }
            _ => {}
        }
    }
}
