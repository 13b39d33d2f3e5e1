//! Audio cues using the Web Audio API
//!
//! Procedurally generated tones, no external files. The cue mapping is
//! platform independent; playback only exists on wasm.

use crate::settings::Settings;
use crate::sim::SessionEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Stroke started
    Chime,
    /// Stroke won a prize
    Fanfare,
    /// Stroke scored below the threshold
    GameOver,
}

impl SoundCue {
    /// Cue to play for a session event, if any
    pub fn for_event(event: &SessionEvent) -> Option<Self> {
        match event {
            SessionEvent::StrokeStarted { .. } => Some(SoundCue::Chime),
            SessionEvent::Evaluated(verdict) if verdict.won => Some(SoundCue::Fanfare),
            SessionEvent::Evaluated(_) => Some(SoundCue::GameOver),
            _ => None,
        }
    }

    /// Playback volume after master volume and mute
    pub fn volume(&self, settings: &Settings) -> f32 {
        let cue = match self {
            SoundCue::Chime => settings.music_volume,
            SoundCue::Fanfare => settings.win_volume,
            SoundCue::GameOver => settings.lose_volume,
        };
        settings.effective_volume(cue)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::SoundCue;
    use crate::settings::Settings;
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a cue at the volume the settings allow
        pub fn play(&self, cue: SoundCue, settings: &Settings) {
            let vol = cue.volume(settings);
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                SoundCue::Chime => self.play_chime(ctx, vol),
                SoundCue::Fanfare => self.play_fanfare(ctx, vol),
                SoundCue::GameOver => self.play_game_over(ctx, vol),
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Soft two-note chime
        fn play_chime(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [660.0, 880.0].iter().enumerate() {
                let delay = i as f64 * 0.06;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }

        /// Rising arpeggio
        fn play_fanfare(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [523.0, 659.0, 784.0, 1047.0, 1319.0].iter().enumerate() {
                let delay = i as f64 * 0.09;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle)
                {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.4, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.5).ok();
                }
            }
        }

        /// Falling tones
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let delay = i as f64 * 0.2;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.5, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }
    }
}
