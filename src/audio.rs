//! Sound cues
//!
//! The simulation reports events; the host turns the interesting ones into
//! fire-and-forget cues. Nothing waits on playback and failures are ignored.
//! On the web the cues are synthesised with Web Audio - no external files.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ground or double jump
    Jump,
    /// Spring pad launch
    Spring,
    /// Star or chest collected
    Coin,
    /// Enemy contact
    Hit,
    /// Run ended
    GameOver,
    /// Boots collected
    Boots,
}

impl SoundEffect {
    /// Cue name as used by asset-based hosts
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::Spring => "spring",
            SoundEffect::Coin => "coin",
            SoundEffect::Hit => "hit",
            SoundEffect::GameOver => "gameOver",
            SoundEffect::Boots => "boots",
        }
    }

    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped | GameEvent::DoubleJumped => Some(SoundEffect::Jump),
            GameEvent::SpringLaunched { .. } => Some(SoundEffect::Spring),
            GameEvent::StarCollected { .. } | GameEvent::ChestOpened { .. } => {
                Some(SoundEffect::Coin)
            }
            GameEvent::BootsCollected { .. } => Some(SoundEffect::Boots),
            GameEvent::EnemyHit { .. } => Some(SoundEffect::Hit),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::Landed { .. }
            | GameEvent::FastClimb
            | GameEvent::PlatformFalling { .. }
            | GameEvent::Recycled { .. } => None,
        }
    }
}

/// Sound-trigger capability
pub trait SoundSink {
    fn play(&self, effect: SoundEffect);
}

/// Silent sink for headless runs; logs cues at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl SoundSink for NullAudio {
    fn play(&self, effect: SoundEffect) {
        log::debug!("cue: {}", effect.name());
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, SoundSink};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
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

        /// Single tone sweeping from `from` to `to` Hz
        fn sweep(
            &self,
            ctx: &AudioContext,
            osc_type: OscillatorType,
            from: f32,
            to: f32,
            level: f32,
            duration: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + duration * 0.8)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + duration + 0.05).ok();
        }

        /// Short notes played one after another
        fn arpeggio(&self, ctx: &AudioContext, freqs: &[f32], step: f64, level: f32) {
            for (i, freq) in freqs.iter().enumerate() {
                let delay = i as f64 * step;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(level, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + step * 1.5)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + step * 2.0).ok();
                }
            }
        }
    }

    impl SoundSink for AudioManager {
        fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Jump => {
                    self.sweep(ctx, OscillatorType::Triangle, 220.0, 520.0, vol * 0.3, 0.15)
                }
                SoundEffect::Spring => {
                    self.sweep(ctx, OscillatorType::Square, 150.0, 900.0, vol * 0.25, 0.3)
                }
                SoundEffect::Coin => self.arpeggio(ctx, &[880.0, 1320.0], 0.07, vol * 0.25),
                SoundEffect::Boots => {
                    self.arpeggio(ctx, &[600.0, 800.0, 1000.0], 0.08, vol * 0.25)
                }
                SoundEffect::Hit => {
                    self.sweep(ctx, OscillatorType::Sawtooth, 300.0, 60.0, vol * 0.4, 0.25)
                }
                SoundEffect::GameOver => {
                    self.arpeggio(ctx, &[400.0, 350.0, 300.0, 200.0], 0.2, vol * 0.3)
                }
            }
        }
    }
}
