//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Run started
    Start,
    /// Goal reached, next level
    LevelClear,
    /// Wall touched, run reset
    WallTouch,
    /// Final level cleared
    Win,
    /// New best time
    BestTime,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
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
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
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

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Start => self.play_start(ctx, vol),
            SoundEffect::LevelClear => self.play_level_clear(ctx, vol),
            SoundEffect::WallTouch => self.play_wall_touch(ctx, vol),
            SoundEffect::Win => self.play_win(ctx, vol),
            SoundEffect::BestTime => self.play_best_time(ctx, vol),
        }
    }

    // === Sound generators ===

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

    /// Run start - soft rising ping
    fn play_start(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 440.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc.frequency().set_value_at_time(440.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(660.0, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Level clear - two-note chime
    fn play_level_clear(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [523.0, 784.0].into_iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time() + i as f64 * 0.1;

            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.3).ok();
        }
    }

    /// Wall touch - low buzz
    fn play_wall_touch(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(120.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(50.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();
    }

    /// Win - ascending arpeggio
    fn play_win(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [523.0, 659.0, 784.0, 1047.0].into_iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time() + i as f64 * 0.12;

            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.45).ok();
        }
    }

    /// Best time - sparkle on top of the win arpeggio
    fn play_best_time(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [1319.0, 1568.0, 2093.0].into_iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time() + 0.5 + i as f64 * 0.08;

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.25).ok();
        }
    }
}
