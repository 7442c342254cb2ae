// Page-session state and the per-frame animation step. `Session` owns
// everything the interactive phase mutates.

use crate::audio::{AudioLevelSource, MicStatus};
use crate::balloons::{BalloonSystem, BalloonViewport};
use crate::candle::Candle;
use crate::celebration::{CelebrationPhase, CelebrationSequencer, Cue};
use crate::confetti::{ConfettiBurst, ConfettiSystem, Viewport};
use crate::constants::{FLICKER_TIME_RATE, RANDOM_PHASE_MAX};
use crate::error::ParamsError;
use crate::interaction::{pick_flame, ClickOutcome, Ray};
use crate::params::CakeParams;
use crate::scene::SceneLayout;
use rand::prelude::*;
use std::time::Duration;

/// Result of putting out one candle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extinguish {
    AlreadyOut,
    Extinguished,
    /// This was the last lit candle; the celebration has started.
    Won,
}

/// Summary of one animation frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Level read from the microphone, when it was sampled this frame.
    pub level: Option<f32>,
    pub blowing: bool,
    pub extinguished: usize,
    pub balloons_spawned: usize,
}

pub struct Session {
    params: CakeParams,
    layout: SceneLayout,
    candles: Vec<Candle>,
    extinguished: usize,
    mic: MicStatus,
    phase: CelebrationPhase,
    sequencer: CelebrationSequencer,
    balloons: BalloonSystem,
    confetti: ConfettiSystem,
    pending_cues: Vec<Cue>,
    rng: StdRng,
    clock: Duration,
}

impl Session {
    /// Light all candles for a freshly loaded scene.
    pub fn new(params: CakeParams, layout: SceneLayout, seed: u64) -> Result<Self, ParamsError> {
        params.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let count = params.candle_count;
        let candles = (0..count)
            .map(|i| {
                Candle::new(
                    i,
                    layout.flame_anchor(i, count),
                    layout.flame_height(),
                    rng.gen::<f32>() * RANDOM_PHASE_MAX,
                )
            })
            .collect::<Vec<_>>();
        log::info!("[session] {} candles lit", count);
        Ok(Self {
            balloons: BalloonSystem::new(params.balloon_exit_y),
            params,
            layout,
            candles,
            extinguished: 0,
            mic: MicStatus::Idle,
            phase: CelebrationPhase::Active,
            sequencer: CelebrationSequencer::new(),
            confetti: ConfettiSystem::new(),
            pending_cues: Vec::new(),
            rng,
            clock: Duration::ZERO,
        })
    }

    pub fn params(&self) -> &CakeParams {
        &self.params
    }

    pub fn layout(&self) -> SceneLayout {
        self.layout
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn extinguished_count(&self) -> usize {
        self.extinguished
    }

    pub fn all_out(&self) -> bool {
        self.extinguished >= self.candles.len()
    }

    pub fn mic_status(&self) -> MicStatus {
        self.mic
    }

    pub fn has_celebrated(&self) -> bool {
        self.phase.has_celebrated()
    }

    pub fn sequencer(&self) -> &CelebrationSequencer {
        &self.sequencer
    }

    pub fn balloons(&self) -> &BalloonSystem {
        &self.balloons
    }

    pub fn confetti(&self) -> &ConfettiSystem {
        &self.confetti
    }

    /// Session time accumulated from `tick`.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Microphone permission was granted. Returns `false` when the stream is
    /// no longer wanted because the candles are already out.
    pub fn mic_granted(&mut self) -> bool {
        if self.has_celebrated() {
            self.mic = MicStatus::Released;
            return false;
        }
        self.mic = MicStatus::Active;
        log::info!("[mic] blow detection enabled");
        true
    }

    pub fn mic_denied(&mut self) {
        if self.mic != MicStatus::Active {
            self.mic = MicStatus::Denied;
        }
        log::warn!("[mic] unavailable; candles can still be clicked");
    }

    /// Cues raised since the last call, in the order they were raised.
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.pending_cues)
    }

    /// Put out candle `index`. Idempotent; the last one starts the celebration.
    pub fn extinguish(&mut self, index: usize) -> Extinguish {
        let Some(candle) = self.candles.get_mut(index) else {
            return Extinguish::AlreadyOut;
        };
        if !candle.extinguish() {
            return Extinguish::AlreadyOut;
        }
        self.extinguished += 1;
        log::debug!(
            "[candle] {} out ({}/{})",
            index,
            self.extinguished,
            self.candles.len()
        );
        if self.check_win() {
            Extinguish::Won
        } else {
            Extinguish::Extinguished
        }
    }

    /// One tick of blowing on candle `index`; puts it out once the flame has
    /// shrunk to the extinguish scale. `None` means the flame only shrank.
    pub fn apply_blow_decay(&mut self, index: usize) -> Option<Extinguish> {
        let sensitivity = self.params.blow_sensitivity;
        let threshold = self.params.extinguish_scale;
        let candle = self.candles.get_mut(index)?;
        if candle.is_out() {
            return Some(Extinguish::AlreadyOut);
        }
        if candle.apply_blow_decay(sensitivity, threshold) {
            Some(self.extinguish(index))
        } else {
            None
        }
    }

    /// Hit-test a pointer ray against the lit flames and put out the nearest.
    pub fn click(&mut self, ray: &Ray) -> ClickOutcome {
        if self.all_out() {
            return ClickOutcome::Ignored;
        }
        match pick_flame(&self.candles, ray) {
            Some((index, _)) => {
                let won = self.extinguish(index) == Extinguish::Won;
                ClickOutcome::Extinguished { index, won }
            }
            None => ClickOutcome::Miss,
        }
    }

    fn check_win(&mut self) -> bool {
        if self.extinguished < self.candles.len() || !self.phase.celebrate(self.clock) {
            return false;
        }
        log::info!("[session] all candles out, celebrating");
        if self.mic.is_active() {
            self.mic = MicStatus::Released;
        }
        let cues = self.sequencer.start(self.clock, &self.params);
        self.pending_cues.extend(cues);
        true
    }

    /// Advance the session by one display frame.
    ///
    /// Passes run in a fixed order: flicker, blow detection, celebration
    /// (timed cues, balloon spawns, confetti), then particle motion.
    pub fn tick(
        &mut self,
        dt: Duration,
        viewport: Viewport,
        audio: &mut dyn AudioLevelSource,
    ) -> FrameReport {
        self.clock += dt;
        let mut report = FrameReport::default();

        // 1. flicker
        let time = self.clock.as_secs_f32() * FLICKER_TIME_RATE;
        for candle in self.candles.iter_mut() {
            let jitter = self.rng.gen::<f32>();
            candle.flicker(time, jitter);
        }

        // 2. blow detection
        if self.mic.is_active() && !self.all_out() {
            let level = audio.sample();
            report.level = Some(level);
            if level > self.params.mic_threshold {
                report.blowing = true;
                for index in 0..self.candles.len() {
                    if self.apply_blow_decay(index) == Some(Extinguish::Won) {
                        break;
                    }
                }
            }
        }

        // 3. celebration and particles
        let step = self.sequencer.advance(self.clock);
        self.pending_cues.extend(step.cues);
        if step.confetti {
            self.confetti
                .emit(&mut self.rng, ConfettiBurst::left_edge(), viewport);
            self.confetti
                .emit(&mut self.rng, ConfettiBurst::right_edge(), viewport);
        }
        let balloon_view = BalloonViewport::for_aspect(viewport.aspect());
        for _ in 0..step.balloons_to_spawn {
            self.balloons.spawn(&mut self.rng, balloon_view);
        }
        report.balloons_spawned = step.balloons_to_spawn;
        self.balloons.update(time);
        self.confetti.update();

        report.extinguished = self.extinguished;
        report
    }
}
